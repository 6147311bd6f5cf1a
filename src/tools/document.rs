use super::{ServerState, ToolOutcome, ToolResult};
use crate::backend::DocKind;
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub fn open(state: &mut ServerState, url: &str) -> ToolResult {
    let (handle, kind) = state.backend.open(url)?;
    let doc_id = state.registry.register(handle, kind);
    tracing::info!(%doc_id, %kind, url, "opened document");
    Ok(ToolOutcome::new(
        format!("Opened {kind} document as {doc_id}"),
        json!({"doc_id": doc_id, "kind": kind.as_str()}),
    ))
}

pub fn new(state: &mut ServerState, kind: DocKind) -> ToolResult {
    let handle = state.backend.create(kind)?;
    let doc_id = state.registry.register(handle, kind);
    tracing::info!(%doc_id, %kind, "created document");
    Ok(ToolOutcome::new(
        format!("Created new {kind} document as {doc_id}"),
        json!({"doc_id": doc_id, "kind": kind.as_str()}),
    ))
}

pub fn close(state: &mut ServerState, doc_id: &str) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    // Close the underlying document first; on failure the entry stays
    // registered so the caller can retry or inspect.
    state.backend.close(entry.handle)?;
    state.registry.unregister(doc_id);
    tracing::info!(%doc_id, "closed document");
    Ok(ToolOutcome::new(
        format!("Document {doc_id} closed"),
        json!({"doc_id": doc_id}),
    ))
}

pub fn save(
    state: &mut ServerState,
    doc_id: &str,
    url: &str,
    filter_name: Option<&str>,
) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    state.backend.save(entry.handle, url, filter_name)?;
    tracing::info!(%doc_id, url, "saved document");
    Ok(ToolOutcome::new(
        format!("Document saved to {url}"),
        json!({"doc_id": doc_id, "url": url, "filter_name": filter_name}),
    ))
}

pub fn export_pdf(state: &mut ServerState, doc_id: &str, url: &str) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    state.backend.export_pdf(entry.handle, url)?;
    tracing::info!(%doc_id, url, "exported document to pdf");
    Ok(ToolOutcome::new(
        format!("Exported {doc_id} to {url}"),
        json!({"doc_id": doc_id, "url": url}),
    ))
}

pub fn properties(state: &mut ServerState, doc_id: &str) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    let properties = state.backend.document_properties(entry.handle)?;
    let text = if properties.is_empty() {
        "no document properties set".to_string()
    } else {
        properties
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(ToolOutcome::new(text, json!({"properties": properties})))
}

pub fn set_properties(
    state: &mut ServerState,
    doc_id: &str,
    properties: BTreeMap<String, String>,
) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    let count = properties.len();
    state
        .backend
        .set_document_properties(entry.handle, &properties)?;
    Ok(ToolOutcome::new(
        format!("Updated {count} document properties"),
        json!({"doc_id": doc_id, "updated": count}),
    ))
}

pub fn run_macro(
    state: &mut ServerState,
    doc_id: &str,
    macro_name: &str,
    args: &[Value],
) -> ToolResult {
    let entry = super::resolve(state, doc_id)?;
    let result = state.backend.run_macro(entry.handle, macro_name, args)?;
    Ok(ToolOutcome::new(
        format!("Executed macro '{macro_name}'"),
        json!({"doc_id": doc_id, "result": result}),
    ))
}
