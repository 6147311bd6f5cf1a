use super::{ServerState, ToolOutcome, ToolResult};
use crate::backend::DocKind;
use serde_json::json;

pub fn text_content(state: &mut ServerState, doc_id: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Text)?;
    let content = state.backend.text_content(handle)?;
    Ok(ToolOutcome::new(content.clone(), json!({"text": content})))
}

pub fn insert_text(state: &mut ServerState, doc_id: &str, position: u64, text: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Text)?;
    state.backend.insert_text(handle, position, text)?;
    Ok(ToolOutcome::new(
        format!("Inserted '{text}' at position {position}"),
        json!({"position": position, "chars": text.chars().count()}),
    ))
}

pub fn insert_table(
    state: &mut ServerState,
    doc_id: &str,
    position: u64,
    rows: u32,
    cols: u32,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Text)?;
    state.backend.insert_table(handle, position, rows, cols)?;
    Ok(ToolOutcome::new(
        format!("Inserted {rows}x{cols} table at position {position}"),
        json!({"position": position, "rows": rows, "cols": cols}),
    ))
}

pub fn apply_style(
    state: &mut ServerState,
    doc_id: &str,
    start: u64,
    end: u64,
    style_name: &str,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Text)?;
    state.backend.apply_text_style(handle, start, end, style_name)?;
    Ok(ToolOutcome::new(
        format!("Applied style '{style_name}' to text from position {start} to {end}"),
        json!({"start": start, "end": end, "style": style_name}),
    ))
}

pub fn insert_image(
    state: &mut ServerState,
    doc_id: &str,
    position: u64,
    image_url: &str,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Text)?;
    state.backend.insert_image(handle, position, image_url)?;
    Ok(ToolOutcome::new(
        format!("Inserted image from {image_url} at position {position}"),
        json!({"position": position, "image_url": image_url}),
    ))
}
