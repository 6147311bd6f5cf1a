use super::{ServerState, ToolOutcome, ToolResult};
use crate::backend::{DocKind, QueryOutcome};
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub fn list_tables(state: &mut ServerState, doc_id: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Database)?;
    let tables = state.backend.list_tables(handle)?;
    let text = if tables.is_empty() {
        "no tables".to_string()
    } else {
        tables.join(", ")
    };
    Ok(ToolOutcome::new(text, json!({"tables": tables})))
}

pub fn create_table(
    state: &mut ServerState,
    doc_id: &str,
    table_name: &str,
    columns: &[(String, String)],
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Database)?;
    state.backend.create_table(handle, table_name, columns)?;
    Ok(ToolOutcome::new(
        format!("Created table '{table_name}'"),
        json!({"table": table_name, "columns": columns.len()}),
    ))
}

pub fn delete_table(state: &mut ServerState, doc_id: &str, table_name: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Database)?;
    state.backend.delete_table(handle, table_name)?;
    Ok(ToolOutcome::new(
        format!("Deleted table '{table_name}'"),
        json!({"table": table_name}),
    ))
}

pub fn insert_data(
    state: &mut ServerState,
    doc_id: &str,
    table_name: &str,
    row: &BTreeMap<String, Value>,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Database)?;
    state.backend.insert_row(handle, table_name, row)?;
    Ok(ToolOutcome::new(
        format!("Inserted 1 row(s) into '{table_name}'"),
        json!({"table": table_name}),
    ))
}

pub fn run_query(state: &mut ServerState, doc_id: &str, sql: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Database)?;
    match state.backend.run_query(handle, sql)? {
        QueryOutcome::Rows(rows) => Ok(ToolOutcome::new(
            format!("{} row(s)", rows.len()),
            json!({"rows": rows}),
        )),
        QueryOutcome::Updated(affected) => Ok(ToolOutcome::new(
            format!("Affected {affected} rows"),
            json!({"affected": affected}),
        )),
    }
}
