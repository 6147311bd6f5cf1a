use super::{ServerState, ToolOutcome, ToolResult};
use crate::address::{CellAddress, CellRange};
use crate::backend::{CellValue, ChartKind, DocKind};
use serde_json::json;

pub fn sheet_names(state: &mut ServerState, doc_id: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    let sheets = state.backend.sheet_names(handle)?;
    Ok(ToolOutcome::new(sheets.join(", "), json!({"sheets": sheets})))
}

pub fn cell_value(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    cell: CellAddress,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    let value = state.backend.cell_value(handle, sheet_name, cell)?;
    Ok(ToolOutcome::new(
        value.to_string(),
        json!({"cell": cell.to_string(), "value": value.to_json()}),
    ))
}

pub fn set_cell_value(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    cell: CellAddress,
    value: CellValue,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    let display = value.to_string();
    state
        .backend
        .set_cell_value(handle, sheet_name, cell, value)?;
    Ok(ToolOutcome::new(
        format!("Set {cell} to {display}"),
        json!({"cell": cell.to_string(), "sheet": sheet_name}),
    ))
}

pub fn set_cell_formula(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    cell: CellAddress,
    formula: &str,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state
        .backend
        .set_cell_formula(handle, sheet_name, cell, formula)?;
    Ok(ToolOutcome::new(
        format!("Set formula in {cell} to {formula}"),
        json!({"cell": cell.to_string(), "sheet": sheet_name, "formula": formula}),
    ))
}

pub fn create_sheet(state: &mut ServerState, doc_id: &str, sheet_name: &str) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state.backend.add_sheet(handle, sheet_name)?;
    Ok(ToolOutcome::new(
        format!("Created new sheet '{sheet_name}'"),
        json!({"sheet": sheet_name}),
    ))
}

pub fn create_chart(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    data_range: CellRange,
    chart_kind: ChartKind,
    target_cell: CellAddress,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state
        .backend
        .create_chart(handle, sheet_name, data_range, chart_kind, target_cell)?;
    Ok(ToolOutcome::new(
        format!("Created {} chart at {target_cell}", chart_kind.as_str()),
        json!({
            "sheet": sheet_name,
            "data_range": data_range.to_string(),
            "chart_type": chart_kind.as_str(),
            "target_cell": target_cell.to_string()
        }),
    ))
}

pub fn conditional_format(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    range: CellRange,
    condition: &str,
    style: &str,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state
        .backend
        .conditional_format(handle, sheet_name, range, condition, style)?;
    Ok(ToolOutcome::new(
        format!("Applied conditional format to {range}"),
        json!({"sheet": sheet_name, "range": range.to_string(), "condition": condition, "style": style}),
    ))
}

pub fn group_range(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    range: CellRange,
    by_rows: bool,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state.backend.group_range(handle, sheet_name, range, by_rows)?;
    let direction = if by_rows { "rows" } else { "columns" };
    Ok(ToolOutcome::new(
        format!("Grouped {range} by {direction}"),
        json!({"sheet": sheet_name, "range": range.to_string(), "by_rows": by_rows}),
    ))
}

pub fn sort_range(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    range: CellRange,
    sort_column: u32,
    ascending: bool,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state
        .backend
        .sort_range(handle, sheet_name, range, sort_column, ascending)?;
    let direction = if ascending { "ascending" } else { "descending" };
    Ok(ToolOutcome::new(
        format!("Sorted range {range} by column {sort_column} {direction}"),
        json!({"sheet": sheet_name, "range": range.to_string(), "sort_column": sort_column, "ascending": ascending}),
    ))
}

pub fn statistics(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    range: CellRange,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    let values = state.backend.range_values(handle, sheet_name, range)?;
    let numbers: Vec<f64> = values.iter().filter_map(CellValue::as_number).collect();
    let sum: f64 = numbers.iter().sum();
    let average = if numbers.is_empty() {
        0.0
    } else {
        sum / numbers.len() as f64
    };
    Ok(ToolOutcome::new(
        format!("sum={sum} average={average}"),
        json!({"sum": sum, "average": average}),
    ))
}

pub fn format_table(
    state: &mut ServerState,
    doc_id: &str,
    sheet_name: &str,
    range: CellRange,
    border_width: u32,
    background_color: &str,
) -> ToolResult {
    let handle = super::resolve_kind(state, doc_id, DocKind::Spreadsheet)?;
    state
        .backend
        .format_range(handle, sheet_name, range, border_width, background_color)?;
    Ok(ToolOutcome::new(
        format!(
            "Formatted table {range} with border width {border_width} and background {background_color}"
        ),
        json!({
            "sheet": sheet_name,
            "range": range.to_string(),
            "border_width": border_width,
            "background_color": background_color
        }),
    ))
}
