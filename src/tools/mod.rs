use crate::backend::{BackendError, DocHandle, DocKind, DocumentBackend};
use crate::mcp::errors;
use crate::registry::{DocumentEntry, DocumentRegistry};
use crate::request::ToolRequest;
use serde_json::{Value, json};

pub mod base;
pub mod calc;
pub mod document;
pub mod draw;
pub mod writer;

/// Registry plus backend, owned by whoever runs the server loop. Tests build
/// one around the in-memory backend directly.
pub struct ServerState {
    pub registry: DocumentRegistry,
    pub backend: Box<dyn DocumentBackend>,
}

impl ServerState {
    pub fn new(backend: Box<dyn DocumentBackend>) -> Self {
        Self {
            registry: DocumentRegistry::new(),
            backend,
        }
    }
}

pub type ToolResult = Result<ToolOutcome, ToolError>;

/// Successful tool output: a human-readable line plus structured content.
pub struct ToolOutcome {
    text: String,
    structured: Value,
}

impl ToolOutcome {
    pub fn new(text: impl Into<String>, structured: Value) -> Self {
        Self {
            text: text.into(),
            structured,
        }
    }

    fn into_value(self) -> Value {
        json!({
            "content": [{"type": "text", "text": self.text}],
            "structuredContent": self.structured,
            "isError": false
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: &'static str,
    pub message: String,
}

impl ToolError {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<BackendError> for ToolError {
    fn from(error: BackendError) -> Self {
        Self::new(errors::EXTERNAL_OPERATION_FAILED, error.to_string())
    }
}

pub fn error_result(kind: &str, message: impl Into<String>, source: Option<&str>) -> Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

/// Single entry point for `tools/call`: validate into a typed request, run
/// the adapter, and fold either outcome into the result envelope. Errors are
/// payloads, never failures of the loop itself.
pub fn handle_call(state: &mut ServerState, name: &str, args: &Value) -> Value {
    let request = match ToolRequest::parse(name, args) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(tool = name, kind = err.kind, "rejected tool call");
            return error_result(err.kind, err.message, Some(name));
        }
    };

    tracing::debug!(tool = name, "dispatching tool call");
    match dispatch(state, request) {
        Ok(outcome) => outcome.into_value(),
        Err(err) => error_result(err.kind, err.message, Some(name)),
    }
}

fn dispatch(state: &mut ServerState, request: ToolRequest) -> ToolResult {
    match request {
        ToolRequest::OpenDocument { url } => document::open(state, &url),
        ToolRequest::NewDocument { kind } => document::new(state, kind),
        ToolRequest::CloseDocument { doc_id } => document::close(state, &doc_id),
        ToolRequest::SaveDocument {
            doc_id,
            url,
            filter_name,
        } => document::save(state, &doc_id, &url, filter_name.as_deref()),
        ToolRequest::ExportToPdf { doc_id, url } => document::export_pdf(state, &doc_id, &url),
        ToolRequest::GetDocumentProperties { doc_id } => document::properties(state, &doc_id),
        ToolRequest::SetDocumentProperties { doc_id, properties } => {
            document::set_properties(state, &doc_id, properties)
        }
        ToolRequest::RunMacro {
            doc_id,
            macro_name,
            args,
        } => document::run_macro(state, &doc_id, &macro_name, &args),
        ToolRequest::GetSheetNames { doc_id } => calc::sheet_names(state, &doc_id),
        ToolRequest::GetCellValue {
            doc_id,
            sheet_name,
            cell,
        } => calc::cell_value(state, &doc_id, &sheet_name, cell),
        ToolRequest::SetCellValue {
            doc_id,
            sheet_name,
            cell,
            value,
        } => calc::set_cell_value(state, &doc_id, &sheet_name, cell, value),
        ToolRequest::SetCellFormula {
            doc_id,
            sheet_name,
            cell,
            formula,
        } => calc::set_cell_formula(state, &doc_id, &sheet_name, cell, &formula),
        ToolRequest::CreateNewSheet { doc_id, sheet_name } => {
            calc::create_sheet(state, &doc_id, &sheet_name)
        }
        ToolRequest::CreateChart {
            doc_id,
            sheet_name,
            data_range,
            chart_kind,
            target_cell,
        } => calc::create_chart(state, &doc_id, &sheet_name, data_range, chart_kind, target_cell),
        ToolRequest::ApplyConditionalFormatting {
            doc_id,
            sheet_name,
            range,
            condition,
            style,
        } => calc::conditional_format(state, &doc_id, &sheet_name, range, &condition, &style),
        ToolRequest::GroupRange {
            doc_id,
            sheet_name,
            range,
            by_rows,
        } => calc::group_range(state, &doc_id, &sheet_name, range, by_rows),
        ToolRequest::SortRange {
            doc_id,
            sheet_name,
            range,
            sort_column,
            ascending,
        } => calc::sort_range(state, &doc_id, &sheet_name, range, sort_column, ascending),
        ToolRequest::CalculateStatistics {
            doc_id,
            sheet_name,
            range,
        } => calc::statistics(state, &doc_id, &sheet_name, range),
        ToolRequest::FormatTable {
            doc_id,
            sheet_name,
            range,
            border_width,
            background_color,
        } => calc::format_table(state, &doc_id, &sheet_name, range, border_width, &background_color),
        ToolRequest::GetTextContent { doc_id } => writer::text_content(state, &doc_id),
        ToolRequest::InsertText {
            doc_id,
            position,
            text,
        } => writer::insert_text(state, &doc_id, position, &text),
        ToolRequest::InsertTable {
            doc_id,
            position,
            rows,
            cols,
        } => writer::insert_table(state, &doc_id, position, rows, cols),
        ToolRequest::ApplyStyle {
            doc_id,
            start,
            end,
            style_name,
        } => writer::apply_style(state, &doc_id, start, end, &style_name),
        ToolRequest::InsertImage {
            doc_id,
            position,
            image_url,
        } => writer::insert_image(state, &doc_id, position, &image_url),
        ToolRequest::InsertSlide { doc_id, position } => draw::insert_slide(state, &doc_id, position),
        ToolRequest::AddShape {
            doc_id,
            page,
            shape,
            x,
            y,
            width,
            height,
        } => draw::add_shape(state, &doc_id, page, shape, x, y, width, height),
        ToolRequest::ListTables { doc_id } => base::list_tables(state, &doc_id),
        ToolRequest::CreateTable {
            doc_id,
            table_name,
            columns,
        } => base::create_table(state, &doc_id, &table_name, &columns),
        ToolRequest::DeleteTable { doc_id, table_name } => {
            base::delete_table(state, &doc_id, &table_name)
        }
        ToolRequest::InsertData {
            doc_id,
            table_name,
            row,
        } => base::insert_data(state, &doc_id, &table_name, &row),
        ToolRequest::RunQuery { doc_id, sql } => base::run_query(state, &doc_id, &sql),
    }
}

fn resolve(state: &ServerState, doc_id: &str) -> Result<DocumentEntry, ToolError> {
    state.registry.resolve(doc_id).ok_or_else(|| {
        ToolError::new(
            errors::DOCUMENT_NOT_FOUND,
            format!("document '{doc_id}' not found"),
        )
    })
}

fn resolve_kind(
    state: &ServerState,
    doc_id: &str,
    required: DocKind,
) -> Result<DocHandle, ToolError> {
    let entry = resolve(state, doc_id)?;
    if entry.kind != required {
        return Err(ToolError::new(
            errors::TYPE_MISMATCH,
            format!("document '{doc_id}' is not a {required} document"),
        ));
    }
    Ok(entry.handle)
}

/// Slide and shape tools work on both presentations and drawings; the
/// original suite opens both through the same drawing interface.
fn resolve_pages(state: &ServerState, doc_id: &str) -> Result<DocHandle, ToolError> {
    let entry = resolve(state, doc_id)?;
    match entry.kind {
        DocKind::Presentation | DocKind::Drawing => Ok(entry.handle),
        _ => Err(ToolError::new(
            errors::TYPE_MISMATCH,
            format!("document '{doc_id}' is not a presentation or drawing document"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::json;
    use std::fs::File;
    use tempfile::tempdir;

    fn state() -> ServerState {
        ServerState::new(Box::new(MemoryBackend::new()))
    }

    fn call(state: &mut ServerState, name: &str, args: Value) -> Value {
        handle_call(state, name, &args)
    }

    fn error_kind(result: &Value) -> &str {
        result
            .get("structuredContent")
            .and_then(|v| v.get("error"))
            .and_then(|v| v.get("kind"))
            .and_then(|v| v.as_str())
            .expect("error kind")
    }

    fn structured<'a>(result: &'a Value, key: &str) -> &'a Value {
        result
            .get("structuredContent")
            .and_then(|v| v.get(key))
            .expect("structured field")
    }

    fn is_error(result: &Value) -> bool {
        result
            .get("isError")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    #[test]
    fn open_set_get_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("a.ods");
        File::create(&path).expect("file");
        let url = format!("file://{}", path.display());

        let mut state = state();
        let opened = call(&mut state, "open_document", json!({"url": url}));
        assert!(!is_error(&opened));
        let doc_id = structured(&opened, "doc_id").as_str().unwrap().to_string();

        let set = call(
            &mut state,
            "set_cell_value",
            json!({"doc_id": doc_id, "sheet_name": "Sheet1", "cell": "B2", "value": 42}),
        );
        assert!(!is_error(&set));

        let get = call(
            &mut state,
            "get_cell_value",
            json!({"doc_id": doc_id, "sheet_name": "Sheet1", "cell": "B2"}),
        );
        assert_eq!(structured(&get, "value"), &json!(42.0));
    }

    #[test]
    fn create_sheet_then_names_include_it() {
        let mut state = state();
        let created = call(&mut state, "new_document", json!({"doc_type": "spreadsheet"}));
        let doc_id = structured(&created, "doc_id").as_str().unwrap().to_string();

        let add = call(
            &mut state,
            "create_new_sheet",
            json!({"doc_id": doc_id, "sheet_name": "Data"}),
        );
        assert!(!is_error(&add));

        let names = call(&mut state, "get_sheet_names", json!({"doc_id": doc_id}));
        let sheets = structured(&names, "sheets").as_array().unwrap();
        assert!(sheets.contains(&json!("Data")));
        assert!(sheets.contains(&json!("Sheet1")));
    }

    #[test]
    fn closed_documents_are_not_found() {
        let mut state = state();
        let created = call(&mut state, "new_document", json!({"doc_type": "spreadsheet"}));
        let doc_id = structured(&created, "doc_id").as_str().unwrap().to_string();

        let closed = call(&mut state, "close_document", json!({"doc_id": doc_id}));
        assert!(!is_error(&closed));

        let get = call(
            &mut state,
            "get_cell_value",
            json!({"doc_id": doc_id, "sheet_name": "Sheet1", "cell": "A1"}),
        );
        assert!(is_error(&get));
        assert_eq!(error_kind(&get), errors::DOCUMENT_NOT_FOUND);
    }

    #[test]
    fn spreadsheet_tool_against_text_document_is_type_mismatch() {
        let mut state = state();
        let created = call(&mut state, "new_document", json!({"doc_type": "text"}));
        let doc_id = structured(&created, "doc_id").as_str().unwrap().to_string();

        let get = call(
            &mut state,
            "get_cell_value",
            json!({"doc_id": doc_id, "sheet_name": "Sheet1", "cell": "A1"}),
        );
        assert_eq!(error_kind(&get), errors::TYPE_MISMATCH);

        // And the other way around for a writer-only tool.
        let created = call(&mut state, "new_document", json!({"doc_type": "spreadsheet"}));
        let doc_id = structured(&created, "doc_id").as_str().unwrap().to_string();
        let text = call(&mut state, "get_text_content", json!({"doc_id": doc_id}));
        assert_eq!(error_kind(&text), errors::TYPE_MISMATCH);
    }

    #[test]
    fn unknown_tool_reports_unknown_tool() {
        let mut state = state();
        let result = call(&mut state, "explode_document", json!({"doc_id": "doc_0"}));
        assert!(is_error(&result));
        assert_eq!(error_kind(&result), errors::UNKNOWN_TOOL);
    }

    #[test]
    fn backend_failures_surface_as_external_operation_failed() {
        let mut state = state();
        let created = call(&mut state, "new_document", json!({"doc_type": "spreadsheet"}));
        let doc_id = structured(&created, "doc_id").as_str().unwrap().to_string();

        let get = call(
            &mut state,
            "get_cell_value",
            json!({"doc_id": doc_id, "sheet_name": "Missing", "cell": "A1"}),
        );
        assert_eq!(error_kind(&get), errors::EXTERNAL_OPERATION_FAILED);
        let source = get
            .get("structuredContent")
            .and_then(|v| v.get("error"))
            .and_then(|v| v.get("source"))
            .and_then(|v| v.as_str());
        assert_eq!(source, Some("get_cell_value"));
    }

    #[test]
    fn dispatcher_survives_failed_calls() {
        let mut state = state();
        let bad = call(&mut state, "get_sheet_names", json!({"doc_id": "doc_99"}));
        assert!(is_error(&bad));

        let created = call(&mut state, "new_document", json!({"doc_type": "spreadsheet"}));
        assert!(!is_error(&created));
    }
}
