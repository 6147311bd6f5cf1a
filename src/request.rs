use crate::address::{CellAddress, CellRange};
use crate::backend::{CellValue, ChartKind, DocKind, ShapeKind};
use crate::mcp::{contracts, errors};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Boundary validation failure: an error kind from [`errors`] plus a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub kind: &'static str,
    pub message: String,
}

impl RequestError {
    fn unknown_tool(name: &str) -> Self {
        Self {
            kind: errors::UNKNOWN_TOOL,
            message: format!("unknown tool: {name}"),
        }
    }

    fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: errors::INVALID_ARGUMENT,
            message: message.into(),
        }
    }

    fn invalid_address(message: impl Into<String>) -> Self {
        Self {
            kind: errors::INVALID_ADDRESS,
            message: message.into(),
        }
    }
}

/// One variant per tool, with every argument already validated and parsed
/// into its domain type. Handlers never see raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    OpenDocument {
        url: String,
    },
    NewDocument {
        kind: DocKind,
    },
    CloseDocument {
        doc_id: String,
    },
    SaveDocument {
        doc_id: String,
        url: String,
        filter_name: Option<String>,
    },
    ExportToPdf {
        doc_id: String,
        url: String,
    },
    GetDocumentProperties {
        doc_id: String,
    },
    SetDocumentProperties {
        doc_id: String,
        properties: BTreeMap<String, String>,
    },
    RunMacro {
        doc_id: String,
        macro_name: String,
        args: Vec<Value>,
    },
    GetSheetNames {
        doc_id: String,
    },
    GetCellValue {
        doc_id: String,
        sheet_name: String,
        cell: CellAddress,
    },
    SetCellValue {
        doc_id: String,
        sheet_name: String,
        cell: CellAddress,
        value: CellValue,
    },
    SetCellFormula {
        doc_id: String,
        sheet_name: String,
        cell: CellAddress,
        formula: String,
    },
    CreateNewSheet {
        doc_id: String,
        sheet_name: String,
    },
    CreateChart {
        doc_id: String,
        sheet_name: String,
        data_range: CellRange,
        chart_kind: ChartKind,
        target_cell: CellAddress,
    },
    ApplyConditionalFormatting {
        doc_id: String,
        sheet_name: String,
        range: CellRange,
        condition: String,
        style: String,
    },
    GroupRange {
        doc_id: String,
        sheet_name: String,
        range: CellRange,
        by_rows: bool,
    },
    SortRange {
        doc_id: String,
        sheet_name: String,
        range: CellRange,
        sort_column: u32,
        ascending: bool,
    },
    CalculateStatistics {
        doc_id: String,
        sheet_name: String,
        range: CellRange,
    },
    FormatTable {
        doc_id: String,
        sheet_name: String,
        range: CellRange,
        border_width: u32,
        background_color: String,
    },
    GetTextContent {
        doc_id: String,
    },
    InsertText {
        doc_id: String,
        position: u64,
        text: String,
    },
    InsertTable {
        doc_id: String,
        position: u64,
        rows: u32,
        cols: u32,
    },
    ApplyStyle {
        doc_id: String,
        start: u64,
        end: u64,
        style_name: String,
    },
    InsertImage {
        doc_id: String,
        position: u64,
        image_url: String,
    },
    InsertSlide {
        doc_id: String,
        position: u64,
    },
    AddShape {
        doc_id: String,
        page: u64,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    ListTables {
        doc_id: String,
    },
    CreateTable {
        doc_id: String,
        table_name: String,
        columns: Vec<(String, String)>,
    },
    DeleteTable {
        doc_id: String,
        table_name: String,
    },
    InsertData {
        doc_id: String,
        table_name: String,
        row: BTreeMap<String, Value>,
    },
    RunQuery {
        doc_id: String,
        sql: String,
    },
}

impl ToolRequest {
    /// Validate a raw tool call once at the boundary. Everything after this
    /// point operates on typed values.
    pub fn parse(name: &str, args: &Value) -> Result<Self, RequestError> {
        let args = object(args)?;
        match name {
            contracts::TOOL_OPEN_DOCUMENT => Ok(ToolRequest::OpenDocument {
                url: nonempty_str(args, "url")?,
            }),
            contracts::TOOL_NEW_DOCUMENT => {
                let doc_type = nonempty_str(args, "doc_type")?;
                let kind = DocKind::parse(&doc_type).ok_or_else(|| {
                    RequestError::invalid_argument(format!(
                        "doc_type must be one of: {}",
                        contracts::DOC_TYPES.join(", ")
                    ))
                })?;
                Ok(ToolRequest::NewDocument { kind })
            }
            contracts::TOOL_CLOSE_DOCUMENT => Ok(ToolRequest::CloseDocument {
                doc_id: nonempty_str(args, "doc_id")?,
            }),
            contracts::TOOL_SAVE_DOCUMENT => Ok(ToolRequest::SaveDocument {
                doc_id: nonempty_str(args, "doc_id")?,
                url: nonempty_str(args, "url")?,
                filter_name: optional_nonempty_str(args, "filter_name")?,
            }),
            contracts::TOOL_EXPORT_TO_PDF => Ok(ToolRequest::ExportToPdf {
                doc_id: nonempty_str(args, "doc_id")?,
                url: nonempty_str(args, "url")?,
            }),
            contracts::TOOL_GET_DOCUMENT_PROPERTIES => Ok(ToolRequest::GetDocumentProperties {
                doc_id: nonempty_str(args, "doc_id")?,
            }),
            contracts::TOOL_SET_DOCUMENT_PROPERTIES => Ok(ToolRequest::SetDocumentProperties {
                doc_id: nonempty_str(args, "doc_id")?,
                properties: string_map(args, "properties")?,
            }),
            contracts::TOOL_RUN_MACRO => Ok(ToolRequest::RunMacro {
                doc_id: nonempty_str(args, "doc_id")?,
                macro_name: nonempty_str(args, "macro_name")?,
                args: optional_array(args, "args")?,
            }),
            contracts::TOOL_GET_SHEET_NAMES => Ok(ToolRequest::GetSheetNames {
                doc_id: nonempty_str(args, "doc_id")?,
            }),
            contracts::TOOL_GET_CELL_VALUE => Ok(ToolRequest::GetCellValue {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                cell: cell(args, "cell")?,
            }),
            contracts::TOOL_SET_CELL_VALUE => {
                let value = require(args, "value")?;
                let value = CellValue::from_json(value).ok_or_else(|| {
                    RequestError::invalid_argument("value must be a scalar (string, number, boolean, or null)")
                })?;
                Ok(ToolRequest::SetCellValue {
                    doc_id: nonempty_str(args, "doc_id")?,
                    sheet_name: nonempty_str(args, "sheet_name")?,
                    cell: cell(args, "cell")?,
                    value,
                })
            }
            contracts::TOOL_SET_CELL_FORMULA => Ok(ToolRequest::SetCellFormula {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                cell: cell(args, "cell")?,
                formula: nonempty_str(args, "formula")?,
            }),
            contracts::TOOL_CREATE_NEW_SHEET => Ok(ToolRequest::CreateNewSheet {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
            }),
            contracts::TOOL_CREATE_CHART => {
                let chart_type = nonempty_str(args, "chart_type")?;
                let chart_kind = ChartKind::parse(&chart_type).ok_or_else(|| {
                    RequestError::invalid_argument(format!(
                        "chart_type must be one of: {}",
                        contracts::CHART_TYPES.join(", ")
                    ))
                })?;
                Ok(ToolRequest::CreateChart {
                    doc_id: nonempty_str(args, "doc_id")?,
                    sheet_name: nonempty_str(args, "sheet_name")?,
                    data_range: range(args, "data_range")?,
                    chart_kind,
                    target_cell: cell(args, "target_cell")?,
                })
            }
            contracts::TOOL_APPLY_CONDITIONAL_FORMATTING => {
                Ok(ToolRequest::ApplyConditionalFormatting {
                    doc_id: nonempty_str(args, "doc_id")?,
                    sheet_name: nonempty_str(args, "sheet_name")?,
                    range: range(args, "range_address")?,
                    condition: nonempty_str(args, "condition")?,
                    style: nonempty_str(args, "style")?,
                })
            }
            contracts::TOOL_GROUP_RANGE => Ok(ToolRequest::GroupRange {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                range: range(args, "range_address")?,
                by_rows: require_bool(args, "by_rows")?,
            }),
            contracts::TOOL_SORT_RANGE => Ok(ToolRequest::SortRange {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                range: range(args, "range_address")?,
                sort_column: require_u32(args, "sort_column")?,
                ascending: require_bool(args, "ascending")?,
            }),
            contracts::TOOL_CALCULATE_STATISTICS => Ok(ToolRequest::CalculateStatistics {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                range: range(args, "range_address")?,
            }),
            contracts::TOOL_FORMAT_TABLE => Ok(ToolRequest::FormatTable {
                doc_id: nonempty_str(args, "doc_id")?,
                sheet_name: nonempty_str(args, "sheet_name")?,
                range: range(args, "range_address")?,
                border_width: require_u32(args, "border_width")?,
                background_color: nonempty_str(args, "background_color")?,
            }),
            contracts::TOOL_GET_TEXT_CONTENT => Ok(ToolRequest::GetTextContent {
                doc_id: nonempty_str(args, "doc_id")?,
            }),
            contracts::TOOL_INSERT_TEXT => Ok(ToolRequest::InsertText {
                doc_id: nonempty_str(args, "doc_id")?,
                position: require_u64(args, "position")?,
                text: require_str(args, "text")?,
            }),
            contracts::TOOL_INSERT_TABLE => Ok(ToolRequest::InsertTable {
                doc_id: nonempty_str(args, "doc_id")?,
                position: require_u64(args, "position")?,
                rows: require_positive_u32(args, "rows")?,
                cols: require_positive_u32(args, "cols")?,
            }),
            contracts::TOOL_APPLY_STYLE => {
                let span = require_object(args, "range")?;
                let start = require_u64(span, "start")?;
                let end = require_u64(span, "end")?;
                if start > end {
                    return Err(RequestError::invalid_argument(
                        "range start must not exceed range end",
                    ));
                }
                Ok(ToolRequest::ApplyStyle {
                    doc_id: nonempty_str(args, "doc_id")?,
                    start,
                    end,
                    style_name: nonempty_str(args, "style_name")?,
                })
            }
            contracts::TOOL_INSERT_IMAGE => Ok(ToolRequest::InsertImage {
                doc_id: nonempty_str(args, "doc_id")?,
                position: require_u64(args, "position")?,
                image_url: nonempty_str(args, "image_url")?,
            }),
            contracts::TOOL_INSERT_SLIDE => Ok(ToolRequest::InsertSlide {
                doc_id: nonempty_str(args, "doc_id")?,
                position: require_u64(args, "position")?,
            }),
            contracts::TOOL_ADD_SHAPE => {
                let shape_type = nonempty_str(args, "shape_type")?;
                let shape = ShapeKind::parse(&shape_type).ok_or_else(|| {
                    RequestError::invalid_argument(format!(
                        "shape_type must be one of: {}",
                        contracts::SHAPE_TYPES.join(", ")
                    ))
                })?;
                let position = require_object(args, "position")?;
                let size = require_object(args, "size")?;
                let width = require_f64(size, "width")?;
                let height = require_f64(size, "height")?;
                if width < 0.0 || height < 0.0 {
                    return Err(RequestError::invalid_argument(
                        "size width and height must be non-negative",
                    ));
                }
                Ok(ToolRequest::AddShape {
                    doc_id: nonempty_str(args, "doc_id")?,
                    page: require_positive_u64(args, "page")?,
                    shape,
                    x: require_f64(position, "x")?,
                    y: require_f64(position, "y")?,
                    width,
                    height,
                })
            }
            contracts::TOOL_LIST_TABLES => Ok(ToolRequest::ListTables {
                doc_id: nonempty_str(args, "doc_id")?,
            }),
            contracts::TOOL_CREATE_TABLE => Ok(ToolRequest::CreateTable {
                doc_id: nonempty_str(args, "doc_id")?,
                table_name: nonempty_str(args, "table_name")?,
                columns: columns(args, "columns")?,
            }),
            contracts::TOOL_DELETE_TABLE => Ok(ToolRequest::DeleteTable {
                doc_id: nonempty_str(args, "doc_id")?,
                table_name: nonempty_str(args, "table_name")?,
            }),
            contracts::TOOL_INSERT_DATA => Ok(ToolRequest::InsertData {
                doc_id: nonempty_str(args, "doc_id")?,
                table_name: nonempty_str(args, "table_name")?,
                row: scalar_map(args, "row")?,
            }),
            contracts::TOOL_RUN_QUERY => Ok(ToolRequest::RunQuery {
                doc_id: nonempty_str(args, "doc_id")?,
                sql: nonempty_str(args, "sql")?,
            }),
            _ => Err(RequestError::unknown_tool(name)),
        }
    }
}

fn object(args: &Value) -> Result<&Map<String, Value>, RequestError> {
    args.as_object()
        .ok_or_else(|| RequestError::invalid_argument("arguments must be an object"))
}

fn require<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a Value, RequestError> {
    args.get(key)
        .ok_or_else(|| RequestError::invalid_argument(format!("missing required argument '{key}'")))
}

fn require_str(args: &Map<String, Value>, key: &str) -> Result<String, RequestError> {
    require(args, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be a string")))
}

fn nonempty_str(args: &Map<String, Value>, key: &str) -> Result<String, RequestError> {
    let value = require_str(args, key)?;
    if value.trim().is_empty() {
        return Err(RequestError::invalid_argument(format!(
            "'{key}' must not be empty"
        )));
    }
    Ok(value)
}

fn optional_nonempty_str(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, RequestError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => nonempty_str(args, key).map(Some),
    }
}

fn require_u64(args: &Map<String, Value>, key: &str) -> Result<u64, RequestError> {
    require(args, key)?.as_u64().ok_or_else(|| {
        RequestError::invalid_argument(format!("'{key}' must be a non-negative integer"))
    })
}

fn require_positive_u64(args: &Map<String, Value>, key: &str) -> Result<u64, RequestError> {
    let value = require_u64(args, key)?;
    if value == 0 {
        return Err(RequestError::invalid_argument(format!(
            "'{key}' must be a positive integer"
        )));
    }
    Ok(value)
}

fn require_u32(args: &Map<String, Value>, key: &str) -> Result<u32, RequestError> {
    let value = require_u64(args, key)?;
    u32::try_from(value)
        .map_err(|_| RequestError::invalid_argument(format!("'{key}' is out of range")))
}

fn require_positive_u32(args: &Map<String, Value>, key: &str) -> Result<u32, RequestError> {
    let value = require_u32(args, key)?;
    if value == 0 {
        return Err(RequestError::invalid_argument(format!(
            "'{key}' must be a positive integer"
        )));
    }
    Ok(value)
}

fn require_bool(args: &Map<String, Value>, key: &str) -> Result<bool, RequestError> {
    require(args, key)?
        .as_bool()
        .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be a boolean")))
}

fn require_f64(args: &Map<String, Value>, key: &str) -> Result<f64, RequestError> {
    require(args, key)?
        .as_f64()
        .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be a number")))
}

fn require_object<'a>(
    args: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Map<String, Value>, RequestError> {
    require(args, key)?
        .as_object()
        .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be an object")))
}

fn optional_array(args: &Map<String, Value>, key: &str) -> Result<Vec<Value>, RequestError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => value
            .as_array()
            .cloned()
            .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be an array"))),
    }
}

fn cell(args: &Map<String, Value>, key: &str) -> Result<CellAddress, RequestError> {
    let text = nonempty_str(args, key)?;
    CellAddress::parse(&text).map_err(|err| RequestError::invalid_address(err.to_string()))
}

fn range(args: &Map<String, Value>, key: &str) -> Result<CellRange, RequestError> {
    let text = nonempty_str(args, key)?;
    CellRange::parse(&text).map_err(|err| RequestError::invalid_address(err.to_string()))
}

fn string_map(
    args: &Map<String, Value>,
    key: &str,
) -> Result<BTreeMap<String, String>, RequestError> {
    let object = require_object(args, key)?;
    let mut map = BTreeMap::new();
    for (name, value) in object {
        let Some(value) = value.as_str() else {
            return Err(RequestError::invalid_argument(format!(
                "'{key}.{name}' must be a string"
            )));
        };
        map.insert(name.clone(), value.to_string());
    }
    Ok(map)
}

fn scalar_map(args: &Map<String, Value>, key: &str) -> Result<BTreeMap<String, Value>, RequestError> {
    let object = require_object(args, key)?;
    let mut map = BTreeMap::new();
    for (name, value) in object {
        if value.is_array() || value.is_object() {
            return Err(RequestError::invalid_argument(format!(
                "'{key}.{name}' must be a scalar"
            )));
        }
        map.insert(name.clone(), value.clone());
    }
    Ok(map)
}

fn columns(args: &Map<String, Value>, key: &str) -> Result<Vec<(String, String)>, RequestError> {
    let items = require(args, key)?
        .as_array()
        .ok_or_else(|| RequestError::invalid_argument(format!("'{key}' must be an array")))?;
    if items.is_empty() {
        return Err(RequestError::invalid_argument(format!(
            "'{key}' must not be empty"
        )));
    }
    let mut columns = Vec::with_capacity(items.len());
    for item in items {
        let item = item.as_object().ok_or_else(|| {
            RequestError::invalid_argument(format!("'{key}' entries must be objects"))
        })?;
        columns.push((nonempty_str(item, "name")?, nonempty_str(item, "type")?));
    }
    Ok(columns)
}
