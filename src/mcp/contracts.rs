use serde_json::json;

pub const TOOL_OPEN_DOCUMENT: &str = "open_document";
pub const TOOL_NEW_DOCUMENT: &str = "new_document";
pub const TOOL_CLOSE_DOCUMENT: &str = "close_document";
pub const TOOL_SAVE_DOCUMENT: &str = "save_document";
pub const TOOL_EXPORT_TO_PDF: &str = "export_to_pdf";
pub const TOOL_GET_DOCUMENT_PROPERTIES: &str = "get_document_properties";
pub const TOOL_SET_DOCUMENT_PROPERTIES: &str = "set_document_properties";
pub const TOOL_RUN_MACRO: &str = "run_macro";

pub const TOOL_GET_SHEET_NAMES: &str = "get_sheet_names";
pub const TOOL_GET_CELL_VALUE: &str = "get_cell_value";
pub const TOOL_SET_CELL_VALUE: &str = "set_cell_value";
pub const TOOL_SET_CELL_FORMULA: &str = "set_cell_formula";
pub const TOOL_CREATE_NEW_SHEET: &str = "create_new_sheet";
pub const TOOL_CREATE_CHART: &str = "create_chart";
pub const TOOL_APPLY_CONDITIONAL_FORMATTING: &str = "apply_conditional_formatting";
pub const TOOL_GROUP_RANGE: &str = "group_range";
pub const TOOL_SORT_RANGE: &str = "sort_range";
pub const TOOL_CALCULATE_STATISTICS: &str = "calculate_statistics";
pub const TOOL_FORMAT_TABLE: &str = "format_table";

pub const TOOL_GET_TEXT_CONTENT: &str = "get_text_content";
pub const TOOL_INSERT_TEXT: &str = "insert_text";
pub const TOOL_INSERT_TABLE: &str = "insert_table";
pub const TOOL_APPLY_STYLE: &str = "apply_style";
pub const TOOL_INSERT_IMAGE: &str = "insert_image";

pub const TOOL_INSERT_SLIDE: &str = "insert_slide";
pub const TOOL_ADD_SHAPE: &str = "add_shape";

pub const TOOL_LIST_TABLES: &str = "list_tables";
pub const TOOL_CREATE_TABLE: &str = "create_table";
pub const TOOL_DELETE_TABLE: &str = "delete_table";
pub const TOOL_INSERT_DATA: &str = "insert_data";
pub const TOOL_RUN_QUERY: &str = "run_query";

pub const DOC_TYPES: [&str; 5] = ["spreadsheet", "text", "presentation", "drawing", "database"];
pub const CHART_TYPES: [&str; 4] = ["column", "bar", "line", "pie"];
pub const SHAPE_TYPES: [&str; 4] = ["rectangle", "ellipse", "line", "text_box"];

pub fn open_document_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "url": { "type": "string" }
        },
        "required": ["url"],
        "additionalProperties": false
    })
}

pub fn new_document_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_type": { "type": "string", "enum": DOC_TYPES }
        },
        "required": ["doc_type"],
        "additionalProperties": false
    })
}

pub fn close_document_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" }
        },
        "required": ["doc_id"],
        "additionalProperties": false
    })
}

pub fn save_document_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "url": { "type": "string" },
            "filter_name": { "type": "string" }
        },
        "required": ["doc_id", "url"],
        "additionalProperties": false
    })
}

pub fn export_to_pdf_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "url": { "type": "string" }
        },
        "required": ["doc_id", "url"],
        "additionalProperties": false
    })
}

pub fn get_document_properties_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" }
        },
        "required": ["doc_id"],
        "additionalProperties": false
    })
}

pub fn set_document_properties_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "properties": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        },
        "required": ["doc_id", "properties"],
        "additionalProperties": false
    })
}

pub fn run_macro_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "macro_name": { "type": "string" },
            "args": { "type": "array" }
        },
        "required": ["doc_id", "macro_name"],
        "additionalProperties": false
    })
}

pub fn get_sheet_names_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" }
        },
        "required": ["doc_id"],
        "additionalProperties": false
    })
}

pub fn get_cell_value_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "cell": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "cell"],
        "additionalProperties": false
    })
}

pub fn set_cell_value_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "cell": { "type": "string" },
            "value": {}
        },
        "required": ["doc_id", "sheet_name", "cell", "value"],
        "additionalProperties": false
    })
}

pub fn set_cell_formula_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "cell": { "type": "string" },
            "formula": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "cell", "formula"],
        "additionalProperties": false
    })
}

pub fn create_new_sheet_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name"],
        "additionalProperties": false
    })
}

pub fn create_chart_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "data_range": { "type": "string" },
            "chart_type": { "type": "string", "enum": CHART_TYPES },
            "target_cell": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "data_range", "chart_type", "target_cell"],
        "additionalProperties": false
    })
}

pub fn apply_conditional_formatting_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "range_address": { "type": "string" },
            "condition": { "type": "string" },
            "style": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "range_address", "condition", "style"],
        "additionalProperties": false
    })
}

pub fn group_range_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "range_address": { "type": "string" },
            "by_rows": { "type": "boolean" }
        },
        "required": ["doc_id", "sheet_name", "range_address", "by_rows"],
        "additionalProperties": false
    })
}

pub fn sort_range_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "range_address": { "type": "string" },
            "sort_column": { "type": "integer", "minimum": 0 },
            "ascending": { "type": "boolean" }
        },
        "required": ["doc_id", "sheet_name", "range_address", "sort_column", "ascending"],
        "additionalProperties": false
    })
}

pub fn calculate_statistics_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "range_address": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "range_address"],
        "additionalProperties": false
    })
}

pub fn format_table_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sheet_name": { "type": "string" },
            "range_address": { "type": "string" },
            "border_width": { "type": "integer", "minimum": 0 },
            "background_color": { "type": "string" }
        },
        "required": ["doc_id", "sheet_name", "range_address", "border_width", "background_color"],
        "additionalProperties": false
    })
}

pub fn get_text_content_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" }
        },
        "required": ["doc_id"],
        "additionalProperties": false
    })
}

pub fn insert_text_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "position": { "type": "integer", "minimum": 0 },
            "text": { "type": "string" }
        },
        "required": ["doc_id", "position", "text"],
        "additionalProperties": false
    })
}

pub fn insert_table_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "position": { "type": "integer", "minimum": 0 },
            "rows": { "type": "integer", "minimum": 1 },
            "cols": { "type": "integer", "minimum": 1 }
        },
        "required": ["doc_id", "position", "rows", "cols"],
        "additionalProperties": false
    })
}

pub fn apply_style_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "range": {
                "type": "object",
                "properties": {
                    "start": { "type": "integer", "minimum": 0 },
                    "end": { "type": "integer", "minimum": 0 }
                },
                "required": ["start", "end"],
                "additionalProperties": false
            },
            "style_name": { "type": "string" }
        },
        "required": ["doc_id", "range", "style_name"],
        "additionalProperties": false
    })
}

pub fn insert_image_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "position": { "type": "integer", "minimum": 0 },
            "image_url": { "type": "string" }
        },
        "required": ["doc_id", "position", "image_url"],
        "additionalProperties": false
    })
}

pub fn insert_slide_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "position": { "type": "integer", "minimum": 0 }
        },
        "required": ["doc_id", "position"],
        "additionalProperties": false
    })
}

pub fn add_shape_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "page": { "type": "integer", "minimum": 1 },
            "shape_type": { "type": "string", "enum": SHAPE_TYPES },
            "position": {
                "type": "object",
                "properties": {
                    "x": { "type": "number" },
                    "y": { "type": "number" }
                },
                "required": ["x", "y"],
                "additionalProperties": false
            },
            "size": {
                "type": "object",
                "properties": {
                    "width": { "type": "number", "minimum": 0 },
                    "height": { "type": "number", "minimum": 0 }
                },
                "required": ["width", "height"],
                "additionalProperties": false
            }
        },
        "required": ["doc_id", "page", "shape_type", "position", "size"],
        "additionalProperties": false
    })
}

pub fn list_tables_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" }
        },
        "required": ["doc_id"],
        "additionalProperties": false
    })
}

pub fn create_table_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "table_name": { "type": "string" },
            "columns": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string" }
                    },
                    "required": ["name", "type"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["doc_id", "table_name", "columns"],
        "additionalProperties": false
    })
}

pub fn delete_table_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "table_name": { "type": "string" }
        },
        "required": ["doc_id", "table_name"],
        "additionalProperties": false
    })
}

pub fn insert_data_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "table_name": { "type": "string" },
            "row": {
                "type": "object",
                "additionalProperties": {
                    "type": ["string", "number", "boolean", "null"]
                }
            }
        },
        "required": ["doc_id", "table_name", "row"],
        "additionalProperties": false
    })
}

pub fn run_query_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "doc_id": { "type": "string" },
            "sql": { "type": "string" }
        },
        "required": ["doc_id", "sql"],
        "additionalProperties": false
    })
}
