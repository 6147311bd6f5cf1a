use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_OPEN_DOCUMENT,
            "description": "Open an existing office document by path or file:// URL.",
            "inputSchema": contracts::open_document_schema()
        }),
        json!({
            "name": contracts::TOOL_NEW_DOCUMENT,
            "description": "Create a new empty document of the given type.",
            "inputSchema": contracts::new_document_schema()
        }),
        json!({
            "name": contracts::TOOL_CLOSE_DOCUMENT,
            "description": "Close an open document and forget its id.",
            "inputSchema": contracts::close_document_schema()
        }),
        json!({
            "name": contracts::TOOL_SAVE_DOCUMENT,
            "description": "Save an open document to a URL, optionally through a named filter.",
            "inputSchema": contracts::save_document_schema()
        }),
        json!({
            "name": contracts::TOOL_EXPORT_TO_PDF,
            "description": "Export an open document as PDF.",
            "inputSchema": contracts::export_to_pdf_schema()
        }),
        json!({
            "name": contracts::TOOL_GET_DOCUMENT_PROPERTIES,
            "description": "Read document metadata properties.",
            "inputSchema": contracts::get_document_properties_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_DOCUMENT_PROPERTIES,
            "description": "Set document metadata properties.",
            "inputSchema": contracts::set_document_properties_schema()
        }),
        json!({
            "name": contracts::TOOL_RUN_MACRO,
            "description": "Run a named macro in an open document.",
            "inputSchema": contracts::run_macro_schema()
        }),
        json!({
            "name": contracts::TOOL_GET_SHEET_NAMES,
            "description": "List the sheet names of a spreadsheet document.",
            "inputSchema": contracts::get_sheet_names_schema()
        }),
        json!({
            "name": contracts::TOOL_GET_CELL_VALUE,
            "description": "Read the value of one spreadsheet cell.",
            "inputSchema": contracts::get_cell_value_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_CELL_VALUE,
            "description": "Write a value into one spreadsheet cell.",
            "inputSchema": contracts::set_cell_value_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_CELL_FORMULA,
            "description": "Write a formula into one spreadsheet cell.",
            "inputSchema": contracts::set_cell_formula_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_NEW_SHEET,
            "description": "Append a new sheet to a spreadsheet document.",
            "inputSchema": contracts::create_new_sheet_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_CHART,
            "description": "Insert a chart over a data range.",
            "inputSchema": contracts::create_chart_schema()
        }),
        json!({
            "name": contracts::TOOL_APPLY_CONDITIONAL_FORMATTING,
            "description": "Attach a conditional format to a cell range.",
            "inputSchema": contracts::apply_conditional_formatting_schema()
        }),
        json!({
            "name": contracts::TOOL_GROUP_RANGE,
            "description": "Group a cell range by rows or columns.",
            "inputSchema": contracts::group_range_schema()
        }),
        json!({
            "name": contracts::TOOL_SORT_RANGE,
            "description": "Sort a cell range by one of its columns.",
            "inputSchema": contracts::sort_range_schema()
        }),
        json!({
            "name": contracts::TOOL_CALCULATE_STATISTICS,
            "description": "Compute sum and average over the numeric cells of a range.",
            "inputSchema": contracts::calculate_statistics_schema()
        }),
        json!({
            "name": contracts::TOOL_FORMAT_TABLE,
            "description": "Format a cell range with borders and a background color.",
            "inputSchema": contracts::format_table_schema()
        }),
        json!({
            "name": contracts::TOOL_GET_TEXT_CONTENT,
            "description": "Read the plain text content of a text document.",
            "inputSchema": contracts::get_text_content_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_TEXT,
            "description": "Insert text at a character position in a text document.",
            "inputSchema": contracts::insert_text_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_TABLE,
            "description": "Insert a table at a character position in a text document.",
            "inputSchema": contracts::insert_table_schema()
        }),
        json!({
            "name": contracts::TOOL_APPLY_STYLE,
            "description": "Apply a named style to a character range of a text document.",
            "inputSchema": contracts::apply_style_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_IMAGE,
            "description": "Insert an image at a character position in a text document.",
            "inputSchema": contracts::insert_image_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_SLIDE,
            "description": "Insert a blank slide into a presentation or drawing.",
            "inputSchema": contracts::insert_slide_schema()
        }),
        json!({
            "name": contracts::TOOL_ADD_SHAPE,
            "description": "Add a shape to a page of a presentation or drawing.",
            "inputSchema": contracts::add_shape_schema()
        }),
        json!({
            "name": contracts::TOOL_LIST_TABLES,
            "description": "List the tables of a database document.",
            "inputSchema": contracts::list_tables_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_TABLE,
            "description": "Create a table in a database document.",
            "inputSchema": contracts::create_table_schema()
        }),
        json!({
            "name": contracts::TOOL_DELETE_TABLE,
            "description": "Delete a table from a database document.",
            "inputSchema": contracts::delete_table_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_DATA,
            "description": "Insert one row of data into a database table.",
            "inputSchema": contracts::insert_data_schema()
        }),
        json!({
            "name": contracts::TOOL_RUN_QUERY,
            "description": "Execute SQL against a database document.",
            "inputSchema": contracts::run_query_schema()
        }),
    ]
}
