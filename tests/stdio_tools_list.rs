use std::collections::HashSet;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

#[test]
fn tools_list_includes_expected_tools() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-uno"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    });
    let serialized = serde_json::to_string(&request)?;
    writeln!(stdin, "{serialized}")?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;

    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    let tools = response
        .get("result")
        .and_then(|value| value.get("tools"))
        .and_then(|value| value.as_array())
        .expect("tools array present");

    let names: HashSet<&str> = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|value| value.as_str()))
        .collect();

    let expected: HashSet<&str> = [
        "open_document",
        "new_document",
        "close_document",
        "save_document",
        "export_to_pdf",
        "get_document_properties",
        "set_document_properties",
        "run_macro",
        "get_sheet_names",
        "get_cell_value",
        "set_cell_value",
        "set_cell_formula",
        "create_new_sheet",
        "create_chart",
        "apply_conditional_formatting",
        "group_range",
        "sort_range",
        "calculate_statistics",
        "format_table",
        "get_text_content",
        "insert_text",
        "insert_table",
        "apply_style",
        "insert_image",
        "insert_slide",
        "add_shape",
        "list_tables",
        "create_table",
        "delete_table",
        "insert_data",
        "run_query",
    ]
    .into_iter()
    .collect();

    assert_eq!(names, expected);

    for tool in tools {
        assert!(tool.get("description").is_some());
        assert!(tool.get("inputSchema").is_some());
    }

    let _ = child.kill();
    Ok(())
}
