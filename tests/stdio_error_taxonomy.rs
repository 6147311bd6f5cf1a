use std::io::{BufRead, BufReader, Write};
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

fn call(
    stdin: &mut ChildStdin,
    stdout: &mut BufReader<ChildStdout>,
    id: u64,
    name: &str,
    args: serde_json::Value,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": args}
    });
    writeln!(stdin, "{}", serde_json::to_string(&request)?)?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;
    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    Ok(response.get("result").cloned().expect("result present"))
}

fn error_kind(result: &serde_json::Value) -> Option<&str> {
    result
        .get("structuredContent")
        .and_then(|v| v.get("error"))
        .and_then(|v| v.get("kind"))
        .and_then(|v| v.as_str())
}

#[test]
fn every_failure_comes_back_as_a_typed_payload() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-uno"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let unknown = call(
        &mut stdin,
        &mut stdout,
        1,
        "create_pivot_table",
        serde_json::json!({"doc_id": "doc_0"}),
    )?;
    assert_eq!(error_kind(&unknown), Some("unknown_tool"));

    let missing_arg = call(
        &mut stdin,
        &mut stdout,
        2,
        "open_document",
        serde_json::json!({}),
    )?;
    assert_eq!(error_kind(&missing_arg), Some("invalid_argument"));

    let not_found = call(
        &mut stdin,
        &mut stdout,
        3,
        "get_sheet_names",
        serde_json::json!({"doc_id": "doc_42"}),
    )?;
    assert_eq!(error_kind(&not_found), Some("document_not_found"));

    let created = call(
        &mut stdin,
        &mut stdout,
        4,
        "new_document",
        serde_json::json!({"doc_type": "text"}),
    )?;
    let text_id = created
        .get("structuredContent")
        .and_then(|v| v.get("doc_id"))
        .and_then(|v| v.as_str())
        .expect("doc_id present")
        .to_string();

    let mismatch = call(
        &mut stdin,
        &mut stdout,
        5,
        "set_cell_value",
        serde_json::json!({"doc_id": text_id, "sheet_name": "Sheet1", "cell": "A1", "value": 1}),
    )?;
    assert_eq!(error_kind(&mismatch), Some("type_mismatch"));

    let created = call(
        &mut stdin,
        &mut stdout,
        6,
        "new_document",
        serde_json::json!({"doc_type": "spreadsheet"}),
    )?;
    let sheet_id = created
        .get("structuredContent")
        .and_then(|v| v.get("doc_id"))
        .and_then(|v| v.as_str())
        .expect("doc_id present")
        .to_string();

    let bad_address = call(
        &mut stdin,
        &mut stdout,
        7,
        "get_cell_value",
        serde_json::json!({"doc_id": sheet_id, "sheet_name": "Sheet1", "cell": "1A"}),
    )?;
    assert_eq!(error_kind(&bad_address), Some("invalid_address"));

    let external = call(
        &mut stdin,
        &mut stdout,
        8,
        "get_cell_value",
        serde_json::json!({"doc_id": sheet_id, "sheet_name": "Nope", "cell": "A1"}),
    )?;
    assert_eq!(error_kind(&external), Some("external_operation_failed"));
    assert_eq!(
        external
            .get("structuredContent")
            .and_then(|v| v.get("error"))
            .and_then(|v| v.get("source"))
            .and_then(|v| v.as_str()),
        Some("get_cell_value")
    );

    // The loop stays usable after every failure above.
    let alive = call(
        &mut stdin,
        &mut stdout,
        9,
        "get_sheet_names",
        serde_json::json!({"doc_id": sheet_id}),
    )?;
    assert_eq!(alive.get("isError").and_then(|v| v.as_bool()), Some(false));

    let _ = child.kill();
    Ok(())
}
