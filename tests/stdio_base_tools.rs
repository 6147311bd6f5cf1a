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

#[test]
fn table_lifecycle_and_queries() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-uno"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let created = call(
        &mut stdin,
        &mut stdout,
        1,
        "new_document",
        serde_json::json!({"doc_type": "database"}),
    )?;
    let doc_id = created
        .get("structuredContent")
        .and_then(|v| v.get("doc_id"))
        .and_then(|v| v.as_str())
        .expect("doc_id present")
        .to_string();

    let table = call(
        &mut stdin,
        &mut stdout,
        2,
        "create_table",
        serde_json::json!({
            "doc_id": doc_id,
            "table_name": "people",
            "columns": [
                {"name": "name", "type": "VARCHAR"},
                {"name": "age", "type": "INTEGER"}
            ]
        }),
    )?;
    assert_eq!(table.get("isError").and_then(|v| v.as_bool()), Some(false));

    let listed = call(
        &mut stdin,
        &mut stdout,
        3,
        "list_tables",
        serde_json::json!({"doc_id": doc_id}),
    )?;
    let tables = listed
        .get("structuredContent")
        .and_then(|v| v.get("tables"))
        .and_then(|v| v.as_array())
        .expect("tables present");
    assert_eq!(tables, &vec![serde_json::json!("people")]);

    let inserted = call(
        &mut stdin,
        &mut stdout,
        4,
        "insert_data",
        serde_json::json!({
            "doc_id": doc_id,
            "table_name": "people",
            "row": {"name": "ada", "age": 36}
        }),
    )?;
    assert_eq!(inserted.get("isError").and_then(|v| v.as_bool()), Some(false));

    let queried = call(
        &mut stdin,
        &mut stdout,
        5,
        "run_query",
        serde_json::json!({"doc_id": doc_id, "sql": "SELECT * FROM people"}),
    )?;
    let rows = queried
        .get("structuredContent")
        .and_then(|v| v.get("rows"))
        .and_then(|v| v.as_array())
        .expect("rows present");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("name").and_then(|v| v.as_str()),
        Some("ada")
    );

    let cleared = call(
        &mut stdin,
        &mut stdout,
        6,
        "run_query",
        serde_json::json!({"doc_id": doc_id, "sql": "DELETE FROM people"}),
    )?;
    let text = cleared
        .get("content")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .expect("text present");
    assert_eq!(text, "Affected 1 rows");

    let dropped = call(
        &mut stdin,
        &mut stdout,
        7,
        "delete_table",
        serde_json::json!({"doc_id": doc_id, "table_name": "people"}),
    )?;
    assert_eq!(dropped.get("isError").and_then(|v| v.as_bool()), Some(false));

    let missing = call(
        &mut stdin,
        &mut stdout,
        8,
        "delete_table",
        serde_json::json!({"doc_id": doc_id, "table_name": "people"}),
    )?;
    assert_eq!(missing.get("isError").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        missing
            .get("structuredContent")
            .and_then(|v| v.get("error"))
            .and_then(|v| v.get("kind"))
            .and_then(|v| v.as_str()),
        Some("external_operation_failed")
    );

    let _ = child.kill();
    Ok(())
}
