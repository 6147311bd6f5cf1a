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
fn slides_and_shapes() -> Result<(), Box<dyn std::error::Error>> {
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
        serde_json::json!({"doc_type": "presentation"}),
    )?;
    let doc_id = created
        .get("structuredContent")
        .and_then(|v| v.get("doc_id"))
        .and_then(|v| v.as_str())
        .expect("doc_id present")
        .to_string();

    let slide = call(
        &mut stdin,
        &mut stdout,
        2,
        "insert_slide",
        serde_json::json!({"doc_id": doc_id, "position": 1}),
    )?;
    assert_eq!(slide.get("isError").and_then(|v| v.as_bool()), Some(false));

    let shape = call(
        &mut stdin,
        &mut stdout,
        3,
        "add_shape",
        serde_json::json!({
            "doc_id": doc_id,
            "page": 2,
            "shape_type": "ellipse",
            "position": {"x": 20.0, "y": 30.0},
            "size": {"width": 60.0, "height": 40.0}
        }),
    )?;
    assert_eq!(shape.get("isError").and_then(|v| v.as_bool()), Some(false));
    let text = shape
        .get("content")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .expect("text present");
    assert_eq!(text, "Added ellipse shape to page 2");

    // Pages are 1-based and must exist.
    let missing_page = call(
        &mut stdin,
        &mut stdout,
        4,
        "add_shape",
        serde_json::json!({
            "doc_id": doc_id,
            "page": 9,
            "shape_type": "rectangle",
            "position": {"x": 0.0, "y": 0.0},
            "size": {"width": 10.0, "height": 10.0}
        }),
    )?;
    assert_eq!(
        missing_page.get("isError").and_then(|v| v.as_bool()),
        Some(true)
    );

    // Slide and shape tools also work against drawing documents.
    let drawing = call(
        &mut stdin,
        &mut stdout,
        5,
        "new_document",
        serde_json::json!({"doc_type": "drawing"}),
    )?;
    let drawing_id = drawing
        .get("structuredContent")
        .and_then(|v| v.get("doc_id"))
        .and_then(|v| v.as_str())
        .expect("doc_id present")
        .to_string();
    let shape = call(
        &mut stdin,
        &mut stdout,
        6,
        "add_shape",
        serde_json::json!({
            "doc_id": drawing_id,
            "page": 1,
            "shape_type": "line",
            "position": {"x": 0.0, "y": 0.0},
            "size": {"width": 100.0, "height": 0.0}
        }),
    )?;
    assert_eq!(shape.get("isError").and_then(|v| v.as_bool()), Some(false));

    let _ = child.kill();
    Ok(())
}
