use std::process::Command;

#[test]
fn cli_tools_outputs_catalog_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_mcp-uno"))
        .args(["tools"])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let tools = value
        .get("tools")
        .and_then(|v| v.as_array())
        .expect("tools array present");
    assert_eq!(tools.len(), 31);

    let names: Vec<&str> = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|v| v.as_str()))
        .collect();
    assert!(names.contains(&"open_document"));
    assert!(names.contains(&"run_query"));
    Ok(())
}
