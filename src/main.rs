use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

mod address;
mod backend;
mod mcp;
mod registry;
mod request;
mod tools;

use backend::MemoryBackend;
use tools::ServerState;

#[derive(Parser)]
#[command(name = "mcp-uno")]
#[command(
    version,
    about = "MCP server exposing office-document operations as tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Print the tool catalog as JSON
    Tools,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout is the protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server()
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Tools => print_tool_catalog(),
    }
}

fn print_tool_catalog() -> Result<()> {
    let catalog = json!({"tools": mcp::tool_definitions()});
    let output = serde_json::to_string_pretty(&catalog)?;
    println!("{output}");
    Ok(())
}

fn run_stdio_server() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    let mut state = ServerState::new(Box::new(MemoryBackend::new()));

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(_) => continue,
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&mut state, &request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            _ => None,
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    // Client went away: close whatever is still open so the external office
    // process is not left holding orphaned documents.
    for (doc_id, entry) in state.registry.drain() {
        if let Err(error) = state.backend.close(entry.handle) {
            tracing::warn!(%doc_id, %error, "failed to close document at shutdown");
        }
    }

    Ok(())
}

fn handle_tool_call(state: &mut ServerState, request: &serde_json::Value) -> serde_json::Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(
            mcp::errors::INVALID_ARGUMENT,
            "params must be an object",
            None,
        );
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_ARGUMENT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    tools::handle_call(state, name, &args)
}
