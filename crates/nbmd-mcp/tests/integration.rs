// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//!
//! End-to-end tests for the nbmd MCP server.
//!
//! Each test drives a real [`NbmdMcpServer`] over in-memory pipes, sending
//! raw JSON-RPC 2.0 messages and checking the wire format an MCP host sees.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use nbmd_core::{ipynb, Cell, Notebook, SerializeOptions};
use nbmd_mcp::{build_mcp_registry, NbmdMcpServer, SERVER_NAME};
use nbmd_tools::{Tool, ToolCall, ToolOutput, ToolRegistry};
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};

// ── Test tool fixture ─────────────────────────────────────────────────────────

/// Returns the `message` argument as a plain-text failure.
struct AlwaysFailTool;

#[async_trait]
impl Tool for AlwaysFailTool {
    fn name(&self) -> &str {
        "always_fail"
    }
    fn description(&self) -> &str {
        "Always returns an error"
    }
    fn parameters_schema(&self) -> Value {
        json!({ "type": "object" })
    }
    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        ToolOutput {
            call_id: call.id.clone(),
            content: "this tool always fails".into(),
            is_error: true,
        }
    }
}

// ── In-process MCP server harness ────────────────────────────────────────────

type Writer = WriteHalf<DuplexStream>;
type Reader = BufReader<ReadHalf<DuplexStream>>;

/// Starts an [`NbmdMcpServer`] in a background task connected to in-memory
/// pipes and returns the client's writer and buffered reader.
async fn start_test_server(registry: Arc<ToolRegistry>) -> (Writer, Reader) {
    let (client_stream, server_stream) = tokio::io::duplex(65536);

    tokio::spawn(async move {
        let server = NbmdMcpServer::new(registry);
        if let Ok(running) = server.serve(server_stream).await {
            let _ = running.waiting().await;
        }
    });

    let (client_read, client_write) = tokio::io::split(client_stream);
    (client_write, BufReader::new(client_read))
}

/// Write a JSON-RPC message as a single newline-terminated line.
async fn send_msg(writer: &mut Writer, msg: &Value) {
    let line = serde_json::to_string(msg).expect("message must serialize");
    writer.write_all(line.as_bytes()).await.expect("write failed");
    writer.write_all(b"\n").await.expect("newline write failed");
    writer.flush().await.expect("flush failed");
}

/// Read one JSON-RPC response line from the server.  Times out after 5 s.
async fn recv_msg(reader: &mut Reader) -> Value {
    let mut line = String::new();
    tokio::time::timeout(std::time::Duration::from_secs(5), reader.read_line(&mut line))
        .await
        .expect("timed out waiting for server response")
        .expect("read error");
    serde_json::from_str(line.trim()).expect("server response must be valid JSON")
}

/// Perform the `initialize` handshake and return the `initialize` result.
async fn initialize(writer: &mut Writer, reader: &mut Reader) -> Value {
    send_msg(
        writer,
        &json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "nbmd-test-client", "version": "0.0.0" }
            }
        }),
    )
    .await;

    let init_resp = recv_msg(reader).await;
    assert_eq!(init_resp["jsonrpc"], "2.0");
    assert!(init_resp["result"].is_object(), "initialize must return a result object");

    send_msg(
        writer,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;

    init_resp["result"].clone()
}

async fn connect(registry: ToolRegistry) -> (Writer, Reader) {
    let (mut writer, mut reader) = start_test_server(Arc::new(registry)).await;
    initialize(&mut writer, &mut reader).await;
    (writer, reader)
}

async fn call_tool(
    writer: &mut Writer,
    reader: &mut Reader,
    id: u64,
    name: &str,
    arguments: Value,
) -> Value {
    send_msg(
        writer,
        &json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await;
    recv_msg(reader).await
}

/// Decode the single text content item of a `tools/call` response.
fn payload(resp: &Value) -> Value {
    let content = resp["result"]["content"]
        .as_array()
        .expect("content must be an array");
    assert_eq!(content.len(), 1, "expected one content item; got {resp}");
    let text = content[0]["text"].as_str().expect("text content");
    serde_json::from_str(text).expect("tool result must be JSON")
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_declares_tools_capability() {
    let (mut writer, mut reader) =
        start_test_server(Arc::new(build_mcp_registry(SerializeOptions::default(), None))).await;
    let result = initialize(&mut writer, &mut reader).await;
    assert!(
        result["capabilities"]["tools"].is_object(),
        "server must advertise tools capability; got: {result}"
    );
}

#[tokio::test]
async fn initialize_reports_server_identity() {
    let (mut writer, mut reader) =
        start_test_server(Arc::new(build_mcp_registry(SerializeOptions::default(), None))).await;
    let result = initialize(&mut writer, &mut reader).await;
    assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(
        result["instructions"].as_str().is_some_and(|s| s.contains("convert_markdown")),
        "instructions must describe the tools; got: {result}"
    );
}

#[tokio::test]
async fn tools_list_advertises_both_conversions() {
    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;

    send_msg(
        &mut writer,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {} }),
    )
    .await;
    let resp = recv_msg(&mut reader).await;
    let tools = resp["result"]["tools"].as_array().expect("tools array");

    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["convert_markdown", "convert_notebook"]);
    for tool in tools {
        let schema = &tool["inputSchema"];
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["source_path", "output_dir"]));
        assert!(schema["properties"]["source_path"].is_object());
        assert!(schema["properties"]["output_dir"].is_object());
    }
}

#[tokio::test]
async fn filtered_registry_limits_exposed_tools() {
    let (mut writer, mut reader) =
        connect(build_mcp_registry(SerializeOptions::default(), Some("convert_markdown"))).await;

    send_msg(
        &mut writer,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {} }),
    )
    .await;
    let resp = recv_msg(&mut reader).await;
    let tools = resp["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "convert_markdown");
}

#[tokio::test]
async fn convert_notebook_writes_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("lesson.ipynb");
    let nb = Notebook::new(vec![
        Cell::markdown("# Lesson"),
        Cell::markdown("Read carefully."),
        Cell::code("answer = 42"),
    ]);
    std::fs::write(&source, ipynb::to_ipynb_string(&nb).unwrap()).unwrap();
    let out_dir = dir.path().join("out");

    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;
    let resp = call_tool(
        &mut writer,
        &mut reader,
        2,
        "convert_notebook",
        json!({ "source_path": path_str(&source), "output_dir": path_str(&out_dir) }),
    )
    .await;

    assert_eq!(resp["result"]["isError"], false, "{resp}");
    let result = payload(&resp);
    assert_eq!(result["status"], "success");
    assert_eq!(result["output_path"], path_str(&out_dir.join("lesson.md")));
    assert_eq!(result["cell_counts"], json!({"markdown": 2, "code": 1, "raw": 0}));
    assert_eq!(result["total_cells"], 3);
    assert!(result.get("message").is_none());

    let md = std::fs::read_to_string(out_dir.join("lesson.md")).unwrap();
    assert_eq!(
        md,
        "# Lesson\n\n<!-- NOTEBOOK_CELL_BOUNDARY -->\n\nRead carefully.\n\n```python\nanswer = 42\n```"
    );
}

#[tokio::test]
async fn convert_markdown_writes_notebook() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("guide.md");
    std::fs::write(&source, "Intro\n\n```python\nprint(1)\n```\n").unwrap();

    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;
    let resp = call_tool(
        &mut writer,
        &mut reader,
        3,
        "convert_markdown",
        json!({ "source_path": path_str(&source), "output_dir": path_str(dir.path()) }),
    )
    .await;

    assert_eq!(resp["result"]["isError"], false, "{resp}");
    let result = payload(&resp);
    assert_eq!(result["total_cells"], 2);

    let json = std::fs::read_to_string(dir.path().join("guide.ipynb")).unwrap();
    let back = ipynb::parse_ipynb(&json).unwrap();
    assert_eq!(back.cells, vec![Cell::markdown("Intro"), Cell::code("print(1)")]);
}

#[tokio::test]
async fn missing_arguments_return_error_result() {
    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;
    let resp = call_tool(
        &mut writer,
        &mut reader,
        4,
        "convert_markdown",
        json!({ "source_path": "only.md" }),
    )
    .await;

    assert_eq!(resp["result"]["isError"], true, "{resp}");
    let result = payload(&resp);
    assert_eq!(
        result,
        json!({
            "status": "error",
            "message": "Error occurred during tool execution: source_path and output_dir are required arguments."
        })
    );
}

#[tokio::test]
async fn missing_source_file_returns_error_result() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("ghost.ipynb");

    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;
    let resp = call_tool(
        &mut writer,
        &mut reader,
        5,
        "convert_notebook",
        json!({ "source_path": path_str(&source), "output_dir": path_str(dir.path()) }),
    )
    .await;

    assert_eq!(resp["result"]["isError"], true);
    let result = payload(&resp);
    assert_eq!(result["status"], "error");
    assert!(
        result["message"].as_str().unwrap().starts_with("Source file not found"),
        "{result}"
    );
}

#[tokio::test]
async fn unknown_tool_returns_error_result() {
    let (mut writer, mut reader) = connect(build_mcp_registry(SerializeOptions::default(), None)).await;
    let resp = call_tool(&mut writer, &mut reader, 6, "summarise", json!({})).await;

    assert_eq!(resp["result"]["isError"], true, "{resp}");
    assert_eq!(
        payload(&resp)["message"],
        "Error occurred during tool execution: Unknown tool name: summarise"
    );
}

#[tokio::test]
async fn plain_text_tool_errors_are_forwarded() {
    let mut reg = ToolRegistry::new();
    reg.register(AlwaysFailTool);
    let (mut writer, mut reader) = connect(reg).await;

    let resp = call_tool(&mut writer, &mut reader, 7, "always_fail", json!({})).await;
    assert_eq!(resp["result"]["isError"], true);
    assert_eq!(resp["result"]["content"][0]["text"], "this tool always fails");
}
