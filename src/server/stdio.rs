//! Standard-stream transport
//!
//! One JSON-RPC message (or batch) per input line; every outbound message is
//! written to stdout as one line. Stdout carries protocol bytes only.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::McpServer;
use crate::protocol::ServerInfo;
use crate::tools::SharedRegistry;
use crate::types::McpResult;

/// Serve MCP over this process's stdin/stdout until stdin closes
pub async fn run_stdio(server_info: ServerInfo, registry: SharedRegistry) -> McpResult<()> {
    serve_lines(
        server_info,
        registry,
        tokio::io::stdin(),
        tokio::io::stdout(),
    )
    .await
}

/// Serve MCP over any line-oriented reader/writer pair
pub async fn serve_lines<R, W>(
    server_info: ServerInfo,
    registry: SharedRegistry,
    reader: R,
    writer: W,
) -> McpResult<()>
where
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let writer_task = tokio::spawn(write_lines(rx, writer));

    let server = McpServer::new(server_info, registry, Arc::new(tx));
    info!("MCP server listening on stdio");

    // Raw bytes: a line that is not UTF-8 is a parse error, not an I/O error.
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }
        server.handle_line(trimmed).await;
    }

    info!("stdin closed, shutting down");
    // Dropping the core drops the last sender, which ends the writer.
    drop(server);
    match writer_task.await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "stdout writer task failed");
            Ok(())
        }
    }
}

async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<Value>, mut writer: W) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        let mut line = serde_json::to_string(&message)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        debug!(bytes = line.len(), "Wrote response line");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{PingTool, ToolRegistry};
    use serde_json::json;

    fn registry() -> SharedRegistry {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Box::new(PingTool::new())).unwrap();
        Arc::new(registry)
    }

    async fn run(input: &[u8]) -> Vec<Value> {
        let (mut out_reader, out_writer) = tokio::io::duplex(64 * 1024);

        serve_lines(ServerInfo::default(), registry(), input, out_writer)
            .await
            .unwrap();

        let mut output = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut out_reader, &mut output)
            .await
            .unwrap();
        output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_handshake_and_call_over_lines() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"ping"}}"#,
            "\n",
        );
        let out = run(input.as_bytes()).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["id"], json!(1));
        assert_eq!(out[1]["result"]["content"][0]["text"], json!("pong"));
    }

    #[tokio::test]
    async fn test_garbage_line_gets_parse_error() {
        let out = run(b"hello\n").await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["error"]["code"], json!(-32700));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_session_open() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.push(b'\n');

        let out = run(&input).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["error"]["code"], json!(-32700));
        assert_eq!(out[0]["id"], Value::Null);
        assert_eq!(out[1], json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
    }
}
