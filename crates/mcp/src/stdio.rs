//! Newline-delimited JSON-RPC over a byte stream pair.
//!
//! Each line is handled on its own task, so a slow tool call does not hold
//! up the ones behind it. Responses go through a single writer and may leave
//! in a different order than their requests arrived; clients correlate by `id`.

use crate::protocol::{JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

/// Serve `server` over `reader`/`writer` until `reader` reaches EOF.
///
/// Calls still in flight at EOF run to completion and their responses are
/// written before this returns.
pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // Split on raw bytes so a line that is not UTF-8 only fails that line
    let mut lines = FramedRead::new(reader, AnyDelimiterCodec::new(b"\n".to_vec(), Vec::new()));
    let mut sink = FramedWrite::new(writer, LinesCodec::new());

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            sink.send(line).await?;
        }
        Ok::<_, tokio_util::codec::LinesCodecError>(())
    });

    let mut in_flight = JoinSet::new();

    while let Some(frame) = lines.next().await {
        let frame = frame.context("Failed to read from input stream")?;
        let line = match std::str::from_utf8(&frame) {
            Ok(line) => line.trim_end_matches('\r').to_string(),
            Err(e) => {
                warn!(error = %e, "Input line is not valid UTF-8");
                send(
                    &tx,
                    JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error().with_data(e.to_string()),
                    ),
                );
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            if let Some(response) = server.handle_message(&line).await {
                send(&tx, response);
            }
        });

        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }
    }

    debug!(pending = in_flight.len(), "Input closed, draining in-flight requests");
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Request task failed");
        }
    }

    drop(tx);
    writer_task
        .await
        .context("Writer task panicked")?
        .context("Failed to write to output stream")?;

    info!("Stdio transport closed");
    Ok(())
}

fn send(tx: &mpsc::UnboundedSender<String>, response: JsonRpcResponse) {
    match serde_json::to_string(&response) {
        Ok(json) => {
            // Only fails once the writer has stopped; its error is reported by `serve`
            let _ = tx.send(json);
        }
        Err(e) => error!(error = %e, "Failed to serialize response"),
    }
}
