use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::ServerError;
use crate::dispatcher::Dispatcher;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Serves newline-delimited JSON-RPC on the process's stdin/stdout
pub async fn serve(dispatcher: Dispatcher) -> Result<(), ServerError> {
    tracing::info!("stdio transport ready");
    serve_stream(dispatcher, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Answers one response line per non-blank request line until EOF
pub async fn serve_stream<R, W>(
    dispatcher: Dispatcher,
    reader: R,
    mut writer: W,
) -> Result<(), ServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => dispatcher.dispatch(request).await.1,
            Err(e) => {
                tracing::warn!("rejecting undecodable line: {e}");
                JsonRpcResponse::parse_error(e)
            }
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;
        writer.flush().await?;
    }
    Ok(())
}
