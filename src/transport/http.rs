use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::ServerError;
use crate::constants::SERVER_NAME;
use crate::dispatcher::Dispatcher;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Routes: `GET /` liveness, `POST /` and `POST /mcp` JSON-RPC
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", get(health).post(handle_rpc))
        .route("/mcp", post(handle_rpc))
        .with_state(dispatcher)
}

/// Binds `addr` and serves until Ctrl-C
pub async fn serve(dispatcher: Dispatcher, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    tracing::info!("HTTP transport listening on {addr}");

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP transport stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "server": SERVER_NAME }))
}

async fn handle_rpc(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let request = match serde_json::from_slice::<JsonRpcRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("rejecting undecodable request body: {e}");
            return (StatusCode::BAD_REQUEST, Json(JsonRpcResponse::parse_error(e)));
        }
    };

    let (status, response) = dispatcher.dispatch(request).await;
    (status, Json(response))
}
