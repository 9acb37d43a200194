//! Routes decoded JSON-RPC requests to their handlers.
//!
//! Every request produces exactly one response. Unknown methods and unknown
//! tools become `-32601` error envelopes delivered with a normal status; any
//! failure while building a response becomes `-32603` with status 500. Backend
//! failures are not protocol errors at all: they are rendered as the text of a
//! successful tool result so clients always get something displayable.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::backend::WeatherBackend;
use crate::formatters::render_error;
use crate::models::{GetCurrentWeatherArgs, GetForecastArgs, GetWeatherAlertsArgs};
use crate::protocol::{
    describe_name, InitializeResult, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    ToolCallResult, ToolListResult, INTERNAL_ERROR, METHOD_NOT_FOUND,
};
use crate::tools::{self, WeatherTool};

/// A request that could not be answered with a result
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Method '{0}' not found")]
    MethodNotFound(String),
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    pub fn code(&self) -> i32 {
        match self {
            DispatchError::MethodNotFound(_) | DispatchError::ToolNotFound(_) => METHOD_NOT_FOUND,
            DispatchError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Transport status; only internal faults are signalled out of band
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::MethodNotFound(_) | DispatchError::ToolNotFound(_) => StatusCode::OK,
            DispatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Stateless dispatcher; clones share only the read-only backend handle
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn WeatherBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn WeatherBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Handles one request, returning the transport status and the envelope
    pub async fn dispatch(&self, request: JsonRpcRequest) -> (StatusCode, JsonRpcResponse) {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, id = %id, "dispatching request");

        match self.route(request).await {
            Ok(result) => (StatusCode::OK, JsonRpcResponse::success(id, result)),
            Err(error) => {
                match &error {
                    DispatchError::Internal(message) => {
                        tracing::error!(id = %id, "internal error: {message}")
                    }
                    other => tracing::info!(id = %id, "{other}"),
                }
                let status = error.status();
                (status, JsonRpcResponse::error(id, error.code(), error.to_string()))
            }
        }
    }

    async fn route(&self, request: JsonRpcRequest) -> Result<Value, DispatchError> {
        match request.method.as_str() {
            Some("initialize") => to_result(&InitializeResult::current()),
            Some("tools/list") => to_result(&ToolListResult {
                tools: tools::list(),
            }),
            Some("tools/call") => self.call_tool(request.params).await,
            _ => Err(DispatchError::MethodNotFound(describe_name(Some(&request.method)))),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, DispatchError> {
        let params = match params {
            None | Some(Value::Null) => ToolCallParams::default(),
            Some(params) => decode::<ToolCallParams>(params)?,
        };
        let name = describe_name(params.name.as_ref());
        let descriptor = params
            .name
            .as_ref()
            .and_then(Value::as_str)
            .and_then(tools::lookup)
            .ok_or_else(|| DispatchError::ToolNotFound(name.clone()))?;
        let arguments = Value::Object(params.arguments.unwrap_or_default());
        tracing::info!(tool = %name, backend = self.backend.name(), "calling tool");

        let outcome = match descriptor.tool {
            WeatherTool::CurrentWeather => {
                let args = decode::<GetCurrentWeatherArgs>(arguments)?;
                self.backend.current_weather(&args.location, args.units()).await
            }
            WeatherTool::Forecast => {
                let args = decode::<GetForecastArgs>(arguments)?;
                self.backend
                    .forecast(&args.location, i64::from(args.days()), args.units())
                    .await
            }
            WeatherTool::Alerts => {
                let args = decode::<GetWeatherAlertsArgs>(arguments)?;
                self.backend.alerts(&args.location).await
            }
        };

        let text = outcome.unwrap_or_else(|error| {
            tracing::warn!(tool = %name, "tool call failed: {error}");
            render_error(&error.to_string())
        });
        to_result(&ToolCallResult::text(text))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value).map_err(|e| DispatchError::Internal(e.to_string()))
}

fn to_result<T: Serialize>(payload: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(payload).map_err(|e| DispatchError::Internal(e.to_string()))
}
