//! JSON-RPC envelopes and MCP payloads.

use rmcp::model::{ErrorCode, Implementation, ProtocolVersion, ServerCapabilities};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{JSONRPC_VERSION, SERVER_NAME, SERVER_VERSION};
use crate::tools::ToolDescriptor;

/// Parse error, answered by the transports before dispatch
pub const PARSE_ERROR: i32 = ErrorCode::PARSE_ERROR.0;
/// Unknown method or unknown tool
pub const METHOD_NOT_FOUND: i32 = ErrorCode::METHOD_NOT_FOUND.0;
pub const INTERNAL_ERROR: i32 = ErrorCode::INTERNAL_ERROR.0;

/// Incoming JSON-RPC request.
///
/// An absent or null `id` is carried as [`Value::Null`] and echoed as such.
/// `jsonrpc` and `method` are kept as raw values so any JSON object decodes;
/// a `method` that is not a known string is answered as an unknown method.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<Value>,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: Value,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Renders a loosely typed name for an error message: strings verbatim,
/// null or absent as empty, anything else as its JSON text
pub fn describe_name(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// JSON-RPC response envelope: exactly one of `result` or `error`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Response for bytes that never decoded into a request
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::error(Value::Null, PARSE_ERROR, format!("Parse error: {detail}"))
    }
}

/// Result of `initialize`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: ProtocolVersion,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
}

impl InitializeResult {
    pub fn current() -> Self {
        Self {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
        }
    }
}

/// Result of `tools/list`
#[derive(Debug, Serialize)]
pub struct ToolListResult {
    pub tools: &'static [ToolDescriptor],
}

/// Parameters of `tools/call`
#[derive(Debug, Default, Deserialize)]
pub struct ToolCallParams {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// Result of `tools/call`: a single text content item
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolCallResult {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_codes_match_jsonrpc() {
        assert_eq!(PARSE_ERROR, -32700);
        assert_eq!(METHOD_NOT_FOUND, -32601);
        assert_eq!(INTERNAL_ERROR, -32603);
    }

    #[test]
    fn missing_and_null_ids_decode_as_null() {
        let absent: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "tools/list"})).expect("absent");
        assert_eq!(absent.id, Value::Null);
        let null: JsonRpcRequest =
            serde_json::from_value(json!({"id": null, "method": "tools/list"})).expect("null");
        assert_eq!(null.id, Value::Null);
        let text: JsonRpcRequest =
            serde_json::from_value(json!({"id": "abc", "method": "initialize"})).expect("text");
        assert_eq!(text.id, json!("abc"));
    }

    #[test]
    fn loosely_typed_envelope_fields_still_decode() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": 2.0, "id": 6, "method": 42})).expect("numeric");
        assert_eq!(request.id, json!(6));
        assert_eq!(request.method.as_str(), None);
        assert_eq!(describe_name(Some(&request.method)), "42");

        let request: JsonRpcRequest =
            serde_json::from_value(json!({"id": 5, "method": null})).expect("null method");
        assert_eq!(request.method, Value::Null);
        assert_eq!(describe_name(Some(&request.method)), "");

        let params: ToolCallParams =
            serde_json::from_value(json!({"name": 42, "arguments": {}})).expect("numeric name");
        assert_eq!(describe_name(params.name.as_ref()), "42");
        assert_eq!(describe_name(Some(&json!("get_tides"))), "get_tides");
        assert_eq!(describe_name(None), "");
    }

    #[test]
    fn envelopes_carry_one_of_result_or_error() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!(7), json!({"a": 1}))).expect("ok");
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 7, "result": {"a": 1}}));

        let err = serde_json::to_value(JsonRpcResponse::error(Value::Null, METHOD_NOT_FOUND, "nope"))
            .expect("err");
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32601, "message": "nope"}})
        );
    }

    #[test]
    fn initialize_payload_shape() {
        let value = serde_json::to_value(InitializeResult::current()).expect("initialize");
        assert_eq!(value["protocolVersion"], "2024-11-05");
        assert!(value["capabilities"]["tools"].is_object());
        assert_eq!(value["serverInfo"]["name"], "Weather MCP Server");
        assert_eq!(value["serverInfo"]["version"], "1.0.0");
    }

    #[test]
    fn tool_result_is_single_text_item() {
        let value = serde_json::to_value(ToolCallResult::text("hello".to_string())).expect("result");
        assert_eq!(value, json!({"content": [{"type": "text", "text": "hello"}]}));
    }
}
