use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-mcp/1.0.0";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// OpenWeatherMap API base URL (versioned paths are appended per endpoint)
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data";

/// Upper bound on every outbound upstream call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Name reported in `serverInfo` and on the liveness endpoint
pub const SERVER_NAME: &str = "Weather MCP Server";

/// Version reported in `serverInfo`
pub const SERVER_VERSION: &str = "1.0.0";

/// JSON-RPC version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Default HTTP listening port
pub const DEFAULT_PORT: u16 = 8000;
