//! The tool registry: a fixed catalog built once and shared read-only.

use std::sync::LazyLock;

use schemars::{json_schema, Schema};
use serde::Serialize;

/// The operations a tool name can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherTool {
    CurrentWeather,
    Forecast,
    Alerts,
}

/// A tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Schema,
    #[serde(skip)]
    pub tool: WeatherTool,
}

const LOCATION_DESCRIPTION: &str = "City name (e.g., 'New York', 'Los Angeles', 'Chicago')";

static CATALOG: LazyLock<Vec<ToolDescriptor>> = LazyLock::new(|| {
    vec![
        ToolDescriptor {
            name: "get_current_weather",
            description: "Get current weather for a location using National Weather Service data",
            input_schema: json_schema!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": LOCATION_DESCRIPTION
                    },
                    "units": {
                        "type": "string",
                        "description": "Units of measurement: metric or imperial",
                        "enum": ["metric", "imperial"],
                        "default": "metric"
                    }
                },
                "required": ["location"]
            }),
            tool: WeatherTool::CurrentWeather,
        },
        ToolDescriptor {
            name: "get_forecast",
            description: "Get weather forecast for a location using National Weather Service data",
            input_schema: json_schema!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": LOCATION_DESCRIPTION
                    },
                    "days": {
                        "type": "integer",
                        "description": "Number of days to forecast (1-5)",
                        "minimum": 1,
                        "maximum": 5,
                        "default": 5
                    },
                    "units": {
                        "type": "string",
                        "description": "Units of measurement: metric or imperial",
                        "enum": ["metric", "imperial"],
                        "default": "metric"
                    }
                },
                "required": ["location"]
            }),
            tool: WeatherTool::Forecast,
        },
        ToolDescriptor {
            name: "get_weather_alerts",
            description: "Get weather alerts for a location using National Weather Service data",
            input_schema: json_schema!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": LOCATION_DESCRIPTION
                    }
                },
                "required": ["location"]
            }),
            tool: WeatherTool::Alerts,
        },
    ]
});

/// Every registered tool, in advertisement order
pub fn list() -> &'static [ToolDescriptor] {
    &CATALOG
}

/// Finds a registered tool by exact name
pub fn lookup(name: &str) -> Option<&'static ToolDescriptor> {
    list().iter().find(|descriptor| descriptor.name == name)
}
