use serde::Deserialize;
use serde_json::{Number, Value};

use crate::units::{clamp_days, Units, MAX_FORECAST_DAYS};

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint forecast for this point
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

/// `periods` is required; only the fields of each period are optional
#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub updated: Option<String>,
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Fahrenheit, as published
    pub temperature: Option<Number>,
    pub short_forecast: Option<String>,
    pub detailed_forecast: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub relative_humidity: Option<QuantitativeValue>,
    pub probability_of_precipitation: Option<QuantitativeValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProperties {
    pub event: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub certainty: Option<String>,
    pub area_desc: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub sender_name: Option<String>,
    pub sender: Option<String>,
}

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OwmCurrentResponse {
    #[serde(default)]
    pub name: Option<String>,
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmCondition>,
    #[serde(default)]
    pub wind: OwmWind,
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OwmCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwmWind {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OwmForecastResponse {
    #[serde(default)]
    pub list: Vec<OwmForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OwmForecastEntry {
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: OwmMain,
    #[serde(default)]
    pub weather: Vec<OwmCondition>,
    #[serde(default)]
    pub wind: OwmWind,
    /// Probability of precipitation in [0, 1]
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OwmOneCallResponse {
    #[serde(default)]
    pub alerts: Vec<OwmAlert>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OwmAlert {
    pub sender_name: Option<String>,
    pub event: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub description: Option<String>,
}

// ============================================================================
// MCP Tool Argument Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetCurrentWeatherArgs {
    pub location: String,
    #[serde(default)]
    pub units: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GetForecastArgs {
    pub location: String,
    #[serde(default)]
    pub days: Option<Value>,
    #[serde(default)]
    pub units: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GetWeatherAlertsArgs {
    pub location: String,
}

impl GetCurrentWeatherArgs {
    pub fn units(&self) -> Units {
        units_from(self.units.as_ref())
    }
}

impl GetForecastArgs {
    pub fn units(&self) -> Units {
        units_from(self.units.as_ref())
    }

    /// Day count coerced to an integer and clamped to [1, 5]; unusable input means 5
    pub fn days(&self) -> u32 {
        let requested = self.days.as_ref().and_then(lenient_integer).unwrap_or(MAX_FORECAST_DAYS);
        clamp_days(requested)
    }
}

fn units_from(value: Option<&Value>) -> Units {
    value
        .and_then(Value::as_str)
        .map(Units::parse_lossy)
        .unwrap_or_default()
}

/// Accepts integers, floats (truncated toward zero) and numeric strings
fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX))
            .or_else(|| number.as_f64().map(saturating_truncate)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().filter(|f| f.is_finite()).map(saturating_truncate))
        }
        _ => None,
    }
}

fn saturating_truncate(value: f64) -> i64 {
    value.trunc() as i64
}
