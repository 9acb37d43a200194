//! Normalized report records and their rendering to text blobs.
//!
//! Every backend reshapes its provider's payload into these records so that
//! clients see the same field names whichever upstream served the request.

use serde::Serialize;
use serde_json::{json, Number};

use crate::geocoder::display_name;
use crate::models::{
    AlertResponse, ForecastPeriod, ForecastResponse, OwmAlert, OwmCurrentResponse,
    OwmForecastEntry, OwmOneCallResponse,
};
use crate::units::{fahrenheit_to_celsius, round_one_decimal, Units};

pub const NWS_SOURCE: &str = "National Weather Service";
pub const OWM_SOURCE: &str = "OpenWeatherMap";

/// Current conditions for one location
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: Option<Number>,
    pub temperature_unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    pub conditions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_forecast: Option<String>,
    pub wind_speed: String,
    pub wind_direction: String,
    pub humidity: Option<f64>,
    pub precipitation_chance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub demo: bool,
}

/// One forecast period (an NWS half-day or an OpenWeatherMap 3-hour slot)
#[derive(Debug, Clone, Serialize)]
pub struct ForecastEntry {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub temperature: Option<Number>,
    pub temperature_unit: &'static str,
    pub conditions: String,
    pub detailed_forecast: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub humidity: Option<f64>,
    pub precipitation_chance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: String,
    pub forecast: Vec<ForecastEntry>,
    pub units: Units,
    pub source: &'static str,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub demo: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertEntry {
    pub event: String,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub severity: String,
    pub urgency: String,
    pub certainty: String,
    pub area_desc: String,
    pub effective: String,
    pub expires: String,
    pub sender: String,
    pub sender_short: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertReport {
    pub location: String,
    pub alerts: Vec<AlertEntry>,
    pub count: usize,
    pub source: &'static str,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub demo: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Report number for a computed reading; non-finite values become null
pub fn reading(value: f64) -> Option<Number> {
    Number::from_f64(value)
}

/// Pretty-prints a report as the text blob handed back to clients
pub fn render<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Text blob describing a failed tool call
pub fn render_error(message: &str) -> String {
    let body = json!({ "error": message });
    serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
}

// ============================================================================
// National Weather Service
// ============================================================================

/// Imperial readings pass through exactly as published; metric ones are converted
fn nws_temperature(period: &ForecastPeriod, units: Units) -> Option<Number> {
    let fahrenheit = period.temperature.as_ref()?;
    match units {
        Units::Imperial => Some(fahrenheit.clone()),
        Units::Metric => fahrenheit.as_f64().map(fahrenheit_to_celsius).and_then(reading),
    }
}

fn quantity(value: &Option<crate::models::QuantitativeValue>) -> Option<f64> {
    value.as_ref().and_then(|quantity| quantity.value)
}

/// Current conditions taken from the first forecast period
pub fn nws_current(location: &str, period: &ForecastPeriod, units: Units) -> WeatherReport {
    WeatherReport {
        location: display_name(location),
        temperature: nws_temperature(period, units),
        temperature_unit: units.temperature_symbol(),
        feels_like: None,
        conditions: period.short_forecast.clone().unwrap_or_else(|| "Unknown".to_string()),
        detailed_forecast: Some(period.detailed_forecast.clone().unwrap_or_default()),
        wind_speed: period.wind_speed.clone().unwrap_or_default(),
        wind_direction: period.wind_direction.clone().unwrap_or_default(),
        humidity: quantity(&period.relative_humidity),
        precipitation_chance: quantity(&period.probability_of_precipitation),
        start_time: Some(period.start_time.clone().unwrap_or_default()),
        end_time: Some(period.end_time.clone().unwrap_or_default()),
        source: NWS_SOURCE,
        note: Some("Current conditions based on forecast data".to_string()),
        demo: false,
    }
}

/// NWS publishes a day and a night period per calendar day
pub fn nws_forecast(
    location: &str,
    forecast: ForecastResponse,
    days: u32,
    units: Units,
) -> ForecastReport {
    let periods = days as usize * 2;
    let entries = forecast
        .properties
        .periods
        .iter()
        .take(periods)
        .map(|period| ForecastEntry {
            name: period.name.clone().unwrap_or_default(),
            start_time: period.start_time.clone().unwrap_or_default(),
            end_time: period.end_time.clone().unwrap_or_default(),
            temperature: nws_temperature(period, units),
            temperature_unit: units.temperature_symbol(),
            conditions: period.short_forecast.clone().unwrap_or_default(),
            detailed_forecast: period.detailed_forecast.clone().unwrap_or_default(),
            wind_speed: period.wind_speed.clone().unwrap_or_default(),
            wind_direction: period.wind_direction.clone().unwrap_or_default(),
            humidity: quantity(&period.relative_humidity),
            precipitation_chance: quantity(&period.probability_of_precipitation),
        })
        .collect();

    ForecastReport {
        location: display_name(location),
        forecast: entries,
        units,
        source: NWS_SOURCE,
        updated: forecast.properties.updated.unwrap_or_default(),
        note: None,
        demo: false,
    }
}

pub fn nws_alerts(location: &str, alerts: AlertResponse) -> AlertReport {
    let entries: Vec<AlertEntry> = alerts
        .features
        .into_iter()
        .map(|feature| {
            let props = feature.properties;
            AlertEntry {
                event: props.event.unwrap_or_default(),
                headline: props.headline.unwrap_or_default(),
                description: props.description.unwrap_or_default(),
                instruction: props.instruction.unwrap_or_default(),
                severity: props.severity.unwrap_or_default(),
                urgency: props.urgency.unwrap_or_default(),
                certainty: props.certainty.unwrap_or_default(),
                area_desc: props.area_desc.unwrap_or_default(),
                effective: props.effective.unwrap_or_default(),
                expires: props.expires.unwrap_or_default(),
                sender: props.sender_name.unwrap_or_default(),
                sender_short: props.sender.unwrap_or_default(),
            }
        })
        .collect();

    AlertReport {
        location: display_name(location),
        count: entries.len(),
        alerts: entries,
        source: NWS_SOURCE,
        updated: alerts.updated.unwrap_or_default(),
        note: None,
        demo: false,
    }
}

// ============================================================================
// OpenWeatherMap
// ============================================================================

/// OpenWeatherMap reports 3-hourly slots, eight per day
pub const OWM_SLOTS_PER_DAY: u32 = 8;

fn wind_speed_text(speed: Option<f64>, units: Units) -> String {
    let unit = match units {
        Units::Metric => "m/s",
        Units::Imperial => "mph",
    };
    speed
        .map(|speed| format!("{} {}", round_one_decimal(speed), unit))
        .unwrap_or_default()
}

/// Converts a bearing in degrees to a 16-point compass direction
pub fn compass_direction(degrees: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized / 22.5).round() as usize) % POINTS.len();
    POINTS[index]
}

fn condition_text(conditions: &[crate::models::OwmCondition]) -> String {
    conditions
        .first()
        .map(|condition| {
            if condition.description.is_empty() {
                condition.main.clone()
            } else {
                condition.description.clone()
            }
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn owm_current(location: &str, current: OwmCurrentResponse, units: Units) -> WeatherReport {
    WeatherReport {
        location: display_name(location),
        temperature: reading(round_one_decimal(current.main.temp)),
        temperature_unit: units.temperature_symbol(),
        feels_like: current.main.feels_like.map(round_one_decimal),
        conditions: condition_text(&current.weather),
        detailed_forecast: None,
        wind_speed: wind_speed_text(current.wind.speed, units),
        wind_direction: current.wind.deg.map(compass_direction).unwrap_or_default().to_string(),
        humidity: current.main.humidity,
        precipitation_chance: None,
        start_time: current.dt.map(|dt| dt.to_string()),
        end_time: None,
        source: OWM_SOURCE,
        note: current.name.map(|station| format!("Observed at {station}")),
        demo: false,
    }
}

pub fn owm_forecast(
    location: &str,
    entries: Vec<OwmForecastEntry>,
    days: u32,
    units: Units,
) -> ForecastReport {
    let slots = (days * OWM_SLOTS_PER_DAY) as usize;
    let forecast = entries
        .into_iter()
        .take(slots)
        .map(|entry| {
            let stamp = entry.dt_txt.unwrap_or_default();
            ForecastEntry {
                name: stamp.clone(),
                start_time: stamp,
                end_time: String::new(),
                temperature: reading(round_one_decimal(entry.main.temp)),
                temperature_unit: units.temperature_symbol(),
                conditions: condition_text(&entry.weather),
                detailed_forecast: String::new(),
                wind_speed: wind_speed_text(entry.wind.speed, units),
                wind_direction: entry.wind.deg.map(compass_direction).unwrap_or_default().to_string(),
                humidity: entry.main.humidity,
                precipitation_chance: entry.pop.map(|pop| (pop * 100.0).round()),
            }
        })
        .collect();

    ForecastReport {
        location: display_name(location),
        forecast,
        units,
        source: OWM_SOURCE,
        updated: String::new(),
        note: None,
        demo: false,
    }
}

pub fn owm_alerts(location: &str, onecall: OwmOneCallResponse) -> AlertReport {
    let alerts: Vec<AlertEntry> = onecall.alerts.into_iter().map(owm_alert_entry).collect();
    AlertReport {
        location: display_name(location),
        count: alerts.len(),
        alerts,
        source: OWM_SOURCE,
        updated: String::new(),
        note: None,
        demo: false,
    }
}

fn owm_alert_entry(alert: OwmAlert) -> AlertEntry {
    let event = alert.event.unwrap_or_default();
    AlertEntry {
        headline: event.clone(),
        event,
        description: alert.description.unwrap_or_default(),
        effective: alert.start.map(|ts| ts.to_string()).unwrap_or_default(),
        expires: alert.end.map(|ts| ts.to_string()).unwrap_or_default(),
        sender: alert.sender_name.unwrap_or_default(),
        ..AlertEntry::default()
    }
}
