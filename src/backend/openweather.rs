use async_trait::async_trait;
use reqwest::Client;

use super::{build_client, fetch_json, BackendError, WeatherBackend};
use crate::constants::OPENWEATHER_API_BASE;
use crate::formatters::{
    owm_alerts, owm_current, owm_forecast, reading, render, AlertReport, ForecastEntry,
    ForecastReport, WeatherReport, OWM_SLOTS_PER_DAY,
};
use crate::geocoder::{self, display_name, Coordinates};
use crate::models::{OwmCurrentResponse, OwmForecastResponse, OwmOneCallResponse};
use crate::units::{clamp_days, Units};

const DEMO_NOTE: &str =
    "Demo data: no OpenWeatherMap API key is configured. Set OPENWEATHER_API_KEY for live weather.";
const DEMO_SOURCE: &str = "OpenWeatherMap (demo)";

/// Demo highs in Fahrenheit, one per forecast day
const DEMO_DAILY_HIGHS_F: [f64; 5] = [72.0, 75.0, 68.0, 70.0, 66.0];
const DEMO_DAILY_CONDITIONS: [&str; 5] =
    ["Partly cloudy", "Sunny", "Light rain", "Overcast", "Showers"];

/// Backend powered by the OpenWeatherMap API.
///
/// Without an API key every operation answers with a fixed demo payload
/// marked `"demo": true` and never leaves the process.
#[derive(Clone)]
pub struct OpenWeatherBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherBackend {
    pub fn new(api_key: Option<String>) -> Result<Self, BackendError> {
        Self::with_base_url(OPENWEATHER_API_BASE, api_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn is_demo(&self) -> bool {
        self.api_key.is_none()
    }

    fn get(&self, path: &str, coordinates: Coordinates, api_key: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}/{}", self.base_url, path)).query(&[
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
            ("appid", api_key.to_string()),
        ])
    }
}

#[async_trait]
impl WeatherBackend for OpenWeatherBackend {
    fn name(&self) -> &'static str {
        if self.is_demo() {
            "openweather-demo"
        } else {
            "openweather"
        }
    }

    async fn current_weather(&self, location: &str, units: Units) -> Result<String, BackendError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(render(&demo_current(location, units))?);
        };
        tracing::info!("Getting current weather for {location} from OpenWeatherMap");
        let request = self
            .get("2.5/weather", geocoder::resolve(location), api_key)
            .query(&[("units", units.as_str())]);
        let current = fetch_json::<OwmCurrentResponse>(request).await?;
        Ok(render(&owm_current(location, current, units))?)
    }

    async fn forecast(&self, location: &str, days: i64, units: Units) -> Result<String, BackendError> {
        let days = clamp_days(days);
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(render(&demo_forecast(location, days, units))?);
        };
        tracing::info!("Getting {days}-day forecast for {location} from OpenWeatherMap");
        let request = self
            .get("2.5/forecast", geocoder::resolve(location), api_key)
            .query(&[("units", units.as_str())])
            .query(&[("cnt", days * OWM_SLOTS_PER_DAY)]);
        let forecast = fetch_json::<OwmForecastResponse>(request).await?;
        Ok(render(&owm_forecast(location, forecast.list, days, units))?)
    }

    async fn alerts(&self, location: &str) -> Result<String, BackendError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(render(&demo_alerts(location))?);
        };
        tracing::info!("Getting alerts for {location} from OpenWeatherMap");
        let request = self
            .get("3.0/onecall", geocoder::resolve(location), api_key)
            .query(&[("exclude", "current,minutely,hourly,daily")]);
        let onecall = fetch_json::<OwmOneCallResponse>(request).await?;
        Ok(render(&owm_alerts(location, onecall))?)
    }
}

// ============================================================================
// Demo payloads
// ============================================================================

fn demo_wind(units: Units) -> String {
    match units {
        Units::Metric => "4.5 m/s".to_string(),
        Units::Imperial => "10 mph".to_string(),
    }
}

fn demo_current(location: &str, units: Units) -> WeatherReport {
    WeatherReport {
        location: display_name(location),
        temperature: reading(units.from_fahrenheit(DEMO_DAILY_HIGHS_F[0])),
        temperature_unit: units.temperature_symbol(),
        feels_like: Some(units.from_fahrenheit(DEMO_DAILY_HIGHS_F[0] - 2.0)),
        conditions: DEMO_DAILY_CONDITIONS[0].to_string(),
        detailed_forecast: None,
        wind_speed: demo_wind(units),
        wind_direction: "NW".to_string(),
        humidity: Some(55.0),
        precipitation_chance: None,
        start_time: None,
        end_time: None,
        source: DEMO_SOURCE,
        note: Some(DEMO_NOTE.to_string()),
        demo: true,
    }
}

fn demo_forecast(location: &str, days: u32, units: Units) -> ForecastReport {
    let forecast = DEMO_DAILY_HIGHS_F
        .iter()
        .zip(DEMO_DAILY_CONDITIONS)
        .take(days as usize)
        .enumerate()
        .map(|(day, (high, conditions))| ForecastEntry {
            name: format!("Day {}", day + 1),
            start_time: String::new(),
            end_time: String::new(),
            temperature: reading(units.from_fahrenheit(*high)),
            temperature_unit: units.temperature_symbol(),
            conditions: conditions.to_string(),
            detailed_forecast: String::new(),
            wind_speed: demo_wind(units),
            wind_direction: "NW".to_string(),
            humidity: Some(55.0),
            precipitation_chance: None,
        })
        .collect();

    ForecastReport {
        location: display_name(location),
        forecast,
        units,
        source: DEMO_SOURCE,
        updated: String::new(),
        note: Some(DEMO_NOTE.to_string()),
        demo: true,
    }
}

fn demo_alerts(location: &str) -> AlertReport {
    AlertReport {
        location: display_name(location),
        alerts: Vec::new(),
        count: 0,
        source: DEMO_SOURCE,
        updated: String::new(),
        note: Some(DEMO_NOTE.to_string()),
        demo: true,
    }
}
