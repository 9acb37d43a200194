use async_trait::async_trait;
use reqwest::Client;

use super::{build_client, fetch_json, BackendError, WeatherBackend};
use crate::constants::NWS_API_BASE;
use crate::formatters::{nws_alerts, nws_current, nws_forecast, render};
use crate::geocoder::{self, Coordinates};
use crate::models::{AlertResponse, ForecastResponse, PointsResponse};
use crate::units::{clamp_days, Units};

/// Backend powered by the National Weather Service gridpoint API
#[derive(Clone)]
pub struct NwsBackend {
    client: Client,
    base_url: String,
}

impl NwsBackend {
    pub fn new() -> Result<Self, BackendError> {
        Self::with_base_url(NWS_API_BASE)
    }

    /// Creates a backend against an alternate API root (used to target local stubs)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolves the grid for a point, then fetches that grid's forecast
    async fn gridpoint_forecast(&self, coordinates: Coordinates) -> Result<ForecastResponse, BackendError> {
        let points_url = format!(
            "{}/points/{},{}",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        tracing::debug!(url = %points_url, "resolving NWS grid point");
        let points = fetch_json::<PointsResponse>(self.client.get(&points_url)).await?;

        tracing::debug!(url = %points.properties.forecast, "fetching NWS forecast");
        fetch_json::<ForecastResponse>(self.client.get(&points.properties.forecast)).await
    }
}

#[async_trait]
impl WeatherBackend for NwsBackend {
    fn name(&self) -> &'static str {
        "nws"
    }

    async fn current_weather(&self, location: &str, units: Units) -> Result<String, BackendError> {
        tracing::info!("Getting current weather for {location} from NWS");
        let forecast = self.gridpoint_forecast(geocoder::resolve(location)).await?;
        let period = forecast.properties.periods.first().ok_or(BackendError::NoData)?;
        Ok(render(&nws_current(location, period, units))?)
    }

    async fn forecast(&self, location: &str, days: i64, units: Units) -> Result<String, BackendError> {
        let days = clamp_days(days);
        tracing::info!("Getting {days}-day forecast for {location} from NWS");
        let forecast = self.gridpoint_forecast(geocoder::resolve(location)).await?;
        Ok(render(&nws_forecast(location, forecast, days, units))?)
    }

    async fn alerts(&self, location: &str) -> Result<String, BackendError> {
        tracing::info!("Getting alerts for {location} from NWS");
        let coordinates = geocoder::resolve(location);
        let url = format!(
            "{}/alerts?point={},{}",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        let alerts = fetch_json::<AlertResponse>(self.client.get(&url)).await?;
        Ok(render(&nws_alerts(location, alerts))?)
    }
}
