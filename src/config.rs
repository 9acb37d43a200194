use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::backend::{BackendError, NwsBackend, OpenWeatherBackend, WeatherBackend};
use crate::constants::DEFAULT_PORT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// JSON-RPC over HTTP POST
    Http,
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// National Weather Service gridpoint API
    Nws,
    /// OpenWeatherMap; demo data when no API key is set
    Openweather,
}

/// Weather MCP server: current conditions, forecasts and alerts as MCP tools
#[derive(Debug, Clone, Parser)]
#[command(name = "weather-mcp", version)]
pub struct Config {
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Http)]
    pub transport: TransportKind,

    /// Address the HTTP transport binds to
    #[arg(long, env = "MCP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "WEATHER_BACKEND", value_enum, default_value_t = BackendKind::Nws)]
    pub backend: BackendKind,

    /// OpenWeatherMap credential
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Instantiates the configured backend strategy
    pub fn build_backend(&self) -> Result<Arc<dyn WeatherBackend>, BackendError> {
        let backend: Arc<dyn WeatherBackend> = match self.backend {
            BackendKind::Nws => Arc::new(NwsBackend::new()?),
            BackendKind::Openweather => Arc::new(OpenWeatherBackend::new(self.api_key.clone())?),
        };
        Ok(backend)
    }
}
