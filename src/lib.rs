//! Weather data exposed as MCP tools over a small JSON-RPC dispatcher.

pub mod backend;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod formatters;
pub mod geocoder;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod units;

pub use backend::{BackendError, WeatherBackend};
pub use dispatcher::Dispatcher;
