//! Shared fixtures: local HTTP servers bound to ephemeral ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on `127.0.0.1:<ephemeral>`; aborted on drop
pub struct LocalServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for LocalServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Binds a port first so the router can embed its own base URL
pub async fn spawn_server<F>(build: F) -> LocalServer
where
    F: FnOnce(String) -> Router,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let base_url = format!("http://{addr}");
    let router = build(base_url.clone());
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    LocalServer { base_url, handle }
}

/// A base URL nothing listens on
pub fn closed_base_url() -> String {
    "http://127.0.0.1:1".to_string()
}

// ============================================================================
// NWS stub
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NwsMode {
    Normal,
    NoPeriods,
    ServerError,
    Malformed,
    /// Forecast endpoint answers `{}`
    EmptyForecast,
}

#[derive(Clone)]
struct NwsState {
    base_url: String,
    mode: NwsMode,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct NwsStub {
    pub server: LocalServer,
    requests: Arc<Mutex<Vec<String>>>,
}

impl NwsStub {
    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    /// Paths (with query) the stub has served, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// `count` half-day periods: "Period 0" at 50F, "Period 1" at 51F, ...
pub fn nws_periods(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "number": i + 1,
                "name": format!("Period {i}"),
                "startTime": "2026-10-18T06:00:00-07:00",
                "endTime": "2026-10-18T18:00:00-07:00",
                "isDaytime": i % 2 == 0,
                "temperature": 50 + i,
                "temperatureUnit": "F",
                "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": 40},
                "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 85},
                "windSpeed": "5 to 10 mph",
                "windDirection": "SSW",
                "shortForecast": "Chance Light Rain",
                "detailedForecast": "A chance of light rain. Cloudy."
            })
        })
        .collect()
}

pub async fn spawn_nws_stub(mode: NwsMode) -> NwsStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&requests);
    let server = spawn_server(move |base_url| {
        let state = NwsState {
            base_url,
            mode,
            requests: shared,
        };
        Router::new()
            .route("/points/{point}", get(points))
            .route("/gridpoints/{office}/{grid}/forecast", get(forecast))
            .route("/alerts", get(alerts))
            .with_state(state)
    })
    .await;
    NwsStub { server, requests }
}

fn record(state: &NwsState, entry: String) {
    state.requests.lock().expect("requests lock").push(entry);
}

async fn points(State(state): State<NwsState>, Path(point): Path<String>) -> Response {
    record(&state, format!("/points/{point}"));
    if state.mode == NwsMode::ServerError {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response();
    }
    Json(json!({
        "properties": {
            "gridId": "SEW",
            "gridX": 124,
            "gridY": 67,
            "forecast": format!("{}/gridpoints/SEW/124,67/forecast", state.base_url)
        }
    }))
    .into_response()
}

async fn forecast(
    State(state): State<NwsState>,
    Path((office, grid)): Path<(String, String)>,
) -> Response {
    record(&state, format!("/gridpoints/{office}/{grid}/forecast"));
    match state.mode {
        NwsMode::Malformed => (StatusCode::OK, "<html>not json</html>").into_response(),
        NwsMode::EmptyForecast => Json(json!({})).into_response(),
        NwsMode::NoPeriods => Json(json!({
            "properties": {"updated": "2026-10-18T04:00:00+00:00", "periods": []}
        }))
        .into_response(),
        _ => Json(json!({
            "properties": {
                "updated": "2026-10-18T04:00:00+00:00",
                "periods": nws_periods(14)
            }
        }))
        .into_response(),
    }
}

async fn alerts(
    State(state): State<NwsState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let point = query.get("point").cloned().unwrap_or_default();
    record(&state, format!("/alerts?point={point}"));
    Json(json!({
        "updated": "2026-10-18T05:00:00+00:00",
        "features": [
            {
                "properties": {
                    "event": "Flood Watch",
                    "headline": "Flood Watch issued October 18",
                    "description": "Heavy rain may cause flooding.",
                    "instruction": null,
                    "severity": "Moderate",
                    "urgency": "Expected",
                    "certainty": "Possible",
                    "areaDesc": "King County",
                    "effective": "2026-10-18T05:00:00-07:00",
                    "expires": "2026-10-19T05:00:00-07:00",
                    "senderName": "NWS Seattle WA",
                    "sender": "w-nws.webmaster@noaa.gov"
                }
            },
            {
                "properties": {
                    "event": "Wind Advisory",
                    "severity": "Minor",
                    "areaDesc": "Puget Sound"
                }
            }
        ]
    }))
    .into_response()
}

// ============================================================================
// OpenWeatherMap stub
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwmMode {
    Normal,
    /// Every endpoint rejects the API key
    Unauthorized,
}

/// One request served by the OpenWeatherMap stub
#[derive(Debug, Clone)]
pub struct OwmRequest {
    pub path: &'static str,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
struct OwmState {
    mode: OwmMode,
    requests: Arc<Mutex<Vec<OwmRequest>>>,
}

pub struct OwmStub {
    pub server: LocalServer,
    requests: Arc<Mutex<Vec<OwmRequest>>>,
}

impl OwmStub {
    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    pub fn requests(&self) -> Vec<OwmRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// Number of 3-hour slots the forecast endpoint returns, whatever `cnt` asks for
pub const OWM_STUB_SLOTS: usize = 48;

pub async fn spawn_owm_stub(mode: OwmMode) -> OwmStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = OwmState {
        mode,
        requests: Arc::clone(&requests),
    };
    let server = spawn_server(move |_| {
        Router::new()
            .route("/2.5/weather", get(owm_weather))
            .route("/2.5/forecast", get(owm_forecast))
            .route("/3.0/onecall", get(owm_onecall))
            .with_state(state)
    })
    .await;
    OwmStub { server, requests }
}

/// Records the request; answers 401 when the stub rejects every key
fn owm_admit(
    state: &OwmState,
    path: &'static str,
    query: HashMap<String, String>,
) -> Option<Response> {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(OwmRequest { path, query });
    (state.mode == OwmMode::Unauthorized).then(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"cod": 401, "message": "Invalid API key."})),
        )
            .into_response()
    })
}

async fn owm_weather(
    State(state): State<OwmState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(rejection) = owm_admit(&state, "/2.5/weather", query) {
        return rejection;
    }
    Json(json!({
        "name": "Lower Manhattan",
        "dt": 1760745600,
        "main": {"temp": 12.34, "feels_like": 11.0, "humidity": 81, "pressure": 1012},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
        "wind": {"speed": 4.1, "deg": 315}
    }))
    .into_response()
}

async fn owm_forecast(
    State(state): State<OwmState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(rejection) = owm_admit(&state, "/2.5/forecast", query) {
        return rejection;
    }
    let list: Vec<Value> = (0..OWM_STUB_SLOTS)
        .map(|i| {
            json!({
                "dt": 1760745600 + i * 10800,
                "dt_txt": format!("2026-10-{:02} {:02}:00:00", 18 + i / 8, (i % 8) * 3),
                "main": {"temp": 20.04 + i as f64, "humidity": 70},
                "weather": [{"main": "Clouds", "description": "broken clouds"}],
                "wind": {"speed": 3.61, "deg": 200},
                "pop": 0.27
            })
        })
        .collect();
    Json(json!({"cod": "200", "cnt": list.len(), "list": list})).into_response()
}

async fn owm_onecall(
    State(state): State<OwmState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(rejection) = owm_admit(&state, "/3.0/onecall", query) {
        return rejection;
    }
    Json(json!({
        "lat": 40.7128,
        "lon": -74.006,
        "alerts": [
            {
                "sender_name": "NWS New York NY",
                "event": "Heat Advisory",
                "start": 1760745600,
                "end": 1760788800,
                "description": "Heat index values up to 105.",
                "tags": ["Extreme temperature value"]
            }
        ]
    }))
    .into_response()
}
