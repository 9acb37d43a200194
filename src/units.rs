use serde::Serialize;

/// Smallest forecast window a client can request
pub const MIN_FORECAST_DAYS: i64 = 1;

/// Largest forecast window a client can request
pub const MAX_FORECAST_DAYS: i64 = 5;

/// Unit system applied to every temperature in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Parses a client-supplied unit name. Anything unrecognized falls back to metric.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "imperial" => Units::Imperial,
            _ => Units::Metric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Units::Metric => "\u{00b0}C",
            Units::Imperial => "\u{00b0}F",
        }
    }

    /// Expresses a Fahrenheit reading in this unit system
    pub fn from_fahrenheit(self, fahrenheit: f64) -> f64 {
        match self {
            Units::Metric => fahrenheit_to_celsius(fahrenheit),
            Units::Imperial => fahrenheit,
        }
    }
}

/// `(F - 32) * 5/9`, rounded to one decimal place
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round_one_decimal((fahrenheit - 32.0) * 5.0 / 9.0)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamps a requested day count into the supported forecast window
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS) as u32
}
