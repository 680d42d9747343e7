use chrono::{DateTime, Utc};
use std::fmt;

/// What the user asked to look up: a place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTarget {
    Place(String),
    Coordinates(Coordinates),
}

impl LookupTarget {
    pub fn place(name: impl Into<String>) -> Self {
        LookupTarget::Place(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        LookupTarget::Coordinates(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Query parameters selecting this target on the weather API.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            LookupTarget::Place(name) => vec![("q", name.clone())],
            LookupTarget::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        }
    }
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Place(name) => f.write_str(name),
            LookupTarget::Coordinates(c) => write!(f, "{},{}", c.latitude, c.longitude),
        }
    }
}

/// A one-shot geolocation reading. Range checking is left to the weather API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub place_name: String,
    pub country_code: String,
    /// In the unit system the request was made with.
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

/// One forecast sample per day, taken at the same time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: i64,
    pub icon: String,
}

/// Result of a successful lookup. Conditions and forecast always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub conditions: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

/// Nearest integer, halves toward positive infinity (so `-2.5` becomes `-2`).
pub fn round_temperature(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}
