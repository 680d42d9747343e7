use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::{AppConfig, UnitSystem},
    error::FetchError,
    model::{CurrentConditions, ForecastEntry, LookupTarget, round_temperature},
};

use super::WeatherProvider;

/// Client for the OpenWeather 2.5 `weather` and `forecast` endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    units: UnitSystem,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, units: UnitSystem) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            units,
            http: Client::new(),
        }
    }

    /// Fails when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(config.base_url.as_str(), api_key, config.units))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        target: &LookupTarget,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, %target, units = %self.units, "requesting weather data");

        let mut query = target.query_pairs();
        query.push(("appid", self.api_key.clone()));
        query.push(("units", self.units.as_str().to_string()));

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, endpoint, "weather API returned an error status");
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwSampleMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSampleWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastSample {
    dt: i64,
    main: OwSampleMain,
    weather: Vec<OwSampleWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastSample>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::Incomplete("weather"))?;

        Ok(CurrentConditions {
            place_name: parsed.name,
            country_code: parsed.sys.country,
            temperature: parsed.main.temp,
            description: weather.description,
            icon: weather.icon,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
        })
    }
}

impl TryFrom<OwForecastSample> for ForecastEntry {
    type Error = FetchError;

    fn try_from(sample: OwForecastSample) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp(sample.dt, 0)
            .ok_or(FetchError::Incomplete("list[].dt"))?;
        let weather = sample
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::Incomplete("list[].weather"))?;

        Ok(ForecastEntry {
            timestamp,
            temperature: round_temperature(sample.main.temp),
            icon: weather.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, target: &LookupTarget) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", target).await?;
        parsed.try_into()
    }

    async fn forecast(&self, target: &LookupTarget) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", target).await?;
        parsed.list.into_iter().map(ForecastEntry::try_from).collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_current_payload() {
        let body = r#"{
            "name": "Paris",
            "sys": {"country": "FR"},
            "main": {"temp": 18.4, "humidity": 60},
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "wind": {"speed": 3.1}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("must parse");
        let conditions = CurrentConditions::try_from(parsed).expect("complete payload");

        assert_eq!(conditions.place_name, "Paris");
        assert_eq!(conditions.country_code, "FR");
        assert_eq!(conditions.temperature, 18.4);
        assert_eq!(conditions.description, "clear sky");
        assert_eq!(conditions.icon, "01d");
        assert_eq!(conditions.humidity_pct, 60);
        assert_eq!(conditions.wind_speed, 3.1);
    }

    #[test]
    fn current_payload_without_temperature_is_rejected() {
        let body = r#"{
            "name": "Paris",
            "sys": {"country": "FR"},
            "main": {},
            "wind": {"speed": 1}
        }"#;
        assert!(serde_json::from_str::<OwCurrentResponse>(body).is_err());
    }

    #[test]
    fn current_payload_without_humidity_is_rejected() {
        let body = r#"{
            "name": "Paris",
            "sys": {"country": "FR"},
            "main": {"temp": 18.4},
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "wind": {"speed": 3.1}
        }"#;
        assert!(serde_json::from_str::<OwCurrentResponse>(body).is_err());
    }

    #[test]
    fn current_payload_with_empty_weather_is_incomplete() {
        let body = r#"{
            "name": "Paris",
            "sys": {"country": "FR"},
            "main": {"temp": 18.4, "humidity": 60},
            "weather": [],
            "wind": {"speed": 3.1}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("must parse");
        let err = CurrentConditions::try_from(parsed).unwrap_err();

        assert!(matches!(err, FetchError::Incomplete("weather")));
        assert_eq!(err.classify(), ErrorKind::FetchFailed);
    }

    #[test]
    fn forecast_sample_with_empty_weather_is_incomplete() {
        let body = r#"{"dt": 1700000000, "main": {"temp": 7.5}, "weather": []}"#;

        let sample: OwForecastSample = serde_json::from_str(body).expect("must parse");
        let err = ForecastEntry::try_from(sample).unwrap_err();

        assert!(matches!(err, FetchError::Incomplete("list[].weather")));
    }

    #[test]
    fn forecast_sample_rounds_temperature() {
        let body = r#"{"dt": 1700000000, "main": {"temp": 7.5}, "weather": [{"icon": "10n"}]}"#;

        let sample: OwForecastSample = serde_json::from_str(body).expect("must parse");
        let entry = ForecastEntry::try_from(sample).expect("complete sample");

        assert_eq!(entry.temperature, 8);
        assert_eq!(entry.icon, "10n");
        assert_eq!(entry.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let provider =
            OpenWeatherProvider::new("http://localhost/data/2.5/", "KEY", UnitSystem::Metric);
        assert_eq!(provider.base_url, "http://localhost/data/2.5");
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = OpenWeatherProvider::from_config(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(250);
        assert_eq!(truncate_body(&long).chars().count(), 203);
    }
}
