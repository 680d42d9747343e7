use chrono::{FixedOffset, Offset, Utc};

use crate::{
    config::AppConfig,
    error::ErrorKind,
    model::{CurrentConditions, ForecastEntry, round_temperature},
    view::{ConditionsCard, ForecastCard, ViewSink},
};

/// Projects lookup results onto a [`ViewSink`]. Holds only display settings.
#[derive(Debug, Clone)]
pub struct Renderer {
    temperature_symbol: String,
    wind_symbol: String,
    icon_base_url: String,
    offset: FixedOffset,
}

impl Renderer {
    /// Weekday names are computed in UTC; see [`Renderer::with_offset`].
    pub fn new(config: &AppConfig) -> Self {
        Self {
            temperature_symbol: config.temperature_symbol().to_string(),
            wind_symbol: config.wind_symbol().to_string(),
            icon_base_url: config.icon_base_url.trim_end_matches('/').to_string(),
            offset: Utc.fix(),
        }
    }

    /// Offset used to turn forecast timestamps into weekday names.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn render_success(
        &self,
        sink: &dyn ViewSink,
        conditions: &CurrentConditions,
        forecast: &[ForecastEntry],
    ) {
        sink.set_error(None);
        sink.set_conditions(Some(&self.conditions_card(conditions)));

        let cards: Vec<ForecastCard> = forecast.iter().map(|e| self.forecast_card(e)).collect();
        sink.set_forecast(&cards);
    }

    /// Leaves the forecast strip as it was.
    pub fn render_error(&self, sink: &dyn ViewSink, kind: &ErrorKind) {
        sink.set_error(Some(&kind.message()));
        sink.set_conditions(None);
    }

    pub fn set_loading(&self, sink: &dyn ViewSink, visible: bool) {
        sink.set_loading(visible);
    }

    pub fn conditions_card(&self, conditions: &CurrentConditions) -> ConditionsCard {
        ConditionsCard {
            location: format!("{}, {}", conditions.place_name, conditions.country_code),
            temperature: self.format_temperature(conditions.temperature),
            description: conditions.description.clone(),
            icon_url: format!("{}/{}@2x.png", self.icon_base_url, conditions.icon),
            humidity: format!("{}%", conditions.humidity_pct),
            wind: format!("{} {}", conditions.wind_speed, self.wind_symbol),
        }
    }

    pub fn forecast_card(&self, entry: &ForecastEntry) -> ForecastCard {
        ForecastCard {
            weekday: entry.timestamp.with_timezone(&self.offset).format("%A").to_string(),
            icon_url: format!("{}/{}.png", self.icon_base_url, entry.icon),
            temperature: format!("{}°", entry.temperature),
        }
    }

    pub fn format_temperature(&self, value: f64) -> String {
        format!("{}{}", round_temperature(value), self.temperature_symbol)
    }
}
