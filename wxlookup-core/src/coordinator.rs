use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::ErrorKind,
    forecast::sample_daily,
    geolocation::Geolocator,
    model::{Lookup, LookupTarget},
    provider::{OpenWeatherProvider, WeatherProvider},
    render::Renderer,
    view::ViewSink,
};

/// Runs one lookup from user action to final render.
///
/// Every call ends in exactly one render: success or error. Overlapping calls
/// are not coordinated; whichever finishes last owns the display.
#[derive(Debug, Clone)]
pub struct Coordinator {
    provider: Arc<dyn WeatherProvider>,
    renderer: Renderer,
}

impl Coordinator {
    pub fn new(provider: Arc<dyn WeatherProvider>, renderer: Renderer) -> Self {
        Self { provider, renderer }
    }

    /// OpenWeather provider and renderer built from the same config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = OpenWeatherProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), Renderer::new(config)))
    }

    /// Search-trigger entry point: treat the raw input as a place name.
    pub async fn search(&self, sink: &dyn ViewSink, input: &str) -> Result<Lookup, ErrorKind> {
        self.lookup(sink, LookupTarget::place(input)).await
    }

    /// Geolocation-trigger entry point.
    ///
    /// The trigger stays disabled while the reading is pending. A failed
    /// reading renders an error without touching the weather API.
    pub async fn locate(
        &self,
        sink: &dyn ViewSink,
        geolocator: &dyn Geolocator,
    ) -> Result<Lookup, ErrorKind> {
        sink.set_locate_enabled(false);
        self.renderer.set_loading(sink, true);

        let reading = geolocator.locate().await;
        sink.set_locate_enabled(true);

        match reading {
            Ok(coords) => {
                self.lookup(sink, LookupTarget::Coordinates(coords)).await
            }
            Err(failure) => {
                warn!(%failure, "geolocation failed");
                let kind = ErrorKind::from(failure);
                self.renderer.render_error(sink, &kind);
                self.renderer.set_loading(sink, false);
                Err(kind)
            }
        }
    }

    pub async fn lookup(
        &self,
        sink: &dyn ViewSink,
        target: LookupTarget,
    ) -> Result<Lookup, ErrorKind> {
        self.renderer.set_loading(sink, true);

        let outcome = self.fetch(target).await;
        match &outcome {
            Ok(lookup) => {
                self.renderer.render_success(sink, &lookup.conditions, &lookup.forecast)
            }
            Err(kind) => self.renderer.render_error(sink, kind),
        }

        self.renderer.set_loading(sink, false);
        outcome
    }

    /// Fetch both payloads without touching the display.
    pub async fn fetch(&self, target: LookupTarget) -> Result<Lookup, ErrorKind> {
        let target = match target {
            LookupTarget::Place(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(ErrorKind::EmptyInput);
                }
                LookupTarget::Place(trimmed.to_string())
            }
            coords @ LookupTarget::Coordinates(_) => coords,
        };

        let conditions = self.provider.current(&target).await.map_err(|err| {
            warn!(error = %err, %target, "current conditions request failed");
            err.classify()
        })?;

        let raw = self.provider.forecast(&target).await.map_err(|err| {
            warn!(error = %err, %target, "forecast request failed");
            ErrorKind::FetchFailed
        })?;

        let forecast = sample_daily(raw);
        info!(
            place = %conditions.place_name,
            days = forecast.len(),
            "lookup complete"
        );

        Ok(Lookup {
            conditions,
            forecast,
        })
    }
}
