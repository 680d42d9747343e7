use crate::{
    error::FetchError,
    model::{CurrentConditions, ForecastEntry, LookupTarget},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of weather data for a lookup target.
///
/// `forecast` returns every raw sample; picking one per day is the caller's job.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, target: &LookupTarget) -> Result<CurrentConditions, FetchError>;

    async fn forecast(&self, target: &LookupTarget) -> Result<Vec<ForecastEntry>, FetchError>;
}
