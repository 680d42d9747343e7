//! Core library for the `wxlookup` weather widget.
//!
//! This crate defines:
//! - Configuration loaded once at startup
//! - The OpenWeather client and the daily forecast sampling rule
//! - The error taxonomy shown to users
//! - A view sink abstraction plus the renderer and request coordinator that drive it
//!
//! It is used by `wxlookup-cli`, but any display surface implementing [`ViewSink`]
//! can host the same pipeline.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use config::{AppConfig, UnitSystem};
pub use coordinator::Coordinator;
pub use error::{ErrorKind, FetchError, GeolocationFailure};
pub use geolocation::{FixedGeolocator, Geolocator, IpGeolocator, NoGeolocator};
pub use model::{Coordinates, CurrentConditions, ForecastEntry, Lookup, LookupTarget};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use render::Renderer;
pub use view::{ConditionsCard, ForecastCard, MemoryView, ViewSink, ViewState};
