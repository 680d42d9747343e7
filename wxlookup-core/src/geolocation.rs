use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{error::GeolocationFailure, model::Coordinates};

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// One-shot source of the user's position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationFailure>;
}

/// Approximates the position from the caller's public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_IP_LOOKUP_URL)
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationFailure> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|err| {
                warn!(error = %err, "IP geolocation request failed");
                GeolocationFailure::PermissionDenied
            })?;

        let parsed: IpLookupResponse = response.json().await.map_err(|err| {
            warn!(error = %err, "IP geolocation response was not understood");
            GeolocationFailure::PermissionDenied
        })?;

        match (parsed.latitude, parsed.longitude) {
            (Some(latitude), Some(longitude)) => {
                debug!(latitude, longitude, "resolved position from IP address");
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => Err(GeolocationFailure::PermissionDenied),
        }
    }
}

/// Always answers with the same reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationFailure> {
        Ok(self.0)
    }
}

/// Stands in for a platform without any position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocator;

#[async_trait]
impl Geolocator for NoGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationFailure> {
        Err(GeolocationFailure::Unsupported)
    }
}
