use reqwest::StatusCode;
use thiserror::Error;

/// Every way a lookup can end other than a successful render.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Please enter a city name")]
    EmptyInput,

    #[error("Invalid API Key")]
    Unauthorized,

    #[error("City not found")]
    NotFound,

    #[error("Too many requests")]
    RateLimited,

    #[error("Failed to load weather data")]
    FetchFailed,

    #[error("{0}")]
    GeolocationDenied(GeolocationFailure),
}

impl ErrorKind {
    /// Classify a non-success status from the current-conditions request.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimited,
            _ => ErrorKind::FetchFailed,
        }
    }

    /// The user-facing message for this kind.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<GeolocationFailure> for ErrorKind {
    fn from(value: GeolocationFailure) -> Self {
        ErrorKind::GeolocationDenied(value)
    }
}

/// Why the geolocation capability produced no reading.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationFailure {
    #[error("Could not get your location. Please check permissions.")]
    PermissionDenied,

    #[error("Geolocation is not supported by your browser")]
    Unsupported,
}

/// Failure of a single HTTP exchange with the weather API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("weather API responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request to weather API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather API response is missing `{0}`")]
    Incomplete(&'static str),
}

impl FetchError {
    /// Map a current-conditions failure onto the user-facing taxonomy.
    pub fn classify(&self) -> ErrorKind {
        match self {
            FetchError::Status { status, .. } => ErrorKind::from_status(*status),
            FetchError::Transport(_) | FetchError::Decode(_) | FetchError::Incomplete(_) => {
                ErrorKind::FetchFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_statuses() {
        assert_eq!(ErrorKind::from_status(StatusCode::UNAUTHORIZED), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(StatusCode::TOO_MANY_REQUESTS), ErrorKind::RateLimited);
    }

    #[test]
    fn other_statuses_are_fetch_failures() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::FORBIDDEN,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert_eq!(ErrorKind::from_status(status), ErrorKind::FetchFailed, "{status}");
        }
    }

    #[test]
    fn messages_match_banner_text() {
        assert_eq!(ErrorKind::EmptyInput.message(), "Please enter a city name");
        assert_eq!(ErrorKind::Unauthorized.message(), "Invalid API Key");
        assert_eq!(ErrorKind::NotFound.message(), "City not found");
        assert_eq!(ErrorKind::RateLimited.message(), "Too many requests");
        assert_eq!(ErrorKind::FetchFailed.message(), "Failed to load weather data");
        assert_eq!(
            ErrorKind::from(GeolocationFailure::PermissionDenied).message(),
            "Could not get your location. Please check permissions."
        );
        assert_eq!(
            ErrorKind::from(GeolocationFailure::Unsupported).message(),
            "Geolocation is not supported by your browser"
        );
    }

    #[test]
    fn decode_failure_classifies_as_fetch_failed() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(FetchError::from(err).classify(), ErrorKind::FetchFailed);
    }

    #[test]
    fn status_failure_classifies_by_status() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            body: "{}".into(),
        };
        assert_eq!(err.classify(), ErrorKind::NotFound);
    }
}
