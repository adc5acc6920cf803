use thiserror::Error;

/// Every failure the client can surface to a view.
///
/// None of these are retried automatically; the view that started the
/// operation decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClimaError {
    #[error("Invalid credentials")]
    Auth,

    #[error("Failed to fetch weather data: {0}")]
    WeatherUnavailable(String),

    #[error("Failed to get AI response: {0}")]
    GuidanceUnavailable(String),

    #[error("Location access denied")]
    LocationDenied,

    #[error("Geolocation not supported")]
    LocationUnsupported,

    #[error("Backend server is not running. Please start the server at {0}")]
    BackendUnreachable(String),

    #[error("Server error occurred. Please try again.")]
    ServerError(u16),

    #[error("Invalid request format.")]
    MalformedRequest,

    #[error("Failed to send message. Please check your connection and try again.")]
    ChatFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClimaError {
    /// Location and weather failures take over the whole dashboard; the rest
    /// leave already fetched data on screen.
    pub fn blocks_dashboard(&self) -> bool {
        matches!(
            self,
            Self::LocationDenied | Self::LocationUnsupported | Self::WeatherUnavailable(_)
        )
    }
}

pub type ClimaResult<T> = Result<T, ClimaError>;
