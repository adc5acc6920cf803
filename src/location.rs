use std::time::Duration;

use async_trait::async_trait;

use crate::api::models::Coordinates;
use crate::app::LocationConfig;
use crate::error::{ClimaError, ClimaResult};

pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of device coordinates for a fetch cycle.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> ClimaResult<Coordinates>;
}

/// Coordinates from the config file. Desktops have no portable geolocation,
/// so this is the default source.
#[derive(Debug, Clone)]
pub struct ConfiguredLocator {
    config: LocationConfig,
}

impl ConfiguredLocator {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Locator for ConfiguredLocator {
    async fn locate(&self) -> ClimaResult<Coordinates> {
        if !self.config.enabled {
            return Err(ClimaError::LocationDenied);
        }
        match (self.config.latitude, self.config.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(ClimaError::LocationUnsupported),
        }
    }
}

/// Run a locator under the acquisition timeout. Timing out counts as denied.
pub async fn acquire(locator: &dyn Locator) -> ClimaResult<Coordinates> {
    match tokio::time::timeout(LOCATION_TIMEOUT, locator.locate()).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("location lookup timed out after {:?}", LOCATION_TIMEOUT);
            Err(ClimaError::LocationDenied)
        }
    }
}
