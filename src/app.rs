use directories::BaseDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::error::{ClimaError, ClimaResult};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const BACKEND_URL_ENV: &str = "CLIMACARE_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// When false, every location request is refused.
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self { enabled: true, latitude: None, longitude: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub location: LocationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            location: LocationConfig::default(),
        }
    }
}

impl AppConfig {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("climacare.toml"))
    }

    /// Read the config file and environment once at startup. Never fails:
    /// anything unusable falls back to defaults with a warning.
    pub fn load() -> Self {
        let text = Self::toml_path().and_then(|path| {
            let text = fs::read_to_string(&path).ok()?;
            info!("loading config from {}", path.display());
            Some(text)
        });
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        Self::from_sources(text.as_deref(), env_url.as_deref())
    }

    pub fn from_sources(file: Option<&str>, env_url: Option<&str>) -> Self {
        let mut config = match file.map(toml::from_str::<AppConfig>) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!("ignoring malformed config: {}", e);
                Self::default()
            }
            None => Self::default(),
        };
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.base_url = url.to_string();
        }
        match normalize_url(&config.base_url) {
            Ok(url) => config.base_url = url,
            Err(e) => {
                warn!("{}; using {}", e, DEFAULT_BACKEND_URL);
                config.base_url = DEFAULT_BACKEND_URL.to_string();
            }
        }
        config
    }
}

/// Add a scheme when missing, drop trailing slashes, and check the result
/// parses as an http(s) URL. Scheme and host come back lowercased.
pub fn normalize_url(input: &str) -> ClimaResult<String> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClimaError::Config("empty backend URL".into()));
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let url = Url::parse(&candidate)
        .map_err(|e| ClimaError::Config(format!("invalid backend URL {:?}: {}", input, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClimaError::Config(format!(
            "unsupported scheme {:?} in backend URL {:?}",
            url.scheme(),
            input
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_env() {
        let config = AppConfig::from_sources(None, None);
        assert_eq!(config, AppConfig::default());
        assert!(config.location.enabled);
    }

    #[test]
    fn file_values_are_read() {
        let file = r#"
            base_url = "http://10.0.0.5:8000/"

            [location]
            latitude = 12.9
            longitude = 77.6
        "#;
        let config = AppConfig::from_sources(Some(file), None);
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.location.latitude, Some(12.9));
        assert!(config.location.enabled);
    }

    #[test]
    fn env_overrides_file() {
        let file = r#"base_url = "http://10.0.0.5:8000""#;
        let config = AppConfig::from_sources(Some(file), Some("api.climacare.example"));
        assert_eq!(config.base_url, "https://api.climacare.example");
    }

    #[test]
    fn malformed_file_falls_back() {
        let config = AppConfig::from_sources(Some("base_url = ["), None);
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(normalize_url("   ").is_err());
        assert!(normalize_url("http://exa mple.com").is_err());
        assert!(normalize_url("ftp://files.example").is_err());
        assert_eq!(normalize_url("localhost:8000").unwrap(), "https://localhost:8000");
    }

    #[test]
    fn uppercase_scheme_is_not_doubled() {
        assert_eq!(normalize_url("HTTP://10.0.0.5:8000").unwrap(), "http://10.0.0.5:8000");
        assert_eq!(normalize_url("Https://Api.Example/v1/").unwrap(), "https://api.example/v1");

        let config = AppConfig::from_sources(Some(r#"base_url = "HTTP://10.0.0.5:8000""#), None);
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
    }
}
