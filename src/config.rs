//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::models::Coords;
use crate::services::geolocation::FALLBACK_COORDS;
use crate::services::session::{SessionOptions, DEFAULT_ZOOM};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the workout store
    pub store_dir: PathBuf,
    /// Zoom level for map bring-up and panning
    pub map_zoom: u8,
    /// Map center when geolocation is unavailable
    pub fallback_coords: Coords,
    /// IP geolocation endpoint; `None` disables geolocation
    pub geolocation_url: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            store_dir: PathBuf::from("data"),
            map_zoom: DEFAULT_ZOOM,
            fallback_coords: FALLBACK_COORDS,
            geolocation_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let fallback_coords = Coords::new(
            parse_var("FALLBACK_LAT", FALLBACK_COORDS.lat)?,
            parse_var("FALLBACK_LNG", FALLBACK_COORDS.lng)?,
        );

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            store_dir: env::var("WORKOUT_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            map_zoom: parse_var("MAP_ZOOM_LEVEL", DEFAULT_ZOOM)?,
            fallback_coords,
            geolocation_url: env::var("GEOLOCATION_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            zoom: self.map_zoom,
            fallback: self.fallback_coords,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, value.clone())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set env vars for test
        env::set_var("MAP_ZOOM_LEVEL", "15");
        env::set_var("FALLBACK_LAT", "37.33");
        env::set_var("GEOLOCATION_URL", "  ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.map_zoom, 15);
        assert_eq!(config.fallback_coords.lat, 37.33);
        assert_eq!(config.fallback_coords.lng, FALLBACK_COORDS.lng);
        assert_eq!(config.geolocation_url, None);

        env::set_var("MAP_ZOOM_LEVEL", "far");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAP_ZOOM_LEVEL", _))
        ));

        env::remove_var("MAP_ZOOM_LEVEL");
        env::remove_var("FALLBACK_LAT");
        env::remove_var("GEOLOCATION_URL");
    }

    #[test]
    fn test_default_session_options() {
        let options = Config::default().session_options();
        assert_eq!(options.zoom, 13);
        assert_eq!(options.fallback, FALLBACK_COORDS);
    }
}
