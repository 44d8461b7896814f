// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-position sources.
//!
//! A position request resolves exactly once. Failures are not retried; the
//! session substitutes [`FALLBACK_COORDS`] instead.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use crate::models::Coords;

/// Position used when no geolocation is available (Tehran).
pub const FALLBACK_COORDS: Coords = Coords::new(35.715298, 51.404343);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A source of the user's current position.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Coords, GeolocationError>> + Send;
}

/// Geolocator with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: Option<Coords>,
}

impl FixedGeolocator {
    pub fn at(position: Coords) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A geolocator that always fails.
    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coords, GeolocationError> {
        self.position.ok_or(GeolocationError::Unavailable)
    }
}

/// IP-based geolocation over HTTP.
///
/// Expects a JSON body with `lat` and `lon` fields (ip-api.com format).
#[derive(Clone)]
pub struct HttpGeolocator {
    http: reqwest::Client,
    url: String,
}

/// Position lookup response.
#[derive(Debug, Deserialize)]
struct PositionResponse {
    lat: f64,
    lon: f64,
}

impl HttpGeolocator {
    pub fn new(url: impl Into<String>) -> Result<Self, GeolocationError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeolocationError::Request(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl Geolocator for HttpGeolocator {
    async fn current_position(&self) -> Result<Coords, GeolocationError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Request(format!("status {}", status)));
        }

        let body: PositionResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Decode(e.to_string()))?;

        Ok(Coords::new(body.lat, body.lon))
    }
}

/// Errors from position lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation unavailable")]
    Unavailable,

    #[error("Geolocation request failed: {0}")]
    Request(String),

    #[error("Failed to decode geolocation response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_geolocator() {
        let coords = Coords::new(37.33, -122.03);
        assert_eq!(
            FixedGeolocator::at(coords).current_position().await,
            Ok(coords)
        );
        assert_eq!(
            FixedGeolocator::unavailable().current_position().await,
            Err(GeolocationError::Unavailable)
        );
    }

    #[test]
    fn test_position_response_parsing() {
        let body = r#"{"status":"success","country":"Iran","lat":35.6892,"lon":51.389}"#;
        let parsed: PositionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.lat, 35.6892);
        assert_eq!(parsed.lon, 51.389);
    }

    #[tokio::test]
    async fn test_http_geolocator_unreachable_host_fails() {
        // Port 9 (discard) on localhost is closed in test environments.
        let geolocator = HttpGeolocator::new("http://127.0.0.1:9/json").unwrap();
        assert!(matches!(
            geolocator.current_position().await,
            Err(GeolocationError::Request(_))
        ));
    }
}
