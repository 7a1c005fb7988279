// src/services/geocoding.rs
// DOCUMENTATION: City-name to coordinate resolution
// PURPOSE: Resolve free-text locations into lat/lng for nearby searches

use crate::services::GooglePlacesClient;

/// A resolved coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Look up a known city centroid
/// DOCUMENTATION: Fixed table of the major Indonesian cities that dominate
/// real traffic - a table hit avoids a geocoding call entirely
///
/// # Arguments
/// * `name` - City name (case-insensitive)
pub fn known_city_coordinates(name: &str) -> Option<Coordinates> {
    let city = name.trim().to_lowercase();

    match city.as_str() {
        "jakarta" => Some(Coordinates {
            lat: -6.2088,
            lng: 106.8456,
        }),
        "surabaya" => Some(Coordinates {
            lat: -7.2575,
            lng: 112.7521,
        }),
        "bandung" => Some(Coordinates {
            lat: -6.9175,
            lng: 107.6191,
        }),
        "medan" => Some(Coordinates {
            lat: 3.5952,
            lng: 98.6722,
        }),
        "semarang" => Some(Coordinates {
            lat: -6.9932,
            lng: 110.4203,
        }),
        "yogyakarta" => Some(Coordinates {
            lat: -7.7956,
            lng: 110.3695,
        }),
        _ => None,
    }
}

/// Coordinate resolver with geocoding fallback
/// DOCUMENTATION: Known cities resolve from the static table with zero
/// network calls; anything else triggers a single geocoding request.
/// Never fails - callers treat None as "proceed without a location filter".
#[derive(Clone)]
pub struct CoordinateResolver {
    client: GooglePlacesClient,
}

impl CoordinateResolver {
    pub fn new(client: GooglePlacesClient) -> Self {
        Self { client }
    }

    /// Resolve a free-text location to coordinates
    ///
    /// Returns None on empty input, geocoding failure, non-success provider
    /// status, or an empty candidate list.
    pub async fn resolve(&self, location: &str) -> Option<Coordinates> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(coords) = known_city_coordinates(trimmed) {
            return Some(coords);
        }

        match self.client.geocode(trimmed).await {
            Ok(Some((lat, lng))) => Some(Coordinates { lat, lng }),
            Ok(None) => {
                log::debug!("Geocoding returned no candidates for {:?}", trimmed);
                None
            }
            Err(e) => {
                log::warn!("Geocoding failed for {:?}: {}", trimmed, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities_resolve_deterministically() {
        let jakarta = known_city_coordinates("jakarta").unwrap();
        assert_eq!(jakarta.lat, -6.2088);
        assert_eq!(jakarta.lng, 106.8456);

        for city in [
            "jakarta",
            "surabaya",
            "bandung",
            "medan",
            "semarang",
            "yogyakarta",
        ] {
            assert!(known_city_coordinates(city).is_some(), "missing {}", city);
        }
    }

    #[test]
    fn test_known_city_case_insensitive() {
        let a = known_city_coordinates("JAKARTA").unwrap();
        let b = known_city_coordinates("jakarta").unwrap();
        let c = known_city_coordinates("Jakarta").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_known_city_trims_whitespace() {
        assert!(known_city_coordinates("  bandung  ").is_some());
    }

    #[test]
    fn test_unknown_city_misses_table() {
        assert!(known_city_coordinates("Nonexistent City Name Xyz").is_none());
    }

    #[tokio::test]
    async fn test_resolve_known_city_makes_no_network_call() {
        // Client pointed at an unroutable address - a table hit must never
        // touch the network, so this resolves instantly
        let client = GooglePlacesClient::with_base_urls(
            String::new(),
            "http://127.0.0.1:1/place".to_string(),
            "http://127.0.0.1:1/geocode".to_string(),
        );
        let resolver = CoordinateResolver::new(client);

        let coords = resolver.resolve("Jakarta").await.unwrap();
        assert_eq!(coords.lat, -6.2088);
        assert_eq!(coords.lng, 106.8456);
    }

    #[tokio::test]
    async fn test_resolve_empty_location_is_none() {
        let client = GooglePlacesClient::with_base_urls(
            String::new(),
            "http://127.0.0.1:1/place".to_string(),
            "http://127.0.0.1:1/geocode".to_string(),
        );
        let resolver = CoordinateResolver::new(client);
        assert!(resolver.resolve("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_unknown_city_issues_one_geocoding_call() {
        use serde_json::json;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GooglePlacesClient::with_base_urls(
            "test-key".to_string(),
            format!("{}/place", server.uri()),
            format!("{}/geocode", server.uri()),
        );
        let resolver = CoordinateResolver::new(client);

        let result = resolver.resolve("Nonexistent City Name Xyz").await;
        assert!(result.is_none());
        // the mounted expectation verifies exactly one call on drop
    }

    #[tokio::test]
    async fn test_resolve_geocoding_error_is_none() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::with_base_urls(
            "test-key".to_string(),
            format!("{}/place", server.uri()),
            format!("{}/geocode", server.uri()),
        );
        let resolver = CoordinateResolver::new(client);

        assert!(resolver.resolve("Some Failing Place").await.is_none());
    }
}
