// src/services/google_places_client.rs
// DOCUMENTATION: Google Maps API client (Places + Geocoding)
// PURPOSE: Handle communication with the mapping provider for listing data

use crate::errors::ServicesError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

/// Google Maps API client
/// DOCUMENTATION: Handles authentication and API calls to Places and Geocoding
#[derive(Clone)]
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for the Places API
    places_url: String,
    /// Base URL for the Geocoding API
    geocode_url: String,
}

/// Response envelope from Places searches
#[derive(Debug, Deserialize, Serialize)]
pub struct GooglePlacesResponse {
    /// Results array from API
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    /// Status of the API call
    pub status: String,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

/// Individual place from the Places API
/// DOCUMENTATION: Every field is optional except place_id - the upstream
/// payloads are not trustworthy enough to make anything else required
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    #[serde(default)]
    pub place_id: String,
    /// Place name
    pub name: Option<String>,
    /// Place types array (e.g., ["veterinary_care", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,
    /// Geographic location
    pub geometry: Option<GoogleGeometry>,
    /// Formatted address (detailed, from Place Details / Text Search)
    pub formatted_address: Option<String>,
    /// Vicinity (short address, from Nearby Search)
    pub vicinity: Option<String>,
    /// Rating (0-5)
    pub rating: Option<f32>,
    /// Number of user ratings
    pub user_ratings_total: Option<i32>,
    /// Price level (0-4: free to very expensive)
    pub price_level: Option<i32>,
    /// Business status (OPERATIONAL, CLOSED_TEMPORARILY, etc.)
    pub business_status: Option<String>,
    /// Opening hours metadata
    pub opening_hours: Option<GoogleOpeningHours>,
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    /// Phone number (international format)
    pub international_phone_number: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Google Maps URL
    pub url: Option<String>,
    /// User reviews (from Place Details)
    pub reviews: Option<Vec<GoogleReview>>,
}

/// Geographic location from Google
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleGeometry {
    /// Location coordinates
    pub location: GoogleLocation,
}

/// Coordinates from Google
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GoogleLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Opening hours metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    /// Whether place is currently open
    pub open_now: Option<bool>,
    /// Detailed regular opening hours
    pub weekday_text: Option<Vec<String>>,
}

/// Review from Place Details
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleReview {
    /// Review author name
    pub author_name: Option<String>,
    /// Rating (1-5)
    pub rating: Option<i32>,
    /// Review text
    pub text: Option<String>,
    /// Time of review (Unix timestamp)
    pub time: Option<i64>,
    /// Relative time description (e.g., "a month ago")
    pub relative_time_description: Option<String>,
}

impl GooglePlacesClient {
    /// Create new Google Maps API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            places_url: DEFAULT_PLACES_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
        }
    }

    /// Create a client against alternative base URLs
    /// Used by tests to point at a local mock server
    #[allow(dead_code)]
    pub fn with_base_urls(api_key: String, places_url: String, geocode_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            places_url,
            geocode_url,
        }
    }

    /// Perform nearby search for places
    /// DOCUMENTATION: Searches for places near a geographic point
    ///
    /// # Arguments
    /// * `latitude` - Center point latitude
    /// * `longitude` - Center point longitude
    /// * `radius` - Search radius in meters (max 50000)
    /// * `place_type` - Optional type filter (e.g., "veterinary_care")
    /// * `keyword` - Optional keyword search
    pub async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        place_type: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<GooglePlace>, ServicesError> {
        let url = format!("{}/nearbysearch/json", self.places_url);

        let mut params = HashMap::new();
        params.insert("location", format!("{},{}", latitude, longitude));
        params.insert("radius", radius.to_string());
        params.insert("key", self.api_key.clone());

        if let Some(pt) = place_type.filter(|pt| !pt.is_empty()) {
            params.insert("type", pt.to_string());
        }

        if let Some(kw) = keyword.filter(|kw| !kw.is_empty()) {
            params.insert("keyword", kw.to_string());
        }

        log::debug!(
            "Places nearby search: lat={}, lng={}, radius={}",
            latitude,
            longitude,
            radius
        );

        self.run_search(&url, &params).await
    }

    /// Perform free-text search for places
    /// DOCUMENTATION: Text search, optionally biased towards a location
    ///
    /// # Arguments
    /// * `query` - Free-text search query
    /// * `bias` - Optional (lat, lng) to bias results towards
    /// * `radius` - Bias radius in meters (only used with `bias`)
    pub async fn text_search(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
        radius: u32,
    ) -> Result<Vec<GooglePlace>, ServicesError> {
        let url = format!("{}/textsearch/json", self.places_url);

        let mut params = HashMap::new();
        params.insert("query", query.to_string());
        params.insert("key", self.api_key.clone());

        if let Some((lat, lng)) = bias {
            params.insert("location", format!("{},{}", lat, lng));
            params.insert("radius", radius.to_string());
        }

        log::debug!("Places text search: query={:?}, bias={:?}", query, bias);

        self.run_search(&url, &params).await
    }

    /// Shared request/status handling for nearby and text search
    async fn run_search(
        &self,
        url: &str,
        params: &HashMap<&str, String>,
    ) -> Result<Vec<GooglePlace>, ServicesError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places API request failed: {}", e);
                ServicesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Places API error {}: {}", status, body);
            return Err(ServicesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: GooglePlacesResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Places response: {}", e);
            ServicesError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        // Check API response status
        match api_response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                log::info!(
                    "Places search returned {} results",
                    api_response.results.len()
                );
                Ok(api_response.results)
            }
            "OVER_QUERY_LIMIT" => {
                log::error!("Places API quota exceeded");
                Err(ServicesError::RateLimitExceeded)
            }
            "REQUEST_DENIED" | "INVALID_REQUEST" => {
                let msg = api_response
                    .error_message
                    .unwrap_or_else(|| "Unknown error".to_string());
                log::error!("Places API request denied: {}", msg);
                Err(ServicesError::ExternalApiError(msg))
            }
            other => {
                let msg = api_response
                    .error_message
                    .unwrap_or_else(|| format!("Unknown status: {}", other));
                log::error!("Places API unexpected status: {}", msg);
                Err(ServicesError::ExternalApiError(msg))
            }
        }
    }

    /// Get detailed information about a specific place
    /// DOCUMENTATION: Retrieves detailed place information by place_id
    pub async fn get_place_details(&self, place_id: &str) -> Result<GooglePlace, ServicesError> {
        let url = format!("{}/details/json", self.places_url);

        let params = [
            ("place_id", place_id),
            ("key", &self.api_key),
            // Only request the fields the normalizer consumes
            ("fields", "name,place_id,geometry,formatted_address,vicinity,rating,user_ratings_total,price_level,types,business_status,opening_hours,formatted_phone_number,international_phone_number,website,url,reviews"),
        ];

        log::debug!("Place details lookup: place_id={}", place_id);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Place details request failed: {}", e);
                ServicesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ServicesError::ExternalApiError(
                "Details request failed".to_string(),
            ));
        }

        #[derive(Deserialize)]
        struct DetailsResponse {
            result: Option<GooglePlace>,
            status: String,
        }

        let api_response: DetailsResponse = response
            .json()
            .await
            .map_err(|e| ServicesError::ExternalApiError(format!("Parse error: {}", e)))?;

        if api_response.status == "OK" {
            api_response.result.ok_or_else(|| {
                ServicesError::ExternalApiError("Details response missing result".to_string())
            })
        } else {
            Err(ServicesError::ExternalApiError(format!(
                "Details status: {}",
                api_response.status
            )))
        }
    }

    /// Geocode a free-text address or city name
    /// DOCUMENTATION: Returns the first candidate's coordinates, or None
    /// when the provider reports zero candidates
    pub async fn geocode(&self, address: &str) -> Result<Option<(f64, f64)>, ServicesError> {
        let url = format!("{}/json", self.geocode_url);

        let params = [("address", address), ("key", &self.api_key)];

        log::debug!("Geocoding lookup: address={:?}", address);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Geocoding request failed: {}", e);
                ServicesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(ServicesError::ExternalApiError(
                "Geocoding request failed".to_string(),
            ));
        }

        #[derive(Deserialize)]
        struct GeocodeCandidate {
            geometry: GoogleGeometry,
        }

        #[derive(Deserialize)]
        struct GeocodeResponse {
            #[serde(default)]
            results: Vec<GeocodeCandidate>,
            status: String,
        }

        let api_response: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ServicesError::ExternalApiError(format!("Parse error: {}", e)))?;

        match api_response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(api_response
                .results
                .first()
                .map(|c| (c.geometry.location.lat, c.geometry.location.lng))),
            "OVER_QUERY_LIMIT" => Err(ServicesError::RateLimitExceeded),
            other => {
                log::error!("Geocoding unexpected status: {}", other);
                Err(ServicesError::ExternalApiError(format!(
                    "Geocoding status: {}",
                    other
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Client pointed at a local mock server
    fn test_client(server: &MockServer) -> GooglePlacesClient {
        GooglePlacesClient::with_base_urls(
            "test-key".to_string(),
            format!("{}/place", server.uri()),
            format!("{}/geocode", server.uri()),
        )
    }

    fn one_place_json() -> serde_json::Value {
        json!({
            "status": "OK",
            "results": [{
                "place_id": "ChIJvet01",
                "name": "Klinik Hewan Kemang",
                "types": ["veterinary_care", "point_of_interest"],
                "geometry": { "location": { "lat": -6.26, "lng": 106.81 } },
                "vicinity": "Jl. Kemang Raya No. 8, Jakarta Selatan",
                "rating": 4.6,
                "user_ratings_total": 210
            }]
        })
    }

    #[tokio::test]
    async fn test_nearby_search_parses_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .and(query_param("type", "veterinary_care"))
            .and(query_param("keyword", "veterinary clinic pet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(one_place_json()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let places = client
            .nearby_search(
                -6.2088,
                106.8456,
                5000,
                Some("veterinary_care"),
                Some("veterinary clinic pet"),
            )
            .await
            .unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "ChIJvet01");
        assert_eq!(places[0].name.as_deref(), Some("Klinik Hewan Kemang"));
        assert_eq!(places[0].rating, Some(4.6));
    }

    #[tokio::test]
    async fn test_zero_results_is_ok_and_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/place/textsearch/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let places = client.text_search("pet shop in nowhere", None, 5000).await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_request_denied_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "results": [],
                "error_message": "The provided API key is invalid"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.nearby_search(-6.2, 106.8, 5000, None, None).await;
        assert!(matches!(result, Err(ServicesError::ExternalApiError(_))));
    }

    #[tokio::test]
    async fn test_over_query_limit_maps_to_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/place/nearbysearch/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "OVER_QUERY_LIMIT", "results": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.nearby_search(-6.2, 106.8, 5000, None, None).await;
        assert!(matches!(result, Err(ServicesError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_geocode_returns_first_candidate() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "Depok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    { "geometry": { "location": { "lat": -6.4025, "lng": 106.7942 } } },
                    { "geometry": { "location": { "lat": -1.0, "lng": 1.0 } } }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let coords = client.geocode("Depok").await.unwrap();
        assert_eq!(coords, Some((-6.4025, 106.7942)));
    }

    #[tokio::test]
    async fn test_geocode_zero_candidates_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let coords = client.geocode("Nonexistent City Name Xyz").await.unwrap();
        assert!(coords.is_none());
    }
}
