// src/platforms/google_maps.rs
// DOCUMENTATION: Google Maps platform adapter
// PURPOSE: The one real integration - resolves a location, queries the
// Places API and normalizes results into canonical records

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::models::category;
use crate::models::{ExternalReview, ExternalService, ServiceSource};
use crate::platforms::PlatformAdapter;
use crate::services::category_mapper;
use crate::services::geocoding::CoordinateResolver;
use crate::services::normalizer::{self, GOOGLE_ID_PREFIX};
use crate::services::GooglePlacesClient;

pub struct GoogleMapsPlatform {
    client: GooglePlacesClient,
    resolver: CoordinateResolver,
    enabled: bool,
    radius_m: u32,
}

impl GoogleMapsPlatform {
    /// DOCUMENTATION: The platform is constructed disabled when no API key
    /// is configured, so the aggregator silently skips it
    pub fn new(client: GooglePlacesClient, enabled: bool, radius_m: u32) -> Self {
        let resolver = CoordinateResolver::new(client.clone());
        Self {
            client,
            resolver,
            enabled,
            radius_m,
        }
    }

    /// Nearby query when coordinates resolve, text query otherwise
    async fn query_by_category(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<ExternalService>, crate::errors::ServicesError> {
        let place_type = category_mapper::provider_place_type(category);
        let keyword = category_mapper::provider_keyword(category);

        let places = match self.resolver.resolve(location).await {
            Some(coords) => {
                self.client
                    .nearby_search(
                        coords.lat,
                        coords.lng,
                        self.radius_m,
                        Some(place_type),
                        Some(keyword),
                    )
                    .await?
            }
            None => {
                // No coordinates to anchor a nearby search; fall back to a
                // location-qualified text query so the source still answers
                let query = if location.trim().is_empty() {
                    keyword.to_string()
                } else {
                    format!("{} in {}", keyword, location.trim())
                };
                self.client.text_search(&query, None, self.radius_m).await?
            }
        };

        let hint = (category != category::ALL).then_some(category);
        Ok(places
            .iter()
            .map(|p| normalizer::normalize_place(p, None, hint))
            .collect())
    }

    async fn query_by_text(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<ExternalService>, crate::errors::ServicesError> {
        let bias = match location {
            Some(loc) => self.resolver.resolve(loc).await.map(|c| (c.lat, c.lng)),
            None => None,
        };

        let places = self.client.text_search(query, bias, self.radius_m).await?;

        let hint = match category {
            Some(c) if c != category::ALL && !c.is_empty() => c,
            _ => category_mapper::infer_category_from_query(query),
        };

        Ok(places
            .iter()
            .map(|p| normalizer::normalize_place(p, None, Some(hint)))
            .collect())
    }
}

#[async_trait]
impl PlatformAdapter for GoogleMapsPlatform {
    fn name(&self) -> &'static str {
        "Google Maps"
    }

    fn source(&self) -> ServiceSource {
        ServiceSource::GoogleMaps
    }

    fn id_prefix(&self) -> &'static str {
        GOOGLE_ID_PREFIX
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch_services(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<ExternalService>> {
        match self.query_by_category(category, location).await {
            Ok(services) => Ok(services),
            Err(e) => {
                log::warn!("[{}] fetch failed: {}", self.name(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn search_services(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<ExternalService>> {
        match self.query_by_text(query, category, location).await {
            Ok(services) => Ok(services),
            Err(e) => {
                log::warn!("[{}] search failed: {}", self.name(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_reviews(&self, service_id: &str) -> Result<Vec<ExternalReview>> {
        let Some(place_id) = service_id.strip_prefix(GOOGLE_ID_PREFIX) else {
            return Ok(Vec::new());
        };

        let details = match self.client.get_place_details(place_id).await {
            Ok(details) => details,
            Err(e) => {
                log::warn!("[{}] review fetch failed for {}: {}", self.name(), service_id, e);
                return Ok(Vec::new());
            }
        };

        let reviews = details
            .reviews
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| {
                let rating = r.rating? as f32;
                Some(ExternalReview {
                    author: r.author_name,
                    rating,
                    text: r.text,
                    posted_at: r
                        .time
                        .and_then(|t| Utc.timestamp_opt(t, 0).single())
                        .unwrap_or_else(Utc::now),
                    source: ServiceSource::GoogleMaps,
                })
            })
            .collect();

        Ok(reviews)
    }
}
