// src/platforms/instagram.rs
// DOCUMENTATION: Instagram platform adapter (mock)
// PURPOSE: Synthesizes plausible pet-business listings until a real
// Instagram integration exists. Shape is deterministic, content is not.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::models::category;
use crate::models::{ExternalReview, ExternalService, ServiceSource};
use crate::platforms::PlatformAdapter;
use crate::services::category_mapper;

const ID_PREFIX: &str = "ig-";

const NAMES: [&str; 6] = [
    "Paws & Whiskers",
    "Furry Friends ID",
    "Happy Tails Studio",
    "The Pet Project",
    "Pawsome Care",
    "Golden Leash",
];

const STREETS: [&str; 4] = [
    "Jl. Kemang Raya",
    "Jl. Senopati",
    "Jl. Tebet Barat Dalam",
    "Jl. Cipete Raya",
];

pub struct InstagramPlatform;

impl InstagramPlatform {
    pub fn new() -> Self {
        Self
    }

    /// Instagram businesses are reachable through their handle, not a website
    fn handle(name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        format!("{}.id", slug)
    }

    fn synthesize(&self, category_id: &str, location: &str) -> Vec<ExternalService> {
        let mut rng = rand::rng();
        let now = Utc::now();
        let millis = now.timestamp_millis();

        let city = match location.trim() {
            "" => "Jakarta",
            loc => loc,
        };

        let count = rng.random_range(3..=5);
        (0..count)
            .map(|i| {
                let base = NAMES[rng.random_range(0..NAMES.len())];
                let name = format!("{} {}", base, category::label(category_id));
                let handle = Self::handle(base);
                let nonce = Uuid::new_v4().simple().to_string();

                ExternalService {
                    id: format!("{}{}-{}-{}", ID_PREFIX, millis, i, &nonce[..8]),
                    name,
                    address: Some(format!(
                        "{} No. {}, {}",
                        STREETS[rng.random_range(0..STREETS.len())],
                        rng.random_range(1..99),
                        city
                    )),
                    city: Some(city.to_string()),
                    category_id: category_id.to_string(),
                    contact_phone: Some(format!(
                        "+62 812-{:04}-{:04}",
                        rng.random_range(0..10000),
                        rng.random_range(0..10000)
                    )),
                    website: None,
                    operating_hours: Some("By appointment (DM to book)".to_string()),
                    // Instagram sellers lean towards boutique pricing
                    price_range: rng.random_range(1..=3),
                    latitude: None,
                    longitude: None,
                    // Few accounts carry the verified badge
                    verified: rng.random_bool(0.35),
                    avg_rating: Some((rng.random_range(40..=50) as f32) / 10.0),
                    review_count: Some(rng.random_range(10..250)),
                    source: ServiceSource::Instagram,
                    external_id: Some(handle.clone()),
                    external_url: Some(format!("https://instagram.com/{}", handle)),
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect()
    }
}

impl Default for InstagramPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for InstagramPlatform {
    fn name(&self) -> &'static str {
        "Instagram"
    }

    fn source(&self) -> ServiceSource {
        ServiceSource::Instagram
    }

    fn id_prefix(&self) -> &'static str {
        ID_PREFIX
    }

    async fn fetch_services(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<ExternalService>> {
        let category_id = if category == category::ALL || category.is_empty() {
            category::PET_SHOPS
        } else {
            category
        };
        Ok(self.synthesize(category_id, location))
    }

    async fn search_services(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<ExternalService>> {
        let category_id = match category {
            Some(c) if c != category::ALL && !c.is_empty() => c,
            _ => category_mapper::infer_category_from_query(query),
        };
        Ok(self.synthesize(category_id, location.unwrap_or("")))
    }

    async fn fetch_reviews(&self, _service_id: &str) -> Result<Vec<ExternalReview>> {
        // Instagram has no review surface to pull from
        Ok(Vec::new())
    }
}
