// src/platforms/shopee.rs
// DOCUMENTATION: Shopee platform adapter (mock)
// PURPOSE: Marketplace storefronts with the largest review volumes in the
// mock fleet; verification is common but less so than Tokopedia

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::models::category;
use crate::models::{ExternalReview, ExternalService, ServiceSource};
use crate::platforms::PlatformAdapter;
use crate::services::category_mapper;

const ID_PREFIX: &str = "shp-";

const STORE_NAMES: [&str; 6] = [
    "PetCare Official Shop",
    "Lucky Paw Mart",
    "Anabul Corner",
    "Pet Haven ID",
    "Kitty City Store",
    "Bark Avenue",
];

pub struct ShopeePlatform;

impl ShopeePlatform {
    pub fn new() -> Self {
        Self
    }

    fn store_slug(name: &str) -> String {
        name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
    }

    fn synthesize(&self, category_id: &str, location: &str) -> Vec<ExternalService> {
        let mut rng = rand::rng();
        let now = Utc::now();
        let millis = now.timestamp_millis();

        let city = if location.trim().is_empty() {
            "Jakarta".to_string()
        } else {
            location.trim().to_string()
        };

        let count = rng.random_range(3..=5);
        (0..count)
            .map(|i| {
                let base = STORE_NAMES[rng.random_range(0..STORE_NAMES.len())];
                let slug = Self::store_slug(base);
                let nonce = Uuid::new_v4().simple().to_string();

                ExternalService {
                    id: format!("{}{}-{}-{}", ID_PREFIX, millis, i, &nonce[..8]),
                    name: format!("{} | {}", base, category::label(category_id)),
                    address: Some(format!("Gudang {}, {}", rng.random_range(1..20), city)),
                    city: Some(city.clone()),
                    category_id: category_id.to_string(),
                    contact_phone: None,
                    website: None,
                    operating_hours: Some("24 jam (toko online)".to_string()),
                    price_range: rng.random_range(1..=2),
                    latitude: None,
                    longitude: None,
                    verified: rng.random_bool(0.65),
                    avg_rating: Some((rng.random_range(40..=50) as f32) / 10.0),
                    review_count: Some(rng.random_range(100..5000)),
                    source: ServiceSource::Shopee,
                    external_id: Some(slug.clone()),
                    external_url: Some(format!("https://shopee.co.id/{}", slug)),
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect()
    }
}

impl Default for ShopeePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for ShopeePlatform {
    fn name(&self) -> &'static str {
        "Shopee"
    }

    fn source(&self) -> ServiceSource {
        ServiceSource::Shopee
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
        Ok(Vec::new())
    }
}
