// src/platforms/tokopedia.rs
// DOCUMENTATION: Tokopedia platform adapter (mock)
// PURPOSE: Marketplace storefronts - high review volume, official-store
// verification is common, pricing sits in the budget tiers

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::models::category;
use crate::models::{ExternalReview, ExternalService, ServiceSource};
use crate::platforms::PlatformAdapter;
use crate::services::category_mapper;

const ID_PREFIX: &str = "tkp-";

const SHOP_NAMES: [&str; 6] = [
    "Toko Hewan Makmur",
    "PetShop Central",
    "Anabul Store",
    "Meow & Woof Supplies",
    "Satwa Sejahtera",
    "Raja Pet Mart",
];

pub struct TokopediaPlatform;

impl TokopediaPlatform {
    pub fn new() -> Self {
        Self
    }

    fn shop_slug(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
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
                let base = SHOP_NAMES[rng.random_range(0..SHOP_NAMES.len())];
                let slug = Self::shop_slug(base);
                let nonce = Uuid::new_v4().simple().to_string();

                ExternalService {
                    id: format!("{}{}-{}-{}", ID_PREFIX, millis, i, &nonce[..8]),
                    name: format!("{} ({})", base, category::label(category_id)),
                    // Marketplace sellers publish a warehouse city, not a street
                    address: Some(format!("Dikirim dari {}", city)),
                    city: Some(city.clone()),
                    category_id: category_id.to_string(),
                    contact_phone: None,
                    website: None,
                    operating_hours: Some("09:00 - 21:00".to_string()),
                    price_range: rng.random_range(1..=2),
                    latitude: None,
                    longitude: None,
                    verified: rng.random_bool(0.75),
                    avg_rating: Some((rng.random_range(42..=50) as f32) / 10.0),
                    review_count: Some(rng.random_range(50..2000)),
                    source: ServiceSource::Tokopedia,
                    external_id: Some(slug.clone()),
                    external_url: Some(format!("https://tokopedia.com/{}", slug)),
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect()
    }
}

impl Default for TokopediaPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for TokopediaPlatform {
    fn name(&self) -> &'static str {
        "Tokopedia"
    }

    fn source(&self) -> ServiceSource {
        ServiceSource::Tokopedia
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
