// src/models/service.rs
// DOCUMENTATION: Canonical external service record and persistence models
// PURPOSE: Defines the shape every platform adapter produces and the
// datastore row the import hook creates from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Origin platform of an external service record
/// DOCUMENTATION: Drives display badges and id-prefix routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSource {
    GoogleMaps,
    Instagram,
    Facebook,
    Tokopedia,
    Shopee,
    Internal,
    Other,
}

impl ServiceSource {
    /// Stable string form, used as the database column value
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceSource::GoogleMaps => "google_maps",
            ServiceSource::Instagram => "instagram",
            ServiceSource::Facebook => "facebook",
            ServiceSource::Tokopedia => "tokopedia",
            ServiceSource::Shopee => "shopee",
            ServiceSource::Internal => "internal",
            ServiceSource::Other => "other",
        }
    }
}

impl fmt::Display for ServiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical listing record produced by every platform adapter
/// DOCUMENTATION: Ephemeral - constructed fresh on every fetch/search call
/// and only persisted when a caller explicitly imports it.
///
/// Invariant: `id`, `name` are non-empty and `source` is always set. All
/// other fields are best-effort and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalService {
    /// Globally unique within one aggregated result set.
    /// Google-backed records derive it from the provider id ("gmaps-<place_id>")
    /// so repeated fetches collapse to the same id; mock records embed a
    /// timestamp and are not stable across calls.
    pub id: String,

    /// Display name (never empty)
    pub name: String,

    /// Street address as reported by the provider
    pub address: Option<String>,

    /// City, heuristically extracted from the address text (best-effort)
    pub city: Option<String>,

    /// Internal category id (see models::category)
    pub category_id: String,

    /// Contact phone in provider formatting
    pub contact_phone: Option<String>,

    /// Website URL
    pub website: Option<String>,

    /// Human-readable operating hours
    pub operating_hours: Option<String>,

    /// Price tier 1-4, defaulted per-source when the provider omits it
    pub price_range: i32,

    /// Coordinates, present only for geometry-bearing providers
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Whether the listing is considered verified on its platform
    pub verified: bool,

    /// Average rating on the provider's own scale
    pub avg_rating: Option<f32>,

    /// Number of reviews/ratings behind avg_rating
    pub review_count: Option<i32>,

    /// Origin platform
    pub source: ServiceSource,

    /// Provider-native identifier
    pub external_id: Option<String>,

    /// Deep link back to the original listing
    pub external_url: Option<String>,

    /// Stamped at normalization time, not the provider's own timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for importing an external service into the primary datastore
/// DOCUMENTATION: Data transfer object for POST /external/services/import
/// Mirrors the canonical record minus the ephemeral id/timestamps
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImportServiceRequest {
    /// Display name (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Internal category id (required)
    #[validate(length(min = 1, max = 64))]
    pub category_id: String,

    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub operating_hours: Option<String>,

    #[serde(default = "default_price_range")]
    pub price_range: i32,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[serde(default)]
    pub verified: bool,

    pub avg_rating: Option<f32>,
    pub review_count: Option<i32>,

    pub source: ServiceSource,

    pub external_id: Option<String>,
    pub external_url: Option<String>,
}

fn default_price_range() -> i32 {
    2
}

impl ImportServiceRequest {
    /// Rebuild the canonical record this request describes
    /// The ephemeral id is derived from source + external id when present
    pub fn into_service(self) -> ExternalService {
        let now = Utc::now();
        let id = match &self.external_id {
            Some(ext) => format!("{}-{}", self.source.as_str(), ext),
            None => format!("{}-{}", self.source.as_str(), Uuid::new_v4().simple()),
        };

        ExternalService {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            category_id: self.category_id,
            contact_phone: self.contact_phone,
            website: self.website,
            operating_hours: self.operating_hours,
            price_range: self.price_range,
            latitude: self.latitude,
            longitude: self.longitude,
            verified: self.verified,
            avg_rating: self.avg_rating,
            review_count: self.review_count,
            source: self.source,
            external_id: self.external_id,
            external_url: self.external_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A service row as stored in the primary datastore
/// DOCUMENTATION: Created by the import hook; carries a fresh UUID primary
/// key - the external id is kept as a column, never reused as the key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImportedService {
    pub id: Uuid,
    pub name: String,
    pub category_id: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub operating_hours: Option<String>,
    pub price_range: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub verified: bool,
    pub avg_rating: Option<f32>,
    pub review_count: Option<i32>,
    pub source: String,
    pub external_id: Option<String>,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
