// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServiceSource;

/// Review attached to an external service listing
/// Not every platform supports reviews; adapters without them return none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalReview {
    pub author: Option<String>,
    pub rating: f32,
    pub text: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub source: ServiceSource,
}
