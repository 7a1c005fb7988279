// src/platforms/adapter.rs
// DOCUMENTATION: Common capability contract for all external platforms
// PURPOSE: Lets the aggregator fan out without knowing which sources are real

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ExternalReview, ExternalService, ServiceSource};

/// Common trait for all external service platforms
/// This allows new sources to be added without touching the aggregation logic
///
/// Error policy: adapters catch their own provider failures and return an
/// empty list, so callers cannot tell "zero results" from "source failed".
/// The Err arm exists so the aggregator can still isolate an adapter that
/// misbehaves anyway.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Human-readable platform name, used in log lines
    fn name(&self) -> &'static str;

    /// Source tag stamped on every record this platform produces
    fn source(&self) -> ServiceSource;

    /// Prefix of the ids this platform hands out, used for review routing
    fn id_prefix(&self) -> &'static str;

    /// Disabled platforms are skipped by the aggregator
    fn enabled(&self) -> bool {
        true
    }

    /// List services for a category around a location
    async fn fetch_services(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<ExternalService>>;

    /// Free-text search, optionally narrowed by category and location
    async fn search_services(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<ExternalService>>;

    /// Reviews for one of this platform's services; may be empty -
    /// not all sources support reviews
    async fn fetch_reviews(&self, service_id: &str) -> Result<Vec<ExternalReview>>;

    /// Whether an aggregated service id belongs to this platform
    fn owns_id(&self, service_id: &str) -> bool {
        service_id.starts_with(self.id_prefix())
    }
}
