// src/services/external_platforms.rs
// DOCUMENTATION: Multi-platform aggregation service
// PURPOSE: Fan a request out to every enabled platform concurrently,
// merge the results and expose the import hook

use futures::future::join_all;
use sqlx::PgPool;
use std::sync::Arc;

use crate::db::ServiceRepository;
use crate::models::{ExternalReview, ExternalService, ImportedService};
use crate::platforms::PlatformAdapter;

/// Aggregator over the registered platform adapters
/// DOCUMENTATION: The registry is fixed at construction and read-only
/// afterwards; each call is an independent fan-out/merge cycle.
/// Constructed once in main.rs and injected where needed.
pub struct ExternalPlatformsService {
    platforms: Vec<Arc<dyn PlatformAdapter>>,
}

impl ExternalPlatformsService {
    pub fn new(platforms: Vec<Arc<dyn PlatformAdapter>>) -> Self {
        Self { platforms }
    }

    /// Enabled platforms only - disabled adapters never receive calls
    pub fn platforms(&self) -> Vec<Arc<dyn PlatformAdapter>> {
        self.platforms
            .iter()
            .filter(|p| p.enabled())
            .cloned()
            .collect()
    }

    /// Fetch services for a category+location from every enabled platform
    /// DOCUMENTATION: Join-all semantics - the call returns once the
    /// slowest platform answers. One platform's failure contributes an
    /// empty list and never aborts the batch. Merged order is unspecified.
    pub async fn fetch_services_from_all(
        &self,
        category: &str,
        location: &str,
    ) -> Vec<ExternalService> {
        let calls = self.platforms().into_iter().map(|platform| async move {
            match platform.fetch_services(category, location).await {
                Ok(services) => {
                    log::debug!(
                        "Platform {} returned {} services",
                        platform.name(),
                        services.len()
                    );
                    services
                }
                Err(e) => {
                    log::error!("Platform {} failed during fetch: {}", platform.name(), e);
                    Vec::new()
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }

    /// Free-text search across every enabled platform
    /// Same fan-out and isolation discipline as fetch_services_from_all
    pub async fn search_across_all(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Vec<ExternalService> {
        let calls = self.platforms().into_iter().map(|platform| async move {
            match platform.search_services(query, category, location).await {
                Ok(services) => services,
                Err(e) => {
                    log::error!("Platform {} failed during search: {}", platform.name(), e);
                    Vec::new()
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }

    /// Reviews for one aggregated service, routed by id prefix
    /// Unknown prefixes yield an empty list
    pub async fn fetch_reviews(&self, service_id: &str) -> Vec<ExternalReview> {
        let Some(platform) = self.platforms().into_iter().find(|p| p.owns_id(service_id)) else {
            log::debug!("No platform owns service id {:?}", service_id);
            return Vec::new();
        };

        match platform.fetch_reviews(service_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                log::error!(
                    "Platform {} failed fetching reviews for {}: {}",
                    platform.name(),
                    service_id,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Promote an external record into the primary datastore
    /// DOCUMENTATION: Inserts a new row with a fresh primary key - the
    /// external id is kept only as a column. Persistence errors are logged
    /// and surfaced as None; the caller owns user-visible messaging.
    pub async fn save_external_service(
        &self,
        pool: &PgPool,
        service: &ExternalService,
    ) -> Option<ImportedService> {
        match ServiceRepository::insert_external(pool, service).await {
            Ok(imported) => {
                log::info!(
                    "Imported external service {:?} from {} as {}",
                    service.name,
                    service.source,
                    imported.id
                );
                Some(imported)
            }
            Err(e) => {
                log::error!("Failed to import external service {:?}: {}", service.id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category;
    use crate::models::ServiceSource;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::Utc;

    /// Test double that always answers with a fixed number of records
    struct StaticPlatform {
        label: &'static str,
        count: usize,
        enabled: bool,
    }

    #[async_trait]
    impl PlatformAdapter for StaticPlatform {
        fn name(&self) -> &'static str {
            self.label
        }

        fn source(&self) -> ServiceSource {
            ServiceSource::Other
        }

        fn id_prefix(&self) -> &'static str {
            "static-"
        }

        fn enabled(&self) -> bool {
            self.enabled
        }

        async fn fetch_services(
            &self,
            category: &str,
            _location: &str,
        ) -> Result<Vec<ExternalService>> {
            let now = Utc::now();
            Ok((0..self.count)
                .map(|i| ExternalService {
                    id: format!("static-{}-{}", self.label, i),
                    name: format!("{} service {}", self.label, i),
                    address: None,
                    city: None,
                    category_id: category.to_string(),
                    contact_phone: None,
                    website: None,
                    operating_hours: None,
                    price_range: 2,
                    latitude: None,
                    longitude: None,
                    verified: false,
                    avg_rating: None,
                    review_count: None,
                    source: ServiceSource::Other,
                    external_id: None,
                    external_url: None,
                    created_at: now,
                    updated_at: now,
                })
                .collect())
        }

        async fn search_services(
            &self,
            _query: &str,
            category: Option<&str>,
            location: Option<&str>,
        ) -> Result<Vec<ExternalService>> {
            self.fetch_services(category.unwrap_or(category::ALL), location.unwrap_or(""))
                .await
        }

        async fn fetch_reviews(&self, _service_id: &str) -> Result<Vec<ExternalReview>> {
            Ok(Vec::new())
        }
    }

    /// Test double rigged to always reject
    struct FailingPlatform;

    #[async_trait]
    impl PlatformAdapter for FailingPlatform {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn source(&self) -> ServiceSource {
            ServiceSource::Other
        }

        fn id_prefix(&self) -> &'static str {
            "fail-"
        }

        async fn fetch_services(
            &self,
            _category: &str,
            _location: &str,
        ) -> Result<Vec<ExternalService>> {
            Err(anyhow!("simulated upstream outage"))
        }

        async fn search_services(
            &self,
            _query: &str,
            _category: Option<&str>,
            _location: Option<&str>,
        ) -> Result<Vec<ExternalService>> {
            Err(anyhow!("simulated upstream outage"))
        }

        async fn fetch_reviews(&self, _service_id: &str) -> Result<Vec<ExternalReview>> {
            Err(anyhow!("simulated upstream outage"))
        }
    }

    #[tokio::test]
    async fn test_fetch_merges_all_enabled_platforms() {
        let service = ExternalPlatformsService::new(vec![
            Arc::new(StaticPlatform {
                label: "a",
                count: 2,
                enabled: true,
            }),
            Arc::new(StaticPlatform {
                label: "b",
                count: 3,
                enabled: true,
            }),
        ]);

        let merged = service
            .fetch_services_from_all(category::PET_SHOPS, "jakarta")
            .await;
        assert_eq!(merged.len(), 5);
    }

    #[tokio::test]
    async fn test_one_failing_platform_does_not_abort_the_batch() {
        let service = ExternalPlatformsService::new(vec![
            Arc::new(StaticPlatform {
                label: "a",
                count: 2,
                enabled: true,
            }),
            Arc::new(FailingPlatform),
            Arc::new(StaticPlatform {
                label: "b",
                count: 4,
                enabled: true,
            }),
            Arc::new(StaticPlatform {
                label: "c",
                count: 1,
                enabled: true,
            }),
            Arc::new(StaticPlatform {
                label: "d",
                count: 1,
                enabled: true,
            }),
        ]);

        let merged = service
            .fetch_services_from_all(category::PET_CAFES, "bandung")
            .await;
        // the four healthy platforms still contribute everything they have
        assert_eq!(merged.len(), 8);

        let searched = service
            .search_across_all("pet cafe", None, Some("bandung"))
            .await;
        assert_eq!(searched.len(), 8);
    }

    #[tokio::test]
    async fn test_disabled_platforms_are_skipped() {
        let service = ExternalPlatformsService::new(vec![
            Arc::new(StaticPlatform {
                label: "on",
                count: 2,
                enabled: true,
            }),
            Arc::new(StaticPlatform {
                label: "off",
                count: 9,
                enabled: false,
            }),
        ]);

        assert_eq!(service.platforms().len(), 1);
        let merged = service
            .fetch_services_from_all(category::ALL, "jakarta")
            .await;
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn test_reviews_route_by_id_prefix() {
        let service = ExternalPlatformsService::new(vec![
            Arc::new(StaticPlatform {
                label: "a",
                count: 1,
                enabled: true,
            }),
            Arc::new(FailingPlatform),
        ]);

        // owned by the static platform: empty but not an error
        assert!(service.fetch_reviews("static-a-0").await.is_empty());
        // owned by the failing platform: error swallowed into empty
        assert!(service.fetch_reviews("fail-1").await.is_empty());
        // owned by nobody
        assert!(service.fetch_reviews("zzz-1").await.is_empty());
    }
}
