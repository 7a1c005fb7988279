// src/db/service_repository.rs
// DOCUMENTATION: Database access layer for imported services
// PURPOSE: Abstract the snake_case persistence schema from the aggregator

use crate::errors::ServicesError;
use crate::models::{ExternalService, ImportedService};
use sqlx::PgPool;
use uuid::Uuid;

/// ServiceRepository: database operations for imported external services
/// DOCUMENTATION: Uses query_as for type-safe SQL queries
pub struct ServiceRepository;

impl ServiceRepository {
    /// Insert a canonical external record as a new service row
    /// DOCUMENTATION: The row gets a fresh UUID primary key; the provider
    /// id lands in external_id and is never reused as the key
    pub async fn insert_external(
        pool: &PgPool,
        service: &ExternalService,
    ) -> Result<ImportedService, ServicesError> {
        let row = sqlx::query_as::<_, ImportedService>(
            r#"
            INSERT INTO services (
                id, name, category_id, address, city,
                contact_phone, website, operating_hours,
                price_range, latitude, longitude, verified,
                avg_rating, review_count,
                source, external_id, external_url,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14,
                $15, $16, $17,
                NOW(), NOW()
            )
            RETURNING
                id, name, category_id, address, city,
                contact_phone, website, operating_hours,
                price_range, latitude, longitude, verified,
                avg_rating, review_count,
                source, external_id, external_url,
                created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4()) // $1
        .bind(&service.name) // $2
        .bind(&service.category_id) // $3
        .bind(&service.address) // $4
        .bind(&service.city) // $5
        .bind(&service.contact_phone) // $6
        .bind(&service.website) // $7
        .bind(&service.operating_hours) // $8
        .bind(service.price_range) // $9
        .bind(service.latitude) // $10
        .bind(service.longitude) // $11
        .bind(service.verified) // $12
        .bind(service.avg_rating) // $13
        .bind(service.review_count) // $14
        .bind(service.source.as_str()) // $15
        .bind(&service.external_id) // $16
        .bind(&service.external_url) // $17
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert external service {:?}: {}", service.id, e);
            ServicesError::DatabaseError(e.to_string())
        })?;

        log::info!("Created service with id: {}", row.id);
        Ok(row)
    }

    /// Retrieve an imported service by primary key
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<ImportedService, ServicesError> {
        let row = sqlx::query_as::<_, ImportedService>(
            r#"
            SELECT
                id, name, category_id, address, city,
                contact_phone, website, operating_hours,
                price_range, latitude, longitude, verified,
                avg_rating, review_count,
                source, external_id, external_url,
                created_at, updated_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching service: {}", e);
            ServicesError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            log::warn!("Service not found: {}", id);
            ServicesError::NotFound(id.to_string())
        })?;

        Ok(row)
    }
}
