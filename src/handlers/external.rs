// src/handlers/external.rs
// DOCUMENTATION: HTTP handlers for external service aggregation
// PURPOSE: Parse requests, call the aggregator, return responses

use crate::db::ServiceRepository;
use crate::errors::ServicesError;
use crate::models::category;
use crate::models::ImportServiceRequest;
use crate::services::ExternalPlatformsService;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the category fetch endpoint
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    /// Internal category id; absent or "all" means no filter
    pub category: Option<String>,
    /// Free-text location, usually a city name
    pub location: Option<String>,
}

/// Query parameters for the free-text search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search query (required)
    pub q: String,
    pub category: Option<String>,
    pub location: Option<String>,
}

/// One row in the platform listing response
#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    pub name: &'static str,
    pub source: String,
}

/// One row in the category listing response
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// GET /external/categories
/// The category vocabulary accepted by the fetch/search endpoints
pub async fn list_categories() -> impl Responder {
    let categories: Vec<CategoryInfo> = category::ALL_CATEGORIES
        .iter()
        .copied()
        .map(|id| CategoryInfo {
            id,
            label: category::label(id),
        })
        .collect();

    HttpResponse::Ok().json(categories)
}

/// GET /external/platforms
/// List the enabled platforms the aggregator will query
pub async fn list_platforms(
    aggregator: web::Data<ExternalPlatformsService>,
) -> impl Responder {
    let platforms: Vec<PlatformInfo> = aggregator
        .platforms()
        .iter()
        .map(|p| PlatformInfo {
            name: p.name(),
            source: p.source().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(platforms)
}

/// GET /external/services
/// Fetch services for a category around a location from all platforms
///
/// DOCUMENTATION: Always returns 200 with a plain array - platform
/// failures degrade to fewer results, never to an error response
pub async fn fetch_services(
    aggregator: web::Data<ExternalPlatformsService>,
    query: web::Query<FetchQuery>,
) -> impl Responder {
    let category = category::filter_or_all(query.category.as_deref());
    let location = query.location.as_deref().unwrap_or("");

    let services = aggregator.fetch_services_from_all(category, location).await;

    log::info!(
        "Aggregated fetch: category={}, location={:?}, results={}",
        category,
        location,
        services.len()
    );

    HttpResponse::Ok().json(services)
}

/// GET /external/services/search
/// Free-text search across all platforms
pub async fn search_services(
    aggregator: web::Data<ExternalPlatformsService>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, ServicesError> {
    if query.q.trim().is_empty() {
        return Err(ServicesError::InvalidInput(
            "query parameter 'q' must not be empty".to_string(),
        ));
    }

    let services = aggregator
        .search_across_all(
            query.q.trim(),
            query.category.as_deref(),
            query.location.as_deref(),
        )
        .await;

    log::info!(
        "Aggregated search: q={:?}, results={}",
        query.q,
        services.len()
    );

    Ok(HttpResponse::Ok().json(services))
}

/// GET /external/services/{id}/reviews
/// Reviews for one aggregated service, routed to its platform by id prefix
pub async fn fetch_reviews(
    aggregator: web::Data<ExternalPlatformsService>,
    path: web::Path<String>,
) -> impl Responder {
    let service_id = path.into_inner();
    let reviews = aggregator.fetch_reviews(&service_id).await;
    HttpResponse::Ok().json(reviews)
}

/// POST /external/services/import
/// Promote an external service record into the primary datastore
pub async fn import_service(
    pool: web::Data<PgPool>,
    aggregator: web::Data<ExternalPlatformsService>,
    req: web::Json<ImportServiceRequest>,
) -> Result<impl Responder, ServicesError> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err(ServicesError::ValidationError(e.to_string()));
    }

    let service = req.into_inner().into_service();

    match aggregator.save_external_service(pool.get_ref(), &service).await {
        Some(imported) => Ok(HttpResponse::Created().json(imported)),
        None => Err(ServicesError::DatabaseError(
            "could not import external service".to_string(),
        )),
    }
}

/// GET /external/services/imported/{id}
/// Retrieve a previously imported service by its datastore key
pub async fn get_imported_service(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ServicesError> {
    let service = ServiceRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service))
}

/// Configuration for external aggregation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/external")
            .route("/categories", web::get().to(list_categories))
            .route("/platforms", web::get().to(list_platforms))
            .route("/services", web::get().to(fetch_services))
            .route("/services/search", web::get().to(search_services))
            .route("/services/import", web::post().to(import_service))
            .route("/services/imported/{id}", web::get().to(get_imported_service))
            .route("/services/{id}/reviews", web::get().to(fetch_reviews)),
    );
}
