// src/services/category_mapper.rs
// DOCUMENTATION: Category translation between internal ids and provider vocabulary
// PURPOSE: Pure mapping functions shared by the platform adapters

use crate::models::category;

/// Map an internal category id to a provider place type
/// DOCUMENTATION: Empty string means "no type filter" - used for "all",
/// unknown categories, and categories Google has no type for
pub fn provider_place_type(category_id: &str) -> &'static str {
    match category_id {
        category::VETERINARY_CLINICS => "veterinary_care",
        category::PET_SHOPS => "pet_store",
        // No groomer type in the provider vocabulary; the keyword carries it
        category::GROOMING_SALONS => "pet_store",
        category::PET_HOTELS => "lodging",
        category::PET_CAFES => "cafe",
        category::PET_PARKS => "park",
        category::PET_TRAINING => "",
        category::PET_RESTAURANTS => "restaurant",
        _ => "",
    }
}

/// Map an internal category id to a free-text search keyword
/// DOCUMENTATION: Improves provider search relevance; defaults to "pet"
/// for unknown categories and the "all" sentinel
pub fn provider_keyword(category_id: &str) -> &'static str {
    match category_id {
        category::VETERINARY_CLINICS => "veterinary clinic pet",
        category::PET_SHOPS => "pet shop",
        category::GROOMING_SALONS => "pet grooming salon",
        category::PET_HOTELS => "pet hotel boarding",
        category::PET_CAFES => "pet friendly cafe",
        category::PET_PARKS => "dog park",
        category::PET_TRAINING => "pet training school",
        category::PET_RESTAURANTS => "pet friendly restaurant",
        _ => "pet",
    }
}

/// Infer an internal category from provider place types
/// DOCUMENTATION: Ordered cascade - specific signals before generic ones,
/// so a veterinary tag wins over a co-occurring establishment tag
pub fn infer_category_from_types(types: &[String]) -> &'static str {
    let has = |t: &str| types.iter().any(|x| x == t);

    if has("veterinary_care") {
        category::VETERINARY_CLINICS
    } else if has("pet_store") {
        category::PET_SHOPS
    } else if has("lodging") && has("point_of_interest") {
        category::PET_HOTELS
    } else if (has("cafe") || has("restaurant")) && has("point_of_interest") {
        category::PET_CAFES
    } else if has("park") {
        category::PET_PARKS
    } else if has("restaurant") {
        category::PET_RESTAURANTS
    } else {
        category::PET_SHOPS
    }
}

/// Infer an internal category from a free-text search query
/// DOCUMENTATION: Keyword substring scan, English and Indonesian terms.
/// Same priority discipline as the type cascade.
pub fn infer_category_from_query(query: &str) -> &'static str {
    let q = query.to_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|n| q.contains(n));

    if contains_any(&["vet", "clinic", "dokter hewan", "klinik"]) {
        category::VETERINARY_CLINICS
    } else if contains_any(&["groom", "salon"]) {
        category::GROOMING_SALONS
    } else if contains_any(&["hotel", "boarding", "penginapan"]) {
        category::PET_HOTELS
    } else if contains_any(&["cafe", "kafe"]) {
        category::PET_CAFES
    } else if contains_any(&["park", "taman"]) {
        category::PET_PARKS
    } else if contains_any(&["train", "school", "latih", "sekolah"]) {
        category::PET_TRAINING
    } else if contains_any(&["restaurant", "restoran"]) {
        category::PET_RESTAURANTS
    } else {
        category::PET_SHOPS
    }
}
