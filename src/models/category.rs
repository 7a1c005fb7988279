// src/models/category.rs
// DOCUMENTATION: Internal service category identifiers
// PURPOSE: Single place for the category vocabulary used across adapters

/// Internal category ids. These are the values stored in `category_id`
/// and accepted by the aggregation endpoints. The sentinel "all" means
/// no category filter and is never stored on a record.
pub const VETERINARY_CLINICS: &str = "veterinary_clinics";
pub const PET_SHOPS: &str = "pet_shops";
pub const GROOMING_SALONS: &str = "grooming_salons";
pub const PET_HOTELS: &str = "pet_hotels";
pub const PET_CAFES: &str = "pet_cafes";
pub const PET_PARKS: &str = "pet_parks";
pub const PET_TRAINING: &str = "pet_training";
pub const PET_RESTAURANTS: &str = "pet_restaurants";

/// Sentinel meaning "no category filter"
pub const ALL: &str = "all";

/// Every concrete category id (excludes the "all" sentinel)
pub const ALL_CATEGORIES: [&str; 8] = [
    VETERINARY_CLINICS,
    PET_SHOPS,
    GROOMING_SALONS,
    PET_HOTELS,
    PET_CAFES,
    PET_PARKS,
    PET_TRAINING,
    PET_RESTAURANTS,
];

/// Display label for a category id
/// DOCUMENTATION: Used by the mock platforms when composing listing names
pub fn label(category_id: &str) -> &'static str {
    match category_id {
        VETERINARY_CLINICS => "Vet Clinic",
        PET_SHOPS => "Pet Shop",
        GROOMING_SALONS => "Grooming Salon",
        PET_HOTELS => "Pet Hotel",
        PET_CAFES => "Pet Cafe",
        PET_PARKS => "Pet Park",
        PET_TRAINING => "Pet Training",
        PET_RESTAURANTS => "Pet Friendly Restaurant",
        _ => "Pet Service",
    }
}

/// Normalize a caller-supplied category filter
/// Empty strings and unknown values behave like "all"
pub fn filter_or_all(category_id: Option<&str>) -> &str {
    match category_id {
        Some(c) if !c.trim().is_empty() => c,
        _ => ALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_defined_for_every_category() {
        for id in ALL_CATEGORIES {
            assert!(!label(id).is_empty());
        }
        assert_eq!(label("something_else"), "Pet Service");
    }

    #[test]
    fn test_filter_or_all() {
        assert_eq!(filter_or_all(None), ALL);
        assert_eq!(filter_or_all(Some("")), ALL);
        assert_eq!(filter_or_all(Some("  ")), ALL);
        assert_eq!(filter_or_all(Some(PET_CAFES)), PET_CAFES);
    }
}
