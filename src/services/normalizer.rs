// src/services/normalizer.rs
// DOCUMENTATION: Provider payload normalization
// PURPOSE: Convert raw Google place payloads into canonical service records

use chrono::Utc;

use crate::models::category;
use crate::models::{ExternalService, ServiceSource};
use crate::services::category_mapper;
use crate::services::google_places_client::GooglePlace;

/// Prefix for ids derived from Google place ids
pub const GOOGLE_ID_PREFIX: &str = "gmaps-";

/// Convert one raw place (plus optional detail payload) into a canonical record
/// DOCUMENTATION: Detail fields take precedence over the summary payload.
/// Total by construction - a payload with no name or geometry still yields
/// a record satisfying the id/name/source invariant, so one malformed
/// listing can never fail a whole batch.
///
/// # Arguments
/// * `place` - Summary payload from a nearby/text search
/// * `details` - Optional richer payload from a Place Details lookup
/// * `category_hint` - Category from the request context; inferred from
///   the provider's type tags when absent or "all"
pub fn normalize_place(
    place: &GooglePlace,
    details: Option<&GooglePlace>,
    category_hint: Option<&str>,
) -> ExternalService {
    let now = Utc::now();

    // Prefer the detail payload field-by-field, falling back to the summary
    let pick = |f: fn(&GooglePlace) -> Option<String>| -> Option<String> {
        details.and_then(f).or_else(|| f(place))
    };

    let place_id = details
        .map(|d| d.place_id.clone())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| place.place_id.clone());

    let id = if place_id.is_empty() {
        // Malformed payload without a provider id; keep the invariant anyway
        format!("{}unknown", GOOGLE_ID_PREFIX)
    } else {
        format!("{}{}", GOOGLE_ID_PREFIX, place_id)
    };

    let name = pick(|p| p.name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "Unknown place".to_string());

    let address = pick(|p| p.formatted_address.clone()).or_else(|| pick(|p| p.vicinity.clone()));
    let city = address.as_deref().and_then(extract_city);

    let types = if !place.types.is_empty() {
        &place.types
    } else {
        details.map(|d| &d.types).unwrap_or(&place.types)
    };

    let category_id = match category_hint {
        Some(hint) if hint != category::ALL && !hint.is_empty() => hint.to_string(),
        _ => category_mapper::infer_category_from_types(types).to_string(),
    };

    let location = details
        .and_then(|d| d.geometry.as_ref())
        .or(place.geometry.as_ref())
        .map(|g| g.location);

    let operating_hours = details
        .and_then(|d| d.opening_hours.as_ref())
        .or(place.opening_hours.as_ref())
        .and_then(|h| h.weekday_text.as_ref())
        .map(|lines| lines.join("; "));

    let rating = details.and_then(|d| d.rating).or(place.rating);
    let review_count = details
        .and_then(|d| d.user_ratings_total)
        .or(place.user_ratings_total);

    // Provider price level is 0-4; clamp into the 1-4 tier, placeholder 2
    let price_range = details
        .and_then(|d| d.price_level)
        .or(place.price_level)
        .map(|p| p.clamp(1, 4))
        .unwrap_or(2);

    let external_url = pick(|p| p.url.clone()).or_else(|| {
        if place_id.is_empty() {
            None
        } else {
            Some(format!(
                "https://www.google.com/maps/place/?q=place_id:{}",
                place_id
            ))
        }
    });

    ExternalService {
        id,
        name,
        address,
        city,
        category_id,
        contact_phone: pick(|p| p.formatted_phone_number.clone())
            .or_else(|| pick(|p| p.international_phone_number.clone())),
        website: pick(|p| p.website.clone()),
        operating_hours,
        price_range,
        latitude: location.map(|l| l.lat),
        longitude: location.map(|l| l.lng),
        verified: true,
        avg_rating: rating,
        review_count,
        source: ServiceSource::GoogleMaps,
        external_id: (!place_id.is_empty()).then_some(place_id),
        external_url,
        created_at: now,
        updated_at: now,
    }
}

/// Best-effort city extraction from a free-text address
/// DOCUMENTATION: Split on comma, take the second-to-last segment, strip
/// digits. Heuristic only - addresses usually end with "city, postal code"
/// in the provider's formatting.
pub fn extract_city(address: &str) -> Option<String> {
    let segments: Vec<&str> = address.split(',').map(str::trim).collect();
    if segments.len() < 2 {
        return None;
    }

    let raw = segments[segments.len() - 2];
    let city: String = raw.chars().filter(|c| !c.is_ascii_digit()).collect();
    let city = city.trim().to_string();

    (!city.is_empty()).then_some(city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::google_places_client::{GoogleGeometry, GoogleLocation};

    fn sample_place() -> GooglePlace {
        GooglePlace {
            place_id: "ChIJvet01".to_string(),
            name: Some("Klinik Hewan Kemang".to_string()),
            types: vec![
                "veterinary_care".to_string(),
                "point_of_interest".to_string(),
            ],
            geometry: Some(GoogleGeometry {
                location: GoogleLocation {
                    lat: -6.2601,
                    lng: 106.8135,
                },
            }),
            vicinity: Some("Jl. Kemang Raya No. 8, Jakarta Selatan".to_string()),
            rating: Some(4.6),
            user_ratings_total: Some(210),
            price_level: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_basic_fields() {
        let place = sample_place();
        let svc = normalize_place(&place, None, Some("veterinary_clinics"));

        assert_eq!(svc.id, "gmaps-ChIJvet01");
        assert_eq!(svc.name, "Klinik Hewan Kemang");
        assert_eq!(svc.category_id, "veterinary_clinics");
        assert_eq!(svc.source, ServiceSource::GoogleMaps);
        assert_eq!(svc.latitude, Some(-6.2601));
        assert_eq!(svc.longitude, Some(106.8135));
        assert_eq!(svc.avg_rating, Some(4.6));
        assert_eq!(svc.review_count, Some(210));
        assert!(svc.verified);
        assert_eq!(svc.external_id.as_deref(), Some("ChIJvet01"));
        assert_eq!(
            svc.external_url.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:ChIJvet01")
        );
    }

    #[test]
    fn test_normalize_id_stable_across_calls() {
        let place = sample_place();
        let a = normalize_place(&place, None, None);
        let b = normalize_place(&place, None, None);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_normalize_infers_category_without_hint() {
        let place = sample_place();
        let svc = normalize_place(&place, None, None);
        assert_eq!(svc.category_id, "veterinary_clinics");

        let svc = normalize_place(&place, None, Some("all"));
        assert_eq!(svc.category_id, "veterinary_clinics");
    }

    #[test]
    fn test_normalize_details_take_precedence() {
        let place = sample_place();
        let details = GooglePlace {
            place_id: "ChIJvet01".to_string(),
            name: Some("Klinik Hewan Kemang (Official)".to_string()),
            formatted_address: Some(
                "Jl. Kemang Raya No. 8, Mampang, Jakarta Selatan, 12730".to_string(),
            ),
            formatted_phone_number: Some("(021) 719-0000".to_string()),
            website: Some("https://klinikkemang.example".to_string()),
            rating: Some(4.8),
            ..Default::default()
        };

        let svc = normalize_place(&place, Some(&details), None);
        assert_eq!(svc.name, "Klinik Hewan Kemang (Official)");
        assert_eq!(svc.contact_phone.as_deref(), Some("(021) 719-0000"));
        assert_eq!(svc.website.as_deref(), Some("https://klinikkemang.example"));
        assert_eq!(svc.avg_rating, Some(4.8));
        assert_eq!(svc.city.as_deref(), Some("Jakarta Selatan"));
    }

    #[test]
    fn test_normalize_malformed_payload_still_satisfies_invariant() {
        // Missing name and geometry must not panic or drop the record
        let place = GooglePlace {
            place_id: "ChIJbroken".to_string(),
            ..Default::default()
        };

        let svc = normalize_place(&place, None, None);
        assert_eq!(svc.id, "gmaps-ChIJbroken");
        assert_eq!(svc.name, "Unknown place");
        assert_eq!(svc.source, ServiceSource::GoogleMaps);
        assert!(svc.latitude.is_none());
        assert!(svc.longitude.is_none());
        // price tier placeholder is always present
        assert_eq!(svc.price_range, 2);
    }

    #[test]
    fn test_normalize_entirely_empty_payload() {
        let svc = normalize_place(&GooglePlace::default(), None, None);
        assert!(!svc.id.is_empty());
        assert!(!svc.name.is_empty());
    }

    #[test]
    fn test_extract_city_second_to_last_segment() {
        assert_eq!(
            extract_city("Jl. Sudirman No. 52, Senayan, Jakarta Pusat, 10210").as_deref(),
            Some("Jakarta Pusat")
        );
        // digits stripped from the segment
        assert_eq!(
            extract_city("Jl. Braga No. 2, Bandung 40111, Indonesia").as_deref(),
            Some("Bandung")
        );
    }

    #[test]
    fn test_extract_city_single_segment_is_none() {
        assert!(extract_city("Jalan Tanpa Koma").is_none());
    }
}
