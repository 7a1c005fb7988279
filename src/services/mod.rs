// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod category_mapper;
pub mod external_platforms;
pub mod geocoding;
pub mod google_places_client;
pub mod normalizer;

pub use external_platforms::ExternalPlatformsService;
pub use geocoding::{known_city_coordinates, CoordinateResolver, Coordinates};
pub use google_places_client::GooglePlacesClient;
