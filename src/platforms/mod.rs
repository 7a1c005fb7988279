// src/platforms/mod.rs
// DOCUMENTATION: Platform adapters module organization
// PURPOSE: One adapter per external source behind a common trait

pub mod adapter;
pub mod facebook;
pub mod google_maps;
pub mod instagram;
pub mod shopee;
pub mod tokopedia;

pub use adapter::PlatformAdapter;
pub use facebook::FacebookPlatform;
pub use google_maps::GoogleMapsPlatform;
pub use instagram::InstagramPlatform;
pub use shopee::ShopeePlatform;
pub use tokopedia::TokopediaPlatform;
