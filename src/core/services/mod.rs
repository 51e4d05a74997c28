pub mod auth_service;
pub mod listing_service;
pub mod profile_service;
pub mod traits;
pub mod types;
