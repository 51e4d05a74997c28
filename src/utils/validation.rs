//! Input validation and sanitization utilities
//!
//! Local checks that run before any network call: sign-up rules,
//! avatar size limits, listing field sanity and URL shape.

use crate::error::UtilsError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Avatar files above this size are rejected before upload
pub const MAX_AVATAR_BYTES: u64 = 2 * 1024 * 1024;

fn validation_error(message: impl Into<String>) -> crate::AppError {
    UtilsError::Validation {
        message: message.into(),
    }
    .into()
}

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(validation_error("URL cannot be empty"));
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(validation_error(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        )));
    }

    Ok(())
}

/// Sign-up password rules: minimum length and matching confirmation.
/// Both checks run locally so a bad pair never reaches the server.
pub fn validate_signup_password(password: &str, confirmation: &str) -> crate::Result<()> {
    if password != confirmation {
        return Err(validation_error("Passwords do not match"));
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(validation_error(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(())
}

/// Reject avatar files over the 2 MB limit before any upload happens
pub fn validate_avatar_size(size_bytes: u64) -> crate::Result<()> {
    if size_bytes > MAX_AVATAR_BYTES {
        return Err(validation_error(format!(
            "Avatar file is {} bytes; the limit is 2 MB",
            size_bytes
        )));
    }

    Ok(())
}

/// Listing prices must be positive finite numbers
pub fn validate_price(price: f64) -> crate::Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(validation_error(format!(
            "Invalid price '{}': must be a positive number",
            price
        )));
    }

    Ok(())
}

/// Required text fields for a listing must be non-empty after trimming
pub fn validate_required_field(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(validation_error(format!("{} cannot be empty", field)));
    }

    Ok(())
}
