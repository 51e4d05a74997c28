use crate::storage::credentials::AuthMode;
use chrono::{DateTime, Datelike, Utc};

/// Authentication state summary for `auth status`
#[derive(Debug, Clone)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub auth_mode: AuthMode,
    pub profile_name: String,
    pub session_active: bool,
}

/// Dashboard-style aggregation over the caller's listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub created_this_month: usize,
}

impl ListingStats {
    pub fn from_listings(
        listings: &[crate::api::models::Listing],
        now: DateTime<Utc>,
    ) -> Self {
        let active = listings.iter().filter(|l| l.activo).count();
        let created_this_month = listings
            .iter()
            .filter(|l| {
                l.created_at
                    .map(|c| c.month() == now.month() && c.year() == now.year())
                    .unwrap_or(false)
            })
            .count();

        Self {
            total: listings.len(),
            active,
            inactive: listings.len() - active,
            created_this_month,
        }
    }
}

/// Result of the cascading listing delete. Storage deletions are best
/// effort, so failures are counted rather than propagated.
#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    pub images_total: usize,
    pub storage_deleted: usize,
    pub storage_failed: usize,
}
