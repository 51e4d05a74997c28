use crate::AppError;
use crate::api::models::Listing;
use crate::core::services::listing_service::ListingService;
use crate::core::services::types::DeleteOutcome;
use async_trait::async_trait;

/// Trait for services that list resources owned by the caller
#[async_trait]
pub trait ListService<T> {
    /// List all resources owned by the authenticated user
    async fn list(&self) -> Result<Vec<T>, AppError>;
}

/// Trait for services that delete resources with cleanup of dependents
#[async_trait]
pub trait CascadeDeleteService {
    /// Delete a resource and its dependents, reporting what was removed
    async fn delete(&self, id: &str) -> Result<DeleteOutcome, AppError>;
}

#[async_trait]
impl ListService<Listing> for ListingService {
    async fn list(&self) -> Result<Vec<Listing>, AppError> {
        self.my_listings().await
    }
}

#[async_trait]
impl CascadeDeleteService for ListingService {
    async fn delete(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        self.delete_listing(id).await
    }
}
