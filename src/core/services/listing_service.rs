use super::types::{DeleteOutcome, ListingStats};
use crate::AppError;
use crate::api::client::SupabaseClient;
use crate::api::models::{
    ImageUrl, Listing, ListingImage, NewListing, NewListingImage, User,
};
use crate::error::{ApiError, AuthError, ListingError};
use crate::utils::file::{
    content_type_for_extension, file_extension, listing_image_object_path,
    object_path_from_public_url, read_file_bytes,
};
use crate::utils::logging::log_warning;
use crate::utils::validation::{validate_price, validate_required_field};
use chrono::Utc;
use std::path::Path;

const LISTINGS_TABLE: &str = "anuncios";
const IMAGES_TABLE: &str = "anuncio_imagenes";
const IMAGES_BUCKET: &str = "anuncios_imagenes";

/// Embedded-select clause pulling each listing's images along with the row
const LISTING_WITH_IMAGES: &str = "*,anuncio_imagenes(id,url,orden)";

/// Form fields for a new listing
#[derive(Debug, Clone)]
pub struct ListingInput {
    pub titulo: String,
    pub descripcion: String,
    pub precio: f64,
    pub tipo_operacion: String,
    pub tipo_inmueble: String,
    pub direccion: String,
    pub ciudad: String,
    pub country: String,
}

impl ListingInput {
    /// All fields of the creation form are required
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required_field("titulo", &self.titulo)?;
        validate_required_field("descripcion", &self.descripcion)?;
        validate_price(self.precio)?;
        validate_required_field("tipo_operacion", &self.tipo_operacion)?;
        validate_required_field("tipo_inmueble", &self.tipo_inmueble)?;
        validate_required_field("direccion", &self.direccion)?;
        validate_required_field("ciudad", &self.ciudad)?;
        validate_required_field("country", &self.country)?;
        Ok(())
    }
}

/// Listing workflow: two-phase creation (row first, images second),
/// owner-scoped listing queries and the cascading delete.
pub struct ListingService {
    client: SupabaseClient,
}

impl ListingService {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn current_user(&self) -> Result<User, AppError> {
        if !self.client.is_authenticated() {
            return Err(AuthError::NotLoggedIn.into());
        }
        self.client.get_user().await.map_err(|e| match e {
            ApiError::Unauthorized { .. } => AuthError::SessionInvalid.into(),
            other => other.into(),
        })
    }

    /// Phase one of the creation flow: insert the listing row scoped to
    /// the caller. Images are attached afterwards with `attach_image`.
    pub async fn create_listing(&self, input: ListingInput) -> Result<Listing, AppError> {
        input.validate()?;
        let user = self.current_user().await?;

        let new_listing = NewListing {
            titulo: input.titulo,
            descripcion: input.descripcion,
            precio: input.precio,
            tipo_operacion: input.tipo_operacion,
            tipo_inmueble: input.tipo_inmueble,
            direccion: input.direccion,
            ciudad: input.ciudad,
            country: input.country,
            usuario_id: user.id,
        };

        let listing: Listing = self
            .client
            .insert_returning(LISTINGS_TABLE, &new_listing)
            .await?;
        Ok(listing)
    }

    /// All listings owned by the caller, newest first, images embedded
    pub async fn my_listings(&self) -> Result<Vec<Listing>, AppError> {
        let user = self.current_user().await?;
        let owner_filter = format!("eq.{}", user.id);

        let listings = self
            .client
            .select_rows(
                LISTINGS_TABLE,
                &[
                    ("select", LISTING_WITH_IMAGES),
                    ("usuario_id", owner_filter.as_str()),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;
        Ok(listings)
    }

    /// Single listing by id
    pub async fn get_listing(&self, listing_id: &str) -> Result<Listing, AppError> {
        let id_filter = format!("eq.{}", listing_id);
        let rows: Vec<Listing> = self
            .client
            .select_rows(
                LISTINGS_TABLE,
                &[
                    ("select", LISTING_WITH_IMAGES),
                    ("id", id_filter.as_str()),
                ],
            )
            .await?;

        rows.into_iter().next().ok_or_else(|| {
            ListingError::NotFound {
                id: listing_id.to_string(),
            }
            .into()
        })
    }

    /// Images of a listing in display order
    pub async fn images(&self, listing_id: &str) -> Result<Vec<ListingImage>, AppError> {
        let listing_filter = format!("eq.{}", listing_id);
        let images = self
            .client
            .select_rows(
                IMAGES_TABLE,
                &[
                    ("select", "*"),
                    ("anuncio_id", listing_filter.as_str()),
                    ("order", "orden"),
                ],
            )
            .await?;
        Ok(images)
    }

    /// Phase two of the creation flow: upload the file to the listing's
    /// storage namespace, then insert the image record with
    /// `orden = current count + 1`.
    ///
    /// Upload and insert are not transactional; a failure between the two
    /// leaves an orphaned storage object.
    pub async fn attach_image(
        &self,
        listing_id: &str,
        file: &Path,
    ) -> Result<ListingImage, AppError> {
        let user = self.current_user().await?;
        let existing = self.images(listing_id).await?;

        let ext = file_extension(file).unwrap_or_else(|| "jpg".to_string());
        let object_path = listing_image_object_path(
            &user.id,
            listing_id,
            Utc::now().timestamp_millis(),
            &ext,
        );
        let bytes = read_file_bytes(file)?;

        self.client
            .upload_object(
                IMAGES_BUCKET,
                &object_path,
                bytes,
                content_type_for_extension(&ext),
            )
            .await
            .map_err(|e| ListingError::ImageUploadFailed {
                id: listing_id.to_string(),
                reason: e.to_string(),
            })?;

        let record = NewListingImage {
            anuncio_id: listing_id.to_string(),
            url: self.client.public_url(IMAGES_BUCKET, &object_path),
            orden: existing.len() as u32 + 1,
        };

        let image: ListingImage = self.client.insert_returning(IMAGES_TABLE, &record).await?;
        Ok(image)
    }

    /// Remove a single image record (the storage object stays, matching
    /// the original image-management behavior)
    pub async fn remove_image(&self, image_id: &str) -> Result<(), AppError> {
        let id_filter = format!("eq.{}", image_id);
        self.client
            .delete_rows(IMAGES_TABLE, &[("id", id_filter.as_str())])
            .await?;
        Ok(())
    }

    /// Soft publish check: the listing must exist and carry at least one
    /// image. The rule is client-side only; nothing enforces it in the
    /// backend.
    pub async fn publish(&self, listing_id: &str) -> Result<Listing, AppError> {
        let listing = self.get_listing(listing_id).await?;
        if listing.imagenes.is_empty() {
            return Err(ListingError::NoImages {
                id: listing_id.to_string(),
            }
            .into());
        }
        Ok(listing)
    }

    /// Cascading delete, in order:
    /// 1. fetch the image URLs of the listing;
    /// 2. delete each storage object (best effort, failures logged);
    /// 3. delete the image records in one filtered DELETE;
    /// 4. delete the listing row filtered by id AND owner id.
    ///
    /// Failures in steps 1, 3 or 4 abort the remaining steps.
    pub async fn delete_listing(&self, listing_id: &str) -> Result<DeleteOutcome, AppError> {
        let user = self.current_user().await?;
        let listing_filter = format!("eq.{}", listing_id);

        // 1. Image URLs
        let image_urls: Vec<ImageUrl> = self
            .client
            .select_rows(
                IMAGES_TABLE,
                &[("select", "url"), ("anuncio_id", listing_filter.as_str())],
            )
            .await?;

        // 2. Storage objects, one delete per image
        let mut outcome = DeleteOutcome {
            images_total: image_urls.len(),
            ..Default::default()
        };
        for image in &image_urls {
            let Some(object_path) = object_path_from_public_url(&image.url, &user.id) else {
                log_warning(&format!("Skipping unparseable image URL: {}", image.url));
                outcome.storage_failed += 1;
                continue;
            };

            match self.client.remove_object(IMAGES_BUCKET, &object_path).await {
                Ok(()) => outcome.storage_deleted += 1,
                Err(e) => {
                    log_warning(&format!(
                        "Failed to delete storage object {}: {}",
                        object_path, e
                    ));
                    outcome.storage_failed += 1;
                }
            }
        }

        // 3. Image records
        self.client
            .delete_rows(IMAGES_TABLE, &[("anuncio_id", listing_filter.as_str())])
            .await?;

        // 4. Listing row, scoped to the owner
        let owner_filter = format!("eq.{}", user.id);
        self.client
            .delete_rows(
                LISTINGS_TABLE,
                &[
                    ("id", listing_filter.as_str()),
                    ("usuario_id", owner_filter.as_str()),
                ],
            )
            .await?;

        Ok(outcome)
    }

    /// Count of the caller's active listings (dashboard card)
    pub async fn count_active(&self) -> Result<u64, AppError> {
        let user = self.current_user().await?;
        let owner_filter = format!("eq.{}", user.id);

        let count = self
            .client
            .count_rows(
                LISTINGS_TABLE,
                &[
                    ("select", "*"),
                    ("usuario_id", owner_filter.as_str()),
                    ("activo", "eq.true"),
                ],
            )
            .await?;
        Ok(count)
    }

    /// Stats over an already-fetched set of listings
    pub fn stats(listings: &[Listing]) -> ListingStats {
        ListingStats::from_listings(listings, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ListingInput {
        ListingInput {
            titulo: "Depto céntrico".to_string(),
            descripcion: "Dos ambientes con balcón".to_string(),
            precio: 120000.0,
            tipo_operacion: "venta".to_string(),
            tipo_inmueble: "departamento".to_string(),
            direccion: "Av. Corrientes 1234".to_string(),
            ciudad: "Buenos Aires".to_string(),
            country: "Argentina".to_string(),
        }
    }

    #[test]
    fn test_listing_input_validation() {
        assert!(input().validate().is_ok());

        let mut bad = input();
        bad.titulo = "  ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.precio = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.ciudad = String::new();
        assert!(bad.validate().is_err());
    }

    #[tokio::test]
    async fn test_create_listing_requires_session() {
        let client = SupabaseClient::new(
            "http://127.0.0.1:1".to_string(),
            "anon-key".to_string(),
        )
        .unwrap();
        let service = ListingService::new(client);

        let result = service.create_listing(input()).await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::NotLoggedIn))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_auth_check() {
        let client = SupabaseClient::new(
            "http://127.0.0.1:1".to_string(),
            "anon-key".to_string(),
        )
        .unwrap();
        let service = ListingService::new(client);

        let mut bad = input();
        bad.precio = 0.0;
        let result = service.create_listing(bad).await;
        assert!(matches!(result, Err(AppError::Utils(_))));
    }
}
