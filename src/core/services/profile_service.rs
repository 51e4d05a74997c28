use crate::AppError;
use crate::api::client::SupabaseClient;
use crate::api::models::{Profile, User};
use crate::error::{ApiError, AuthError};
use crate::utils::file::{
    avatar_object_path, content_type_for_extension, file_extension, file_size, read_file_bytes,
};
use crate::utils::validation::validate_avatar_size;
use chrono::Utc;
use std::path::Path;

const AVATARS_BUCKET: &str = "avatars";

/// Fields of a profile update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
}

/// Reads and writes the `profiles` row of the authenticated user and
/// uploads avatar files to the `avatars` bucket.
pub struct ProfileService {
    client: SupabaseClient,
}

impl ProfileService {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Resolve the authenticated user from the current session. A 401 here
    /// means the stored token expired.
    pub async fn current_user(&self) -> Result<User, AppError> {
        if !self.client.is_authenticated() {
            return Err(AuthError::NotLoggedIn.into());
        }
        self.client.get_user().await.map_err(|e| match e {
            ApiError::Unauthorized { .. } => AuthError::SessionInvalid.into(),
            other => other.into(),
        })
    }

    /// Profile row for the given user, if one exists yet
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let id_filter = format!("eq.{}", user_id);
        let rows: Vec<Profile> = self
            .client
            .select_rows("profiles", &[("select", "*"), ("id", id_filter.as_str())])
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Apply a profile update: optional avatar upload first, then a single
    /// upsert of the full row keyed by user id. Fields left `None` keep
    /// their stored values.
    pub async fn update_profile(
        &self,
        update: ProfileUpdate,
        avatar: Option<&Path>,
    ) -> Result<Profile, AppError> {
        let user = self.current_user().await?;
        let existing = self.get_profile(&user.id).await?.unwrap_or(Profile {
            id: user.id.clone(),
            ..Default::default()
        });

        let avatar_url = match avatar {
            Some(path) => Some(self.upload_avatar(&user.id, path).await?),
            None => existing.avatar_url.clone(),
        };

        let profile = Profile {
            id: user.id.clone(),
            nombre: update.nombre.or(existing.nombre),
            apellido: update.apellido.or(existing.apellido),
            bio: update.bio.or(existing.bio),
            country: update.country.or(existing.country),
            avatar_url,
        };

        self.client.upsert("profiles", &profile).await?;
        Ok(profile)
    }

    /// Upload an avatar file and return its public URL. Files over the
    /// 2 MB limit are rejected before any bytes leave the machine.
    pub async fn upload_avatar(&self, user_id: &str, path: &Path) -> Result<String, AppError> {
        validate_avatar_size(file_size(path)?)?;

        let ext = file_extension(path).unwrap_or_else(|| "png".to_string());
        let object_path = avatar_object_path(user_id, Utc::now().timestamp_millis(), &ext);
        let bytes = read_file_bytes(path)?;

        self.client
            .upload_object(
                AVATARS_BUCKET,
                &object_path,
                bytes,
                content_type_for_extension(&ext),
            )
            .await?;

        Ok(self.client.public_url(AVATARS_BUCKET, &object_path))
    }
}
