use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom deserializer: older `anuncios` rows predate the `activo` column,
/// so null/missing values are treated as active
fn deserialize_activo<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(true),
        _ => Ok(true),
    }
}

fn default_activo() -> bool {
    true
}

// Authentication models (GoTrue)
#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: UserMetadata,
}

/// Optional metadata attached to the auth user at registration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Sign-up response. Depending on the project's email-confirmation setting
/// GoTrue returns either the bare user or a full session.
#[derive(Debug, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub confirmation_sent_at: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl SignUpResponse {
    /// True when the server queued a confirmation email instead of a session
    pub fn needs_confirmation(&self) -> bool {
        self.confirmation_sent_at.is_some()
    }
}

#[derive(Debug, Serialize)]
pub struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

// Data API models (PostgREST)

/// Row of the `profiles` table; one-to-one with the auth user
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Profile {
    /// Initials for avatar fallback display, e.g. "Ana Pérez" → "AP"
    pub fn initials(&self) -> String {
        let first = |s: &Option<String>| {
            s.as_deref()
                .and_then(|v| v.chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default()
        };
        let initials = format!("{}{}", first(&self.nombre), first(&self.apellido));
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Insert payload for the `anuncios` table
#[derive(Debug, Serialize, Clone)]
pub struct NewListing {
    pub titulo: String,
    pub descripcion: String,
    pub precio: f64,
    pub tipo_operacion: String,
    pub tipo_inmueble: String,
    pub direccion: String,
    pub ciudad: String,
    pub country: String,
    pub usuario_id: String,
}

/// Row of the `anuncios` table, optionally with embedded images
#[derive(Debug, Deserialize, Clone)]
pub struct Listing {
    pub id: String,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,
    pub tipo_operacion: String,
    pub tipo_inmueble: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub country: String,
    pub usuario_id: String,
    #[serde(
        deserialize_with = "deserialize_activo",
        default = "default_activo"
    )]
    pub activo: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "anuncio_imagenes", default)]
    pub imagenes: Vec<ListingImage>,
}

impl Listing {
    /// Cover image: orden = 1 when present, otherwise the first image
    pub fn cover_image(&self) -> Option<&ListingImage> {
        self.imagenes
            .iter()
            .find(|img| img.orden == 1)
            .or_else(|| self.imagenes.first())
    }
}

/// Row of the `anuncio_imagenes` table
#[derive(Debug, Deserialize, Clone)]
pub struct ListingImage {
    pub id: String,
    #[serde(default)]
    pub anuncio_id: Option<String>,
    pub url: String,
    pub orden: u32,
}

/// Insert payload for the `anuncio_imagenes` table
#[derive(Debug, Serialize, Clone)]
pub struct NewListingImage {
    pub anuncio_id: String,
    pub url: String,
    pub orden: u32,
}

/// Projection used by the delete cascade (`select=url`)
#[derive(Debug, Deserialize, Clone)]
pub struct ImageUrl {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_with_missing_activo() {
        let json = r#"{
            "id": "a1",
            "titulo": "Depto centro",
            "precio": 120000.0,
            "tipo_operacion": "venta",
            "tipo_inmueble": "departamento",
            "usuario_id": "u1"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.activo);
        assert!(listing.imagenes.is_empty());
        assert!(listing.created_at.is_none());
    }

    #[test]
    fn test_deserialize_listing_with_null_activo() {
        let json = r#"{
            "id": "a1",
            "titulo": "Depto centro",
            "precio": 120000.0,
            "tipo_operacion": "venta",
            "tipo_inmueble": "departamento",
            "usuario_id": "u1",
            "activo": null
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.activo);
    }

    #[test]
    fn test_deserialize_listing_with_embedded_images() {
        let json = r#"{
            "id": "a1",
            "titulo": "Casa con jardín",
            "precio": 250000.0,
            "tipo_operacion": "venta",
            "tipo_inmueble": "casa",
            "usuario_id": "u1",
            "activo": false,
            "created_at": "2025-03-10T12:00:00Z",
            "anuncio_imagenes": [
                {"id": "i2", "url": "https://x.test/2.jpg", "orden": 2},
                {"id": "i1", "url": "https://x.test/1.jpg", "orden": 1}
            ]
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(!listing.activo);
        assert_eq!(listing.imagenes.len(), 2);
        // Cover image is orden = 1 regardless of array order
        assert_eq!(listing.cover_image().unwrap().id, "i1");
    }

    #[test]
    fn test_cover_image_falls_back_to_first() {
        let json = r#"{
            "id": "a1",
            "titulo": "PH",
            "precio": 90000.0,
            "tipo_operacion": "alquiler",
            "tipo_inmueble": "ph",
            "usuario_id": "u1",
            "anuncio_imagenes": [
                {"id": "i5", "url": "https://x.test/5.jpg", "orden": 5},
                {"id": "i7", "url": "https://x.test/7.jpg", "orden": 7}
            ]
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.cover_image().unwrap().id, "i5");
    }

    #[test]
    fn test_sign_up_request_serialization() {
        let request = SignUpRequest {
            email: "ana@example.test".to_string(),
            password: "secreta1".to_string(),
            data: UserMetadata {
                nombre: Some("Ana".to_string()),
                apellido: None,
                country: Some("Argentina".to_string()),
            },
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("ana@example.test"));
        assert!(json.contains("\"nombre\":\"Ana\""));
        // None fields are omitted from the payload
        assert!(!json.contains("apellido"));
    }

    #[test]
    fn test_sign_up_response_needs_confirmation() {
        let json = r#"{"id": "u1", "email": "ana@example.test",
                       "confirmation_sent_at": "2025-03-10T12:00:00Z"}"#;
        let response: SignUpResponse = serde_json::from_str(json).unwrap();
        assert!(response.needs_confirmation());

        let json = r#"{"id": "u1", "email": "ana@example.test"}"#;
        let response: SignUpResponse = serde_json::from_str(json).unwrap();
        assert!(!response.needs_confirmation());
    }

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {"id": "u1", "email": "ana@example.test"}
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "jwt-token");
        assert_eq!(token.user.id, "u1");
    }

    #[test]
    fn test_profile_initials() {
        let profile = Profile {
            id: "u1".to_string(),
            nombre: Some("ana".to_string()),
            apellido: Some("pérez".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.initials(), "AP");

        let empty = Profile {
            id: "u1".to_string(),
            ..Default::default()
        };
        assert_eq!(empty.initials(), "U");
    }
}
