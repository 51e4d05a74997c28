//! Tests for the auth and profile flows against a mocked Supabase backend,
//! including the local-validation guarantees (no request leaves the machine
//! on invalid input).

use inmo_cli::api::client::SupabaseClient;
use inmo_cli::core::auth::SignUpInput;
use inmo_cli::core::services::auth_service::AuthService;
use inmo_cli::core::services::profile_service::{ProfileService, ProfileUpdate};
use inmo_cli::storage::credentials::Credentials;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(server.uri(), "anon-key".to_string()).expect("client creation failed")
}

fn authed_client(server: &MockServer) -> SupabaseClient {
    let mut client = client_for(server);
    client.set_access_token("user-jwt".to_string());
    client
}

#[tokio::test]
async fn signup_mismatched_confirmation_sends_no_request() {
    let server = MockServer::start().await;

    let service = AuthService::new(Credentials::new("test".to_string()), client_for(&server));
    let input = SignUpInput {
        email: "ana@example.test".to_string(),
        password: "secreta1".to_string(),
        confirmation: "secreta2".to_string(),
        nombre: None,
        apellido: None,
        country: None,
    };

    let result = service.sign_up(input, None).await;
    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn signup_short_password_sends_no_request() {
    let server = MockServer::start().await;

    let service = AuthService::new(Credentials::new("test".to_string()), client_for(&server));
    let input = SignUpInput {
        email: "ana@example.test".to_string(),
        password: "corta".to_string(),
        confirmation: "corta".to_string(),
        nombre: None,
        apellido: None,
        country: None,
    };

    let result = service.sign_up(input, None).await;
    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn signup_forwards_metadata_and_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(query_param("redirect_to", "https://app.example.test/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "ana@example.test",
            "confirmation_sent_at": "2025-03-10T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = AuthService::new(Credentials::new("test".to_string()), client_for(&server));
    let input = SignUpInput {
        email: "ana@example.test".to_string(),
        password: "secreta1".to_string(),
        confirmation: "secreta1".to_string(),
        nombre: Some("Ana".to_string()),
        apellido: Some("Pérez".to_string()),
        country: Some("Argentina".to_string()),
    };

    let response = service
        .sign_up(input, Some("https://app.example.test/confirm"))
        .await
        .unwrap();
    assert!(response.needs_confirmation());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["data"]["nombre"], "Ana");
    assert_eq!(body["data"]["country"], "Argentina");
}

#[tokio::test]
async fn oversized_avatar_sends_no_request() {
    let server = MockServer::start().await;

    let service = ProfileService::new(authed_client(&server));

    let mut file = tempfile::NamedTempFile::with_suffix(".png").expect("temp file");
    let chunk = vec![0u8; 1024 * 1024];
    file.write_all(&chunk).unwrap();
    file.write_all(&chunk).unwrap();
    file.write_all(&[0u8]).unwrap();
    file.flush().unwrap();

    let result = service.upload_avatar("u1", file.path()).await;
    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn profile_update_merges_unset_fields_from_stored_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "ana@example.test"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "u1",
            "nombre": "Ana",
            "apellido": "Pérez",
            "bio": "Hola",
            "avatar_url": "https://x.test/avatar.png",
            "country": "Argentina"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let service = ProfileService::new(authed_client(&server));
    let updated = service
        .update_profile(
            ProfileUpdate {
                bio: Some("Nueva bio".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    // Only bio changes; the rest carries over from the stored row
    assert_eq!(updated.bio.as_deref(), Some("Nueva bio"));
    assert_eq!(updated.nombre.as_deref(), Some("Ana"));
    assert_eq!(updated.avatar_url.as_deref(), Some("https://x.test/avatar.png"));

    // The upsert asks PostgREST to merge on conflict
    let requests = server.received_requests().await.unwrap();
    let upsert = requests
        .iter()
        .find(|r| r.method.to_string() == "POST" && r.url.path() == "/rest/v1/profiles")
        .expect("upsert request not found");
    let prefer = upsert.headers.get("Prefer").unwrap().to_str().unwrap();
    assert!(prefer.contains("resolution=merge-duplicates"));
}

#[tokio::test]
async fn expired_session_surfaces_as_session_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("JWT expired"))
        .mount(&server)
        .await;

    let service = ProfileService::new(authed_client(&server));
    let result = service.current_user().await;
    assert!(matches!(
        result,
        Err(inmo_cli::AppError::Auth(
            inmo_cli::error::AuthError::SessionInvalid
        ))
    ));
}

#[tokio::test]
async fn wrong_password_surfaces_as_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let mut service =
        AuthService::new(Credentials::new("test".to_string()), client_for(&server));
    let result = service
        .authenticate(inmo_cli::core::auth::LoginInput {
            email: "ana@example.test".to_string(),
            password: "incorrecta".to_string(),
        })
        .await;
    assert!(matches!(
        result,
        Err(inmo_cli::AppError::Auth(
            inmo_cli::error::AuthError::InvalidCredentials
        ))
    ));
}

#[tokio::test]
async fn login_installs_token_on_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {"id": "u1", "email": "ana@example.test"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client
        .sign_in_with_password("ana@example.test", "secreta1")
        .await
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.get_access_token().as_deref(), Some("fresh-jwt"));
}
