use super::types::AuthStatus;
use crate::AppError;
use crate::api::client::SupabaseClient;
use crate::api::models::{SignUpResponse, UserMetadata};
use crate::core::auth::{LoginInput, SignUpInput};
use crate::error::{ApiError, AuthError};
use crate::storage::credentials::{AuthMode, Credentials};

/// Authentication service for managing user authentication
pub struct AuthService {
    credentials: Credentials,
    client: SupabaseClient,
}

impl AuthService {
    /// Create new AuthService instance
    pub fn new(credentials: Credentials, client: SupabaseClient) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Register a new user. Validation runs locally first, so mismatched
    /// or short passwords never produce a network call.
    pub async fn sign_up(
        &self,
        input: SignUpInput,
        redirect_to: Option<&str>,
    ) -> Result<SignUpResponse, AppError> {
        input.validate()?;

        let metadata = UserMetadata {
            nombre: input.nombre.clone(),
            apellido: input.apellido.clone(),
            country: input.country.clone(),
        };

        let response = self
            .client
            .sign_up(&input.email, &input.password, metadata, redirect_to)
            .await?;

        Ok(response)
    }

    /// Authenticate user with email and password
    pub async fn authenticate(&mut self, input: LoginInput) -> Result<(), AppError> {
        // Validate input
        input.validate()?;

        // Perform password-grant login against GoTrue. A 400/401 from the
        // token endpoint means the email/password pair was wrong.
        self.client
            .sign_in_with_password(&input.email, &input.password)
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized { .. } | ApiError::Http { status: 400, .. } => {
                    AppError::Auth(AuthError::InvalidCredentials)
                }
                other => other.into(),
            })?;

        // Get session token from client and save it to keychain
        if let Some(token) = self.client.get_access_token() {
            Credentials::save_session_for_profile(&self.credentials.profile_name, &token)?;
            // Update credentials instance to reflect the new session token
            self.credentials.set_access_token(Some(token));
        }

        Ok(())
    }

    /// Logout current user
    pub async fn logout(&mut self) -> Result<(), AppError> {
        // Invalidate session server-side; a dead token still gets cleared locally
        if self.client.get_access_token().is_some() {
            if let Err(e) = self.client.sign_out().await {
                crate::utils::logging::log_warning(&format!(
                    "Server-side logout failed: {}",
                    e
                ));
            }
        }

        // Clear session information from credentials
        Credentials::clear_session_for_profile(&self.credentials.profile_name)?;
        self.credentials.set_access_token(None);

        Ok(())
    }

    /// Get current authentication status
    pub fn get_auth_status(&self) -> AuthStatus {
        let auth_mode = self.credentials.get_auth_mode();
        let access_token = self.credentials.get_access_token();

        AuthStatus {
            is_authenticated: self.is_authenticated(),
            auth_mode: auth_mode.clone(),
            profile_name: self.credentials.profile_name.clone(),
            session_active: access_token.is_some(),
        }
    }

    /// Check if user is currently authenticated
    pub fn is_authenticated(&self) -> bool {
        match self.credentials.get_auth_mode() {
            AuthMode::ServiceKey => true, // Service key is always considered authenticated
            AuthMode::Session => self.credentials.get_access_token().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_auth_status_structure() {
        let credentials = Credentials::new("test".to_string());
        let client = SupabaseClient::new(
            "http://localhost:54321".to_string(),
            "anon-key".to_string(),
        )
        .unwrap();
        let service = AuthService::new(credentials, client);

        let status = service.get_auth_status();
        assert_eq!(status.profile_name, "test");
        assert!(
            status.auth_mode == AuthMode::ServiceKey || status.auth_mode == AuthMode::Session
        );
    }

    #[tokio::test]
    async fn test_sign_up_rejects_bad_input_before_network() {
        let credentials = Credentials::new("test".to_string());
        // Nothing listens on this address; if validation short-circuits
        // correctly the call never reaches the socket
        let client = SupabaseClient::new(
            "http://127.0.0.1:1".to_string(),
            "anon-key".to_string(),
        )
        .unwrap();
        let service = AuthService::new(credentials, client);

        let input = SignUpInput {
            email: "ana@example.test".to_string(),
            password: "abc".to_string(),
            confirmation: "abc".to_string(),
            nombre: None,
            apellido: None,
            country: None,
        };

        let result = service.sign_up(input, None).await;
        assert!(matches!(result, Err(AppError::Utils(_))));
    }
}
