//! GoTrue auth endpoints: sign-up, password grant, logout, current user

use crate::api::client::{DEFAULT_TIMEOUT_SECS, SupabaseClient};
use crate::api::models::{
    PasswordGrantRequest, SignUpRequest, SignUpResponse, TokenResponse, User, UserMetadata,
};
use crate::error::ApiError;
use reqwest::Method;

impl SupabaseClient {
    /// Register a new user, optionally with profile metadata and an
    /// email-confirmation redirect URL
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
        redirect_to: Option<&str>,
    ) -> Result<SignUpResponse, ApiError> {
        let endpoint = "/auth/v1/signup";
        let body = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            data: metadata,
        };

        let mut request = self.build_request(Method::POST, endpoint).json(&body);
        if let Some(url) = redirect_to {
            request = request.query(&[("redirect_to", url)]);
        }

        let response = request.send().await.map_err(|e| self.send_error(endpoint, e))?;
        self.handle_response(response, endpoint).await
    }

    /// Exchange email + password for a session (password grant).
    /// On success the access token is installed on the client.
    pub async fn sign_in_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let endpoint = "/auth/v1/token";
        let body = PasswordGrantRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .build_request(Method::POST, endpoint)
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(endpoint, e))?;

        let token: TokenResponse = self.handle_response(response, endpoint).await?;
        self.set_access_token(token.access_token.clone());
        Ok(token)
    }

    /// Invalidate the current session server-side
    pub async fn sign_out(&mut self) -> Result<(), ApiError> {
        let endpoint = "/auth/v1/logout";
        let response = self
            .build_request(Method::POST, endpoint)
            .send()
            .await
            .map_err(|e| self.send_error(endpoint, e))?;

        self.handle_empty_response(response, endpoint).await?;
        self.access_token = None;
        Ok(())
    }

    /// Current authenticated user, resolved from the bearer token
    pub async fn get_user(&self) -> Result<User, ApiError> {
        let endpoint = "/auth/v1/user";
        let response = self
            .build_request(Method::GET, endpoint)
            .send()
            .await
            .map_err(|e| self.send_error(endpoint, e))?;

        self.handle_response(response, endpoint).await
    }

    pub(crate) fn send_error(&self, endpoint: &str, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                endpoint: endpoint.to_string(),
            }
        } else {
            ApiError::Http {
                status: error
                    .status()
                    .map(|s| s.as_u16())
                    .unwrap_or(0),
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        }
    }
}
