use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("inmo-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Supabase backend (auth, data API and object storage).
///
/// Every request carries the project `apikey` header; the Authorization
/// bearer is the service key, the user session token, or the anon key,
/// in that order of priority.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    pub base_url: String,
    pub anon_key: String,
    pub access_token: Option<String>,
    pub service_key: Option<String>,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(SupabaseClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            access_token: None,
            service_key: None,
        })
    }

    pub fn with_service_key(
        base_url: String,
        anon_key: String,
        service_key: String,
    ) -> Result<Self, ApiError> {
        let mut client = SupabaseClient::new(base_url, anon_key)?;
        client.service_key = Some(service_key);
        Ok(client)
    }

    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn get_access_token(&self) -> Option<String> {
        self.access_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.service_key.is_some() || self.access_token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        request = request.header("apikey", &self.anon_key);

        let bearer = if let Some(key) = &self.service_key {
            key
        } else if let Some(token) = &self.access_token {
            token
        } else {
            &self.anon_key
        };
        request = request.header("Authorization", format!("Bearer {}", bearer));

        request
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(Self::error_from_status(
                status.as_u16(),
                endpoint,
                response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            ))
        }
    }

    /// Variant for endpoints that return no useful body (deletes, logout)
    pub async fn handle_empty_response(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<(), ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_status(
                status.as_u16(),
                endpoint,
                response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            ))
        }
    }

    pub(crate) fn error_from_status(status: u16, endpoint: &str, error_text: String) -> ApiError {
        match status {
            401 | 403 => ApiError::Unauthorized {
                status,
                endpoint: endpoint.to_string(),
                server_message: error_text,
            },
            408 | 504 => ApiError::Timeout {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                endpoint: endpoint.to_string(),
            },
            _ => ApiError::Http {
                status,
                endpoint: endpoint.to_string(),
                message: error_text,
            },
        }
    }
}
