//! PostgREST data API helpers: filtered selects, inserts, upserts, deletes
//! and exact counts against `/rest/v1/{table}`.

use crate::api::client::SupabaseClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Accept header that makes PostgREST return a single object instead of
/// a one-element array (the `.single()` of the JS client)
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

impl SupabaseClient {
    fn rest_path(table: &str) -> String {
        format!("/rest/v1/{}", table)
    }

    /// Select rows matching the given query parameters
    /// (e.g. `select=*`, `usuario_id=eq.<uid>`, `order=created_at.desc`)
    pub async fn select_rows<T>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let endpoint = Self::rest_path(table);
        let response = self
            .build_request(Method::GET, &endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_response(response, &endpoint).await
    }

    /// Insert one row and return the stored representation
    pub async fn insert_returning<T, B>(&self, table: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let endpoint = Self::rest_path(table);
        let response = self
            .build_request(Method::POST, &endpoint)
            .header("Prefer", "return=representation")
            .header("Accept", ACCEPT_SINGLE_OBJECT)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_response(response, &endpoint).await
    }

    /// Insert-or-update keyed on the table's primary key
    pub async fn upsert<B>(&self, table: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = Self::rest_path(table);
        let response = self
            .build_request(Method::POST, &endpoint)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_empty_response(response, &endpoint).await
    }

    /// Delete all rows matching the filters
    pub async fn delete_rows(&self, table: &str, query: &[(&str, &str)]) -> Result<(), ApiError> {
        let endpoint = Self::rest_path(table);
        let response = self
            .build_request(Method::DELETE, &endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_empty_response(response, &endpoint).await
    }

    /// Exact row count via a HEAD request, parsed from `Content-Range`
    pub async fn count_rows(&self, table: &str, query: &[(&str, &str)]) -> Result<u64, ApiError> {
        let endpoint = Self::rest_path(table);
        let response = self
            .build_request(Method::HEAD, &endpoint)
            .query(query)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::error_from_status(status.as_u16(), &endpoint, message));
        }

        let content_range = response
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.clone(),
                message: "Missing Content-Range header in count response".to_string(),
            })?;

        parse_content_range_total(content_range).ok_or_else(|| ApiError::Http {
            status: status.as_u16(),
            endpoint,
            message: format!("Unparseable Content-Range header: {}", content_range),
        })
    }
}

/// Total from a PostgREST `Content-Range`, e.g. "0-24/345" → 345, "*/0" → 0
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}
