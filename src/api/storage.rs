//! Object storage endpoints: upload, public URL derivation, delete by path

use crate::api::client::SupabaseClient;
use crate::error::ApiError;
use reqwest::Method;

impl SupabaseClient {
    /// Upload raw bytes to `bucket/object_path`. The object becomes
    /// reachable at the public URL once the bucket policy allows it.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ApiError> {
        let endpoint = format!("/storage/v1/object/{}/{}", bucket, object_path);
        let response = self
            .build_request(Method::POST, &endpoint)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_empty_response(response, &endpoint).await
    }

    /// Public URL for an object in a public bucket
    pub fn public_url(&self, bucket: &str, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, object_path
        )
    }

    /// Delete a single object by path
    pub async fn remove_object(&self, bucket: &str, object_path: &str) -> Result<(), ApiError> {
        let endpoint = format!("/storage/v1/object/{}/{}", bucket, object_path);
        let response = self
            .build_request(Method::DELETE, &endpoint)
            .send()
            .await
            .map_err(|e| self.send_error(&endpoint, e))?;

        self.handle_empty_response(response, &endpoint).await
    }
}
