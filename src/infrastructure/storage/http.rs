//! HTTP storage transport adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Url;

use crate::application::ports::{LocationGrant, LocationRequest, StorageTransport, UploadError};

/// Talks to an upload-location endpoint and to the presigned targets it
/// hands out.
pub struct HttpStorageTransport {
    endpoint: Url,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl HttpStorageTransport {
    /// Create a transport for the given location endpoint.
    ///
    /// `auth_token` is sent as a bearer token on the location request only;
    /// the presigned write carries its own authorization.
    pub fn new(
        endpoint: Url,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint,
            auth_token,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Network-level failures are transport errors; a request that could
    /// not even be built is treated as a refused location.
    fn classify(e: reqwest::Error) -> UploadError {
        if e.is_builder() {
            UploadError::LocationDenied(format!("invalid request: {}", e))
        } else {
            UploadError::Transport(e.to_string())
        }
    }

    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}

#[async_trait]
impl StorageTransport for HttpStorageTransport {
    async fn request_location(
        &self,
        request: &LocationRequest,
    ) -> Result<LocationGrant, UploadError> {
        // the same value becomes the write's header, so refuse it up front
        if HeaderValue::from_str(&request.content_type).is_err() {
            return Err(UploadError::LocationDenied(format!(
                "content type {:?} is not a valid header value",
                request.content_type
            )));
        }

        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(ref token) = self.auth_token {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(endpoint = %self.endpoint, file_name = %request.file_name, "requesting upload location");
        let response = builder.send().await.map_err(Self::classify)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = Self::error_body(response).await;
            return Err(UploadError::LocationDenied(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        response.json::<LocationGrant>().await.map_err(|e| {
            if e.is_decode() {
                UploadError::LocationDenied(format!("unreadable response: {}", e))
            } else {
                Self::classify(e)
            }
        })
    }

    async fn put_object(
        &self,
        target: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<(), UploadError> {
        tracing::debug!(bytes = body.len(), content_type, "writing object");
        let response = self
            .client
            .put(target.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(UploadError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
