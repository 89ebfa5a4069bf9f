//! Storage transport port interface

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::upload::UploadState;

/// Shown alongside network-level failures
pub const TRANSPORT_HINT: &str =
    "check your network connection and the storage endpoint's CORS configuration";

/// Upload errors. Every variant ends the current attempt.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Upload location denied: {0}")]
    LocationDenied(String),

    #[error("Storage rejected the upload (HTTP {status}): {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Upload finished but the storage backend returned no public URL")]
    FinalUrlMissing,

    #[error("Network error: {0} ({hint})", hint = TRANSPORT_HINT)]
    Transport(String),

    #[error("Upload was cancelled")]
    Cancelled,
}

impl UploadError {
    /// The failure state an attempt ends in for this error
    pub const fn state(&self) -> UploadState {
        match self {
            Self::LocationDenied(_) => UploadState::LocationDenied,
            Self::UploadRejected { .. } => UploadState::UploadRejected,
            Self::FinalUrlMissing => UploadState::FinalUrlMissing,
            Self::Transport(_) => UploadState::TransportError,
            Self::Cancelled => UploadState::Cancelled,
        }
    }

    /// Only connectivity problems are worth another attempt
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Body of the location request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub file_name: String,
    pub content_type: String,
}

/// Location response as the backend sent it.
///
/// The write target is read from `uploadUrl`, falling back to `url`; the
/// public address from `finalUrl`, falling back to `url`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationGrant {
    upload_url: Option<String>,
    final_url: Option<String>,
    url: Option<String>,
}

impl LocationGrant {
    pub fn new(
        upload_url: Option<String>,
        final_url: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            upload_url,
            final_url,
            url,
        }
    }

    pub fn upload_target(&self) -> Option<&str> {
        non_empty(&self.upload_url).or_else(|| non_empty(&self.url))
    }

    pub fn public_url(&self) -> Option<&str> {
        non_empty(&self.final_url).or_else(|| non_empty(&self.url))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Port for the two-phase object storage handshake
#[async_trait]
pub trait StorageTransport: Send + Sync {
    /// Ask the backend where to write an object.
    ///
    /// Fails with `LocationDenied` on an error status.
    async fn request_location(&self, request: &LocationRequest)
        -> Result<LocationGrant, UploadError>;

    /// Write the whole object to a granted target in one request, with
    /// `Content-Type` set to `content_type`.
    ///
    /// Fails with `UploadRejected` on a non-2xx status.
    async fn put_object(
        &self,
        target: &Url,
        content_type: &str,
        body: &[u8],
    ) -> Result<(), UploadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(json: &str) -> LocationGrant {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = LocationRequest {
            file_name: "recording-1.webm".to_string(),
            content_type: "audio/webm".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fileName"], "recording-1.webm");
        assert_eq!(json["contentType"], "audio/webm");
    }

    #[test]
    fn explicit_keys_win() {
        let g = grant(r#"{"uploadUrl":"https://put","finalUrl":"https://get","url":"https://x"}"#);
        assert_eq!(g.upload_target(), Some("https://put"));
        assert_eq!(g.public_url(), Some("https://get"));
    }

    #[test]
    fn url_serves_both_roles() {
        let g = grant(r#"{"url":"https://both"}"#);
        assert_eq!(g.upload_target(), Some("https://both"));
        assert_eq!(g.public_url(), Some("https://both"));
    }

    #[test]
    fn missing_keys() {
        let g = grant(r#"{"uploadUrl":"https://put"}"#);
        assert_eq!(g.upload_target(), Some("https://put"));
        assert!(g.public_url().is_none());

        let g = grant(r#"{"other":true}"#);
        assert!(g.upload_target().is_none());
    }

    #[test]
    fn blank_values_count_as_missing() {
        let g = grant(r#"{"uploadUrl":"  ","url":""}"#);
        assert!(g.upload_target().is_none());
    }

    #[test]
    fn error_states() {
        assert_eq!(
            UploadError::LocationDenied("x".into()).state(),
            UploadState::LocationDenied
        );
        assert_eq!(
            UploadError::FinalUrlMissing.state(),
            UploadState::FinalUrlMissing
        );
        assert!(UploadError::Transport("reset".into()).is_transient());
        assert!(!UploadError::FinalUrlMissing.is_transient());
    }

    #[test]
    fn transport_error_carries_hint() {
        let msg = UploadError::Transport("connection refused".into()).to_string();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("CORS"));
    }
}
