//! Media descriptor resolution

use std::sync::atomic::{AtomicU64, Ordering};

use super::payload::RecordingPayload;

/// Prefix of every generated upload file name
pub const FILE_NAME_PREFIX: &str = "recording-";

/// Container substrings checked against the MIME type, in priority order.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("webm", "webm"),
    ("mp4", "mp4"),
    ("mpeg", "mp3"),
    ("wav", "wav"),
    ("ogg", "ogg"),
];

/// Distinguishes names generated within the same millisecond.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// MIME type, extension and file name negotiated for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    mime_type: String,
    extension: String,
    file_name: String,
}

impl MediaDescriptor {
    /// Resolve the descriptor for a payload, naming it
    /// `recording-<unix millis>-<sequence>.<ext>`.
    pub fn resolve(payload: &RecordingPayload) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::resolve_with_token(payload, &format!("{}-{}", millis, sequence))
    }

    /// Resolve with a caller-chosen unique token.
    pub fn resolve_with_token(payload: &RecordingPayload, token: &str) -> Self {
        let kind = payload.kind();
        let mime_type = if payload.container_type().is_empty() {
            kind.default_mime_type().to_string()
        } else {
            payload.container_type().to_string()
        };

        let extension = EXTENSION_TABLE
            .iter()
            .find(|(needle, _)| mime_type.contains(needle))
            .map(|(_, ext)| *ext)
            .unwrap_or_else(|| kind.default_extension())
            .to_string();

        let file_name = format!("{}{}.{}", FILE_NAME_PREFIX, token, extension);

        Self {
            mime_type,
            extension,
            file_name,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
