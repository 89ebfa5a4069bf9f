//! Recording payload value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidMediaKindError;

/// What the capture collaborator says it recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    #[default]
    Audio,
    Video,
}

impl MediaKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// MIME type used when the container type is unknown
    pub const fn default_mime_type(&self) -> &'static str {
        match self {
            Self::Audio => "audio/webm",
            Self::Video => "video/webm",
        }
    }

    /// Extension used when the MIME type matches no known container
    pub const fn default_extension(&self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Video => "webm",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = InvalidMediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            _ => Err(InvalidMediaKindError {
                input: s.to_string(),
            }),
        }
    }
}

/// A finished recording handed over by the capture side.
/// Immutable; consumed by a single upload.
#[derive(Debug, Clone)]
pub struct RecordingPayload {
    data: Vec<u8>,
    kind: MediaKind,
    container_type: String,
}

impl RecordingPayload {
    /// `container_type` may be empty when the recorder did not report one.
    pub fn new(data: Vec<u8>, kind: MediaKind, container_type: impl Into<String>) -> Self {
        Self {
            data,
            kind,
            container_type: container_type.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn container_type(&self) -> &str {
        &self.container_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
