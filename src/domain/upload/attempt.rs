//! Upload attempt state machine

use std::fmt;
use thiserror::Error;

/// States of a single upload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UploadState {
    #[default]
    Start,
    DescriptorResolved,
    LocationRequested,
    LocationGranted,
    Uploading,
    Uploaded,
    LocationDenied,
    UploadRejected,
    FinalUrlMissing,
    TransportError,
    Cancelled,
}

impl UploadState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::DescriptorResolved => "descriptor-resolved",
            Self::LocationRequested => "location-requested",
            Self::LocationGranted => "location-granted",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::LocationDenied => "location-denied",
            Self::UploadRejected => "upload-rejected",
            Self::FinalUrlMissing => "final-url-missing",
            Self::TransportError => "transport-error",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Uploaded
                | Self::LocationDenied
                | Self::UploadRejected
                | Self::FinalUrlMissing
                | Self::TransportError
                | Self::Cancelled
        )
    }

    pub const fn is_failure(&self) -> bool {
        self.is_terminal() && !matches!(self, Self::Uploaded)
    }
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid upload transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: UploadState,
    pub action: String,
}

/// One pass through the two-phase upload handshake.
///
/// State machine:
///   START -> DESCRIPTOR_RESOLVED -> LOCATION_REQUESTED -> LOCATION_GRANTED
///         -> UPLOADING -> UPLOADED
///   LOCATION_REQUESTED -> LOCATION_DENIED | TRANSPORT_ERROR
///   UPLOADING -> UPLOAD_REJECTED | FINAL_URL_MISSING | TRANSPORT_ERROR
///   any non-terminal -> CANCELLED
///
/// Terminal states never transition again.
#[derive(Debug, Default)]
pub struct UploadAttempt {
    state: UploadState,
    history: Vec<UploadState>,
}

impl UploadAttempt {
    pub fn new() -> Self {
        Self {
            state: UploadState::Start,
            history: vec![UploadState::Start],
        }
    }

    /// Get the current state
    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Every state this attempt has been in, oldest first
    pub fn history(&self) -> &[UploadState] {
        &self.history
    }

    pub fn resolve_descriptor(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(
            UploadState::Start,
            UploadState::DescriptorResolved,
            "resolve descriptor",
        )
    }

    pub fn request_location(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(
            UploadState::DescriptorResolved,
            UploadState::LocationRequested,
            "request location",
        )
    }

    pub fn grant_location(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(
            UploadState::LocationRequested,
            UploadState::LocationGranted,
            "grant location",
        )
    }

    pub fn start_upload(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(
            UploadState::LocationGranted,
            UploadState::Uploading,
            "start upload",
        )
    }

    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(UploadState::Uploading, UploadState::Uploaded, "complete")
    }

    /// Move into a failure state, checking it is reachable from here.
    pub fn fail(&mut self, failure: UploadState) -> Result<(), InvalidStateTransition> {
        let allowed = match failure {
            UploadState::LocationDenied => self.state == UploadState::LocationRequested,
            UploadState::UploadRejected | UploadState::FinalUrlMissing => {
                self.state == UploadState::Uploading
            }
            UploadState::TransportError => matches!(
                self.state,
                UploadState::LocationRequested | UploadState::Uploading
            ),
            UploadState::Cancelled => !self.state.is_terminal(),
            _ => false,
        };

        if !allowed {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: format!("fail with {}", failure),
            });
        }
        self.enter(failure);
        Ok(())
    }

    fn advance(
        &mut self,
        from: UploadState,
        to: UploadState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.enter(to);
        Ok(())
    }

    fn enter(&mut self, state: UploadState) {
        tracing::debug!(from = %self.state, to = %state, "upload transition");
        self.state = state;
        self.history.push(state);
    }
}
