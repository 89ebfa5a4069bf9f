//! Upload media use case

use std::future::Future;

use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::domain::media::{MediaDescriptor, RecordingPayload};
use crate::domain::upload::{
    InvalidStateTransition, RetryPolicy, UploadAttempt, UploadLocation, UploadState,
};

use super::ports::{LocationRequest, StorageTransport, UploadError};

/// Output from a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutput {
    /// Durable address of the stored recording
    pub public_url: Url,
    /// Name the object was stored under
    pub file_name: String,
    /// Content type negotiated and sent
    pub mime_type: String,
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// States the successful attempt went through
    pub history: Vec<UploadState>,
}

/// Two-phase upload: ask the backend for a write location, then write the
/// recording there in one request.
///
/// Each invocation is independent. Uploading the same payload twice stores
/// it twice.
pub struct UploadMediaUseCase<T: StorageTransport> {
    transport: T,
    retry: RetryPolicy,
}

impl<T: StorageTransport> UploadMediaUseCase<T> {
    /// Create a use case that never retries
    pub fn new(transport: T) -> Self {
        Self::with_retry(transport, RetryPolicy::none())
    }

    pub fn with_retry(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the backend where `descriptor` may be written.
    pub async fn request_upload_location(
        &self,
        descriptor: &MediaDescriptor,
    ) -> Result<UploadLocation, UploadError> {
        let request = LocationRequest {
            file_name: descriptor.file_name().to_string(),
            content_type: descriptor.mime_type().to_string(),
        };

        let grant = self.transport.request_location(&request).await?;

        let target = grant.upload_target().ok_or_else(|| {
            UploadError::LocationDenied("response has no uploadUrl or url".to_string())
        })?;
        let target = Url::parse(target)
            .map_err(|e| UploadError::LocationDenied(format!("invalid upload target: {}", e)))?;

        let public_url = grant.public_url().and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unparsable public URL in location grant");
                None
            }
        });

        Ok(UploadLocation::new(target, public_url))
    }

    /// Write the payload to the granted target. `mime_type` must be the one
    /// sent with the location request.
    pub async fn perform_upload(
        &self,
        location: &UploadLocation,
        payload: &RecordingPayload,
        mime_type: &str,
    ) -> Result<(), UploadError> {
        self.transport
            .put_object(location.upload_target(), mime_type, payload.data())
            .await
    }

    /// The public address; a write without one is a failed upload.
    pub fn finalize_upload(location: &UploadLocation) -> Result<Url, UploadError> {
        location
            .public_url()
            .cloned()
            .ok_or(UploadError::FinalUrlMissing)
    }

    /// Resolve, request a location, write, finalize. All or nothing.
    ///
    /// Network failures are retried per the configured policy, each retry
    /// starting over with a fresh location. Cancelling `cancel` ends the
    /// upload with [`UploadError::Cancelled`].
    pub async fn upload_media(
        &self,
        payload: &RecordingPayload,
        cancel: &CancellationToken,
    ) -> Result<UploadOutput, UploadError> {
        let mut attempt_no = 0;

        loop {
            attempt_no += 1;
            let mut attempt = UploadAttempt::new();

            match self.run_attempt(payload, &mut attempt, cancel).await {
                Ok((public_url, descriptor)) => {
                    tracing::info!(
                        url = %public_url,
                        file_name = descriptor.file_name(),
                        attempts = attempt_no,
                        "upload complete"
                    );
                    return Ok(UploadOutput {
                        public_url,
                        file_name: descriptor.file_name().to_string(),
                        mime_type: descriptor.mime_type().to_string(),
                        attempts: attempt_no,
                        history: attempt.history().to_vec(),
                    });
                }
                Err(e) if e.is_transient() && self.retry.allows_retry_after(attempt_no) => {
                    let delay = self.retry.delay(attempt_no, &mut rand::thread_rng());
                    tracing::warn!(
                        error = %e,
                        attempt = attempt_no,
                        delay_ms = delay.as_millis() as u64,
                        "upload attempt failed, retrying"
                    );
                    cancellable(cancel, async {
                        tokio::time::sleep(delay).await;
                        Ok(())
                    })
                    .await?;
                }
                Err(e) => {
                    tracing::warn!(error = %e, attempt = attempt_no, "upload failed");
                    return Err(e);
                }
            }
        }
    }

    async fn run_attempt(
        &self,
        payload: &RecordingPayload,
        attempt: &mut UploadAttempt,
        cancel: &CancellationToken,
    ) -> Result<(Url, MediaDescriptor), UploadError> {
        let result = self.drive(payload, attempt, cancel).await;
        if let Err(ref e) = result {
            step(attempt, |a| a.fail(e.state()));
        }
        result
    }

    async fn drive(
        &self,
        payload: &RecordingPayload,
        attempt: &mut UploadAttempt,
        cancel: &CancellationToken,
    ) -> Result<(Url, MediaDescriptor), UploadError> {
        let descriptor = MediaDescriptor::resolve(payload);
        step(attempt, UploadAttempt::resolve_descriptor);
        tracing::debug!(
            file_name = descriptor.file_name(),
            mime_type = descriptor.mime_type(),
            size = %payload.human_readable_size(),
            "descriptor resolved"
        );

        step(attempt, UploadAttempt::request_location);
        let location = cancellable(cancel, self.request_upload_location(&descriptor)).await?;
        step(attempt, UploadAttempt::grant_location);

        step(attempt, UploadAttempt::start_upload);
        cancellable(
            cancel,
            self.perform_upload(&location, payload, descriptor.mime_type()),
        )
        .await?;

        let public_url = Self::finalize_upload(&location)?;
        step(attempt, UploadAttempt::complete);

        Ok((public_url, descriptor))
    }
}

/// Apply a transition the pipeline drives in a fixed order.
fn step<F>(attempt: &mut UploadAttempt, transition: F)
where
    F: FnOnce(&mut UploadAttempt) -> Result<(), InvalidStateTransition>,
{
    if let Err(e) = transition(attempt) {
        tracing::error!(error = %e, "upload state machine out of sync");
        debug_assert!(false, "upload state machine out of sync: {}", e);
    }
}

async fn cancellable<F, O>(cancel: &CancellationToken, fut: F) -> Result<O, UploadError>
where
    F: Future<Output = Result<O, UploadError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(UploadError::Cancelled),
        result = fut => result,
    }
}
