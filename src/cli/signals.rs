//! Ctrl+C handling

use tokio_util::sync::CancellationToken;

/// Cancels a token when the user interrupts the process
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token cancelled on interrupt
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Setup signal handler
    pub fn setup(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received");
                    token.cancel();
                }
                Err(e) => tracing::warn!(error = %e, "failed to listen for interrupt"),
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn token_shares_state() {
        let signal = ShutdownSignal::new();
        signal.token().cancel();
        assert!(signal.is_shutdown());
    }
}
