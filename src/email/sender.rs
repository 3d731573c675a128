// Email delivery seam

use async_trait::async_trait;

/// Capability for delivering a single email
///
/// Implementations must not panic; a delivery failure is reported through the
/// error so callers can decide whether to surface or just log it.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}

/// Development sender that records deliveries in the log instead of sending
///
/// Used wherever no real transport is wired up (local runs, tests).
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        tracing::info!(
            from = %self.from,
            to = %to,
            subject = %subject,
            "Email delivery (log transport): {}",
            html_body
        );
        Ok(())
    }
}
