use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// Outbound email abstraction. Delivery is fire-and-forget for every caller:
/// a returned error is logged, never propagated to the request.
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, template: &str, data: serde_json::Value) -> Result<(), MailerError>;
}

/// Local/dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, template: &str, data: serde_json::Value) -> Result<(), MailerError> {
        info!(
            to_email = %to,
            template = %template,
            payload = %data,
            "email send stub"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let result = mailer.send(
            "dev@example.com",
            "verify-email",
            serde_json::json!({ "token": "opaque" }),
        );
        assert!(result.is_ok());
    }
}
