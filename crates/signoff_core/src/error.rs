//! Crate-wide error taxonomy.
//!
//! # Responsibility
//! - Collapse module errors into one type for use-case callers.
//! - Provide stable error codes and user-facing alert text.
//!
//! # Invariants
//! - Every failure is terminal for the triggering action only.
//! - Error codes are stable strings; UI shells match on them.

use crate::db::DbError;
use crate::delivery::{AdapterError, DeliveryChannel};
use crate::settings::SettingsError;
use crate::signature::SignatureError;
use thiserror::Error;

/// Errors surfaced by sign-off use-cases.
#[derive(Debug, Error)]
pub enum SignoffError {
    /// Caller input that cannot be clamped into a valid value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Signature save requested with no strokes.
    #[error("signature has no strokes")]
    EmptySignature,

    /// The print adapter could not produce a report file.
    #[error("report generation failed: {0}")]
    ReportGenerationFailed(#[source] AdapterError),

    /// Share or mail capability is absent on this device.
    #[error("{0} adapter is unavailable")]
    AdapterUnavailable(DeliveryChannel),

    /// Share sheet or mail composer failed after the availability check.
    #[error("delivery failed: {0}")]
    DeliveryFailed(#[source] AdapterError),

    /// A report render is already in flight.
    #[error("report export already in progress")]
    ExportBusy,

    /// Settings validation or persistence failure.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Storage bootstrap failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// A specialized Result type for sign-off operations.
pub type SignoffResult<T> = Result<T, SignoffError>;

impl From<SignatureError> for SignoffError {
    fn from(value: SignatureError) -> Self {
        match value {
            SignatureError::EmptySignature => Self::EmptySignature,
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl SignoffError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::EmptySignature => "empty_signature",
            Self::ReportGenerationFailed(_) => "report_generation_failed",
            Self::AdapterUnavailable(_) => "adapter_unavailable",
            Self::DeliveryFailed(_) => "delivery_failed",
            Self::ExportBusy => "export_busy",
            Self::Settings(_) => "settings_error",
            Self::Db(_) => "db_error",
        }
    }

    /// Alert title and message shown to the operator.
    pub fn user_alert(&self) -> (&'static str, String) {
        match self {
            Self::InvalidInput(message) => ("Invalid Input", message.clone()),
            Self::EmptySignature => (
                "No Signature",
                "Please provide a signature before saving.".to_string(),
            ),
            Self::ReportGenerationFailed(_) => (
                "Error",
                "Failed to generate PDF. Please try again.".to_string(),
            ),
            Self::AdapterUnavailable(DeliveryChannel::Share) => (
                "Sharing not available",
                "Sharing is not available on this device.".to_string(),
            ),
            Self::AdapterUnavailable(DeliveryChannel::Mail) => (
                "Email not available",
                "Email is not configured on this device.".to_string(),
            ),
            Self::AdapterUnavailable(DeliveryChannel::Print) => (
                "Printing not available",
                "Printing is not available on this device.".to_string(),
            ),
            Self::DeliveryFailed(err) => match err.channel {
                DeliveryChannel::Mail => (
                    "Error",
                    "Failed to compose email. Please try again.".to_string(),
                ),
                _ => (
                    "Error",
                    "Failed to share document. Please try again.".to_string(),
                ),
            },
            Self::ExportBusy => (
                "Please wait",
                "A report is already being generated.".to_string(),
            ),
            Self::Settings(err) => ("Settings Error", err.to_string()),
            Self::Db(err) => ("Storage Error", err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SignoffError;
    use crate::delivery::{AdapterError, DeliveryChannel};
    use crate::signature::SignatureError;

    #[test]
    fn empty_signature_maps_to_no_signature_alert() {
        let err: SignoffError = SignatureError::EmptySignature.into();
        assert_eq!(err.code(), "empty_signature");
        let (title, message) = err.user_alert();
        assert_eq!(title, "No Signature");
        assert!(message.contains("signature"));
    }

    #[test]
    fn unavailable_alerts_name_the_channel() {
        let share = SignoffError::AdapterUnavailable(DeliveryChannel::Share);
        assert_eq!(share.user_alert().0, "Sharing not available");
        assert_eq!(share.to_string(), "share adapter is unavailable");

        let mail = SignoffError::AdapterUnavailable(DeliveryChannel::Mail);
        assert_eq!(mail.user_alert().0, "Email not available");
    }

    #[test]
    fn report_generation_failure_keeps_adapter_source() {
        let err = SignoffError::ReportGenerationFailed(AdapterError::new(
            DeliveryChannel::Print,
            "rasterizer missing",
        ));
        assert_eq!(err.code(), "report_generation_failed");
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert!(source.to_string().contains("rasterizer missing"));
    }

    #[test]
    fn mail_delivery_failure_uses_email_message() {
        let err = SignoffError::DeliveryFailed(AdapterError::new(DeliveryChannel::Mail, "boom"));
        assert!(err.user_alert().1.contains("compose email"));
    }
}
