//! Delivery adapter contracts and report export orchestration.
//!
//! # Responsibility
//! - Define the print, share and mail capabilities consumed from the host
//!   platform.
//! - Orchestrate render -> print -> share/mail for one export action.
//!
//! # Invariants
//! - Share and mail are never invoked when their availability pre-check
//!   fails.
//! - At most one adapter call is in flight per exporter.

mod exporter;
mod printer;

pub use exporter::{EmailOutcome, ReportExporter};
pub use printer::HtmlFilePrinter;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Dialog title of the platform share sheet.
pub const SHARE_DIALOG_TITLE: &str = "Share Safety Meeting Report";
/// Content type produced by platform document printers.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Platform capability a delivery step depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Print,
    Share,
    Mail,
}

impl DeliveryChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Share => "share",
            Self::Mail => "mail",
        }
    }
}

impl Display for DeliveryChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{channel} adapter failed: {message}")]
pub struct AdapterError {
    pub channel: DeliveryChannel,
    pub message: String,
}

impl AdapterError {
    pub fn new(channel: DeliveryChannel, message: impl Into<String>) -> Self {
        Self {
            channel,
            message: message.into(),
        }
    }
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width_pt: u32,
    pub height_pt: u32,
}

impl PageSize {
    /// US Letter at 72 DPI.
    pub const LETTER: Self = Self {
        width_pt: 612,
        height_pt: 792,
    };
}

/// Complete document handed to the print adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub html: String,
    pub page: Option<PageSize>,
}

/// Reference to a generated report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub uri: String,
    pub content_type: String,
}

/// Share sheet hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
    pub mime_type: String,
    pub dialog_title: String,
}

impl ShareOptions {
    pub fn for_report(file: &ReportFile) -> Self {
        Self {
            mime_type: file.content_type.clone(),
            dialog_title: SHARE_DIALOG_TITLE.to_string(),
        }
    }
}

/// Mail composer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    /// File URIs to attach.
    pub attachments: Vec<String>,
}

/// Renders a document into a file.
pub trait PrintAdapter {
    fn print_to_file(&self, job: &PrintJob) -> Result<ReportFile, AdapterError>;
}

/// Presents the platform share surface for a file.
pub trait ShareAdapter {
    fn is_available(&self) -> bool;
    fn share(&self, file: &ReportFile, options: &ShareOptions) -> Result<(), AdapterError>;
}

/// Presents the platform mail composer.
pub trait MailAdapter {
    fn is_available(&self) -> bool;
    fn compose(&self, draft: &MailDraft) -> Result<(), AdapterError>;
}

impl<T: PrintAdapter + ?Sized> PrintAdapter for &T {
    fn print_to_file(&self, job: &PrintJob) -> Result<ReportFile, AdapterError> {
        (**self).print_to_file(job)
    }
}

impl<T: ShareAdapter + ?Sized> ShareAdapter for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn share(&self, file: &ReportFile, options: &ShareOptions) -> Result<(), AdapterError> {
        (**self).share(file, options)
    }
}

impl<T: MailAdapter + ?Sized> MailAdapter for &T {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn compose(&self, draft: &MailDraft) -> Result<(), AdapterError> {
        (**self).compose(draft)
    }
}
