//! Core domain logic for safety meeting sign-off.
//! This crate is the single source of truth for roster and report invariants.

pub mod db;
pub mod delivery;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod roster;
pub mod session;
pub mod settings;
pub mod signature;

pub use delivery::{
    AdapterError, DeliveryChannel, EmailOutcome, HtmlFilePrinter, MailAdapter, MailDraft,
    PageSize, PrintAdapter, PrintJob, ReportExporter, ReportFile, ShareAdapter, ShareOptions,
};
pub use error::{SignoffError, SignoffResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::attendee::{AttendanceStatus, AttendeeSlot, SlotId, SlotPatch};
pub use model::meeting::{
    clamp_expected_count, parse_expected_count, MeetingField, MeetingInfo,
    DEFAULT_EXPECTED_COUNT, MAX_EXPECTED_COUNT, MIN_EXPECTED_COUNT,
};
pub use model::signature::{SignatureBlob, SignatureData};
pub use report::{gather_report, ReportData, ReportDocument};
pub use roster::stats::{compute_stats, RosterStats};
pub use roster::RosterManager;
pub use session::{MeetingSession, PadSaveError, SignatureCapture, SignaturePad};
pub use settings::store::SqliteSettingsStore;
pub use settings::{AppSettings, SettingsError, SettingsStore};
pub use signature::{CanvasGeometry, Point, SignatureError, SignatureSession, StrokeStyle};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
