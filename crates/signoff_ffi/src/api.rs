//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the single process-wide meeting session and open signature pad.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through envelopes (`ok`, `error_code`, `message`).
//! - At most one signature pad is open; opening another replaces it.
//!
//! # See also
//! - `signoff_core::session` for the state these calls mutate.

use chrono::Local;
use once_cell::sync::Lazy;
use signoff_core::db::open_db;
use signoff_core::report::html::render_html;
use signoff_core::report::text::{email_subject, render_email_body};
use signoff_core::report::status_label;
use signoff_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AdapterError, AppSettings, AttendeeSlot, CanvasGeometry, HtmlFilePrinter, MailAdapter,
    MailDraft, MeetingField, MeetingSession, Point, ReportDocument, ReportExporter, ReportFile,
    RosterStats, SettingsStore, ShareAdapter, ShareOptions, SignaturePad, SignoffError, SlotId,
    SlotPatch, SqliteSettingsStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const SETTINGS_DB_FILE_NAME: &str = "signoff_settings.sqlite3";
static SETTINGS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

static STATE: Lazy<Mutex<FfiState>> = Lazy::new(|| {
    Mutex::new(FfiState {
        session: MeetingSession::from_settings(&startup_settings(), Local::now().date_naive()),
        pad: None,
    })
});

struct FfiState {
    session: MeetingSession,
    pad: Option<SignaturePad>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Stable error code on failure (`empty_signature`, `invalid_input`, ...).
    pub error_code: Option<String>,
    /// Alert title on failure.
    pub title: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            error_code: None,
            title: None,
            message: message.into(),
        }
    }

    fn failure(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_code: Some(error_code.to_string()),
            title: None,
            message: message.into(),
        }
    }

    fn from_error(err: &SignoffError) -> Self {
        let (title, message) = err.user_alert();
        Self {
            ok: false,
            error_code: Some(err.code().to_string()),
            title: Some(title.to_string()),
            message,
        }
    }
}

/// Meeting form projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingView {
    pub date: String,
    pub location: String,
    pub facilitator: String,
    pub topic: String,
    pub expected_count: u32,
}

/// Roster line projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub slot_id: String,
    pub name: String,
    pub is_present: bool,
    pub is_signed: bool,
    pub absent_reason: Option<String>,
    pub date: String,
    /// Same label the printed report uses.
    pub status_label: String,
}

/// Completion counters projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub filled_names: u32,
    pub present_count: u32,
    pub signed_count: u32,
    pub absent_count: u32,
    pub meeting_info_complete: u32,
    pub is_complete: bool,
}

/// Full roster screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterResponse {
    pub meeting: MeetingView,
    pub slots: Vec<SlotView>,
    pub stats: StatsView,
}

/// Single slot mutation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    pub slot: Option<SlotView>,
    pub stats: StatsView,
}

/// Signature pad state after a capture event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    /// Slot the open pad is bound to.
    pub slot_id: Option<String>,
    /// Committed strokes plus the stroke in progress.
    pub paths: Vec<String>,
    pub has_signature: bool,
}

/// Capture surface sizing for the current window.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    pub width: f64,
    pub height: f64,
    pub is_tablet: bool,
    pub stroke_width: f64,
    pub stroke_color: String,
    pub placeholder: String,
}

/// Rendered report for host-side printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResponse {
    pub html: String,
    pub page_width_pt: u32,
    pub page_height_pt: u32,
    pub row_count: u32,
}

/// Email draft for the host mail composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraftResponse {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Report file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    pub uri: Option<String>,
    pub content_type: Option<String>,
}

/// Operator settings projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub default_facilitator: String,
    pub default_location: String,
    pub company_email: String,
    pub auto_save_enabled: bool,
    pub tablet_mode_enabled: bool,
    pub default_attendee_count: u32,
}

/// Settings call result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    pub settings: SettingsView,
}

/// Returns the current meeting form and roster.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_snapshot() -> RosterResponse {
    let state = lock_state();
    roster_response(&state.session)
}

/// Updates one text field of the meeting form.
///
/// `field` is one of `date|location|facilitator|topic`.
#[flutter_rust_bridge::frb(sync)]
pub fn meeting_set_field(field: String, value: String) -> ActionResponse {
    let Some(parsed) = MeetingField::parse(&field) else {
        return ActionResponse::failure("invalid_input", format!("unknown meeting field `{field}`"));
    };
    lock_state().session.set_field(parsed, value);
    ActionResponse::success("Field updated.")
}

/// Sets the expected headcount from typed text; returns the stored count.
#[flutter_rust_bridge::frb(sync)]
pub fn meeting_set_expected_count(input: String) -> u32 {
    lock_state().session.set_expected_count_input(&input)
}

/// Adjusts the expected headcount by `delta` (stepper buttons).
#[flutter_rust_bridge::frb(sync)]
pub fn meeting_step_expected_count(delta: i32) -> u32 {
    let mut state = lock_state();
    let current = i64::from(state.session.meeting().expected_count);
    state.session.set_expected_count(current + i64::from(delta))
}

/// Replaces the roster with fresh slots for the current headcount.
///
/// An open signature pad becomes stale and is discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_generate() -> RosterResponse {
    let mut state = lock_state();
    state.pad = None;
    state.session.generate_roster();
    roster_response(&state.session)
}

/// Sets the attendee name of one slot.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_set_name(slot_id: String, name: String) -> SlotResponse {
    update_slot(&slot_id, SlotPatch::name(name))
}

/// Flips presence of one slot; clears its signature and absence reason.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_toggle_presence(slot_id: String) -> SlotResponse {
    let mut state = lock_state();
    let id = SlotId::from(slot_id.as_str());
    let slot = state.session.toggle_presence(&id).map(slot_view);
    slot_response(&state.session, slot, &id)
}

/// Sets the absence reason of an absent slot.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_set_absent_reason(slot_id: String, reason: String) -> SlotResponse {
    update_slot(&slot_id, SlotPatch::absent_reason(reason))
}

/// Resets the form to defaults and empties the roster.
#[flutter_rust_bridge::frb(sync)]
pub fn session_clear_all() -> RosterResponse {
    let mut state = lock_state();
    state.pad = None;
    state.session.clear_all(Local::now().date_naive());
    roster_response(&state.session)
}

/// Opens the signature pad for a present slot.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_open(slot_id: String) -> SignatureResponse {
    let mut state = lock_state();
    let id = SlotId::from(slot_id.as_str());
    match state.session.open_signature(&id) {
        Some(pad) => {
            let response = signature_response(&pad, "Signature pad opened.");
            state.pad = Some(pad);
            response
        }
        None => SignatureResponse {
            ok: false,
            error_code: Some("invalid_input".to_string()),
            message: format!("slot `{id}` is missing or absent"),
            slot_id: None,
            paths: Vec::new(),
            has_signature: false,
        },
    }
}

/// Starts a stroke at the pointer-down location.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_stroke_begin(x: f64, y: f64) -> SignatureResponse {
    with_pad(|pad| pad.session_mut().begin_stroke(Point::new(x, y)))
}

/// Extends the current stroke to the pointer location.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_stroke_move(x: f64, y: f64) -> SignatureResponse {
    with_pad(|pad| pad.session_mut().extend_stroke(Point::new(x, y)))
}

/// Commits the current stroke on pointer release.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_stroke_end() -> SignatureResponse {
    with_pad(|pad| pad.session_mut().end_stroke())
}

/// Erases every stroke on the open pad.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_clear() -> SignatureResponse {
    with_pad(|pad| pad.session_mut().clear())
}

/// Saves the open pad into its slot and closes it.
///
/// An empty pad stays open and reports `empty_signature`.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_save() -> ActionResponse {
    let mut state = lock_state();
    let Some(pad) = state.pad.take() else {
        return ActionResponse::failure("invalid_input", "no signature pad is open");
    };

    match pad.save() {
        Ok(capture) => {
            if state.session.apply_signature(capture).is_some() {
                ActionResponse::success("Signature saved.")
            } else {
                ActionResponse::failure(
                    "invalid_input",
                    "slot changed while the signature pad was open",
                )
            }
        }
        Err(err) => {
            let (pad, error) = err.into_parts();
            state.pad = Some(pad);
            ActionResponse::from_error(&SignoffError::from(error))
        }
    }
}

/// Closes the open pad without saving.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_cancel() -> ActionResponse {
    lock_state().pad = None;
    ActionResponse::success("Signature pad closed.")
}

/// Computes capture surface size and stroke style for a window size.
#[flutter_rust_bridge::frb(sync)]
pub fn signature_canvas(window_width: f64, window_height: f64) -> CanvasView {
    let geometry = CanvasGeometry::for_window(window_width, window_height);
    let style = geometry.stroke_style();
    CanvasView {
        width: geometry.width,
        height: geometry.height,
        is_tablet: geometry.is_tablet,
        stroke_width: style.width,
        stroke_color: style.color.to_string(),
        placeholder: signoff_core::signature::PLACEHOLDER_TEXT.to_string(),
    }
}

/// Renders the printable report for the host print adapter.
#[flutter_rust_bridge::frb(sync)]
pub fn report_render_html() -> ReportResponse {
    let state = lock_state();
    let data = state.session.report_data();
    let document = ReportDocument::build(&data, Local::now().naive_local());
    let page = signoff_core::PageSize::LETTER;
    ReportResponse {
        html: render_html(&document),
        page_width_pt: page.width_pt,
        page_height_pt: page.height_pt,
        row_count: to_u32(document.rows.len()),
    }
}

/// Builds the report email for the host mail composer.
#[flutter_rust_bridge::frb(sync)]
pub fn report_email_draft() -> EmailDraftResponse {
    let state = lock_state();
    EmailDraftResponse {
        recipients: state.session.defaults().mail_recipients(),
        subject: email_subject(state.session.meeting()),
        body: render_email_body(&state.session.report_data()),
    }
}

/// Writes the printable report as an HTML file under `output_dir`.
///
/// Share and mail are performed by the host shell with the returned uri.
#[flutter_rust_bridge::frb(sync)]
pub fn report_export_html(output_dir: String) -> ExportResponse {
    let trimmed = output_dir.trim();
    if trimmed.is_empty() {
        return ExportResponse {
            ok: false,
            error_code: Some("invalid_input".to_string()),
            message: "output_dir cannot be empty".to_string(),
            uri: None,
            content_type: None,
        };
    }

    let state = lock_state();
    let exporter = ReportExporter::new(HtmlFilePrinter::new(trimmed), HostShell, HostShell);
    match exporter.generate(state.session.meeting(), state.session.slots()) {
        Ok(ReportFile { uri, content_type }) => ExportResponse {
            ok: true,
            error_code: None,
            message: "Report generated.".to_string(),
            uri: Some(uri),
            content_type: Some(content_type),
        },
        Err(err) => ExportResponse {
            ok: false,
            error_code: Some(err.code().to_string()),
            message: err.user_alert().1,
            uri: None,
            content_type: None,
        },
    }
}

/// Loads operator settings (defaults when nothing is stored).
#[flutter_rust_bridge::frb(sync)]
pub fn settings_load() -> SettingsResponse {
    match with_settings_store(|store| store.load()) {
        Ok(settings) => settings_response(&settings, "Settings loaded."),
        Err(err) => settings_failure(&err),
    }
}

/// Validates and stores operator settings; new defaults apply to the
/// next cleared meeting.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_save(settings: SettingsView) -> SettingsResponse {
    let input = AppSettings {
        default_facilitator: settings.default_facilitator,
        default_location: settings.default_location,
        company_email: settings.company_email,
        auto_save_enabled: settings.auto_save_enabled,
        tablet_mode_enabled: settings.tablet_mode_enabled,
        default_attendee_count: settings.default_attendee_count,
    };
    match with_settings_store(|store| store.save(&input)) {
        Ok(saved) => {
            lock_state().session.replace_defaults(&saved);
            settings_response(&saved, "Settings saved.")
        }
        Err(err) => settings_failure(&err),
    }
}

/// Drops stored settings and returns the defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn settings_reset() -> SettingsResponse {
    match with_settings_store(|store| store.reset()) {
        Ok(defaults) => {
            lock_state().session.replace_defaults(&defaults);
            settings_response(&defaults, "Settings reset.")
        }
        Err(err) => settings_failure(&err),
    }
}

/// Share and mail run in the Dart shell, not behind this crate.
struct HostShell;

impl ShareAdapter for HostShell {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _file: &ReportFile, _options: &ShareOptions) -> Result<(), AdapterError> {
        Err(AdapterError::new(
            signoff_core::DeliveryChannel::Share,
            "share is handled by the host shell",
        ))
    }
}

impl MailAdapter for HostShell {
    fn is_available(&self) -> bool {
        false
    }

    fn compose(&self, _draft: &MailDraft) -> Result<(), AdapterError> {
        Err(AdapterError::new(
            signoff_core::DeliveryChannel::Mail,
            "mail is handled by the host shell",
        ))
    }
}

fn lock_state() -> MutexGuard<'static, FfiState> {
    // A panic while holding the lock leaves plain data behind; keep serving.
    STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn update_slot(slot_id: &str, patch: SlotPatch) -> SlotResponse {
    let mut state = lock_state();
    let id = SlotId::from(slot_id);
    let slot = state.session.update_slot(&id, patch).map(slot_view);
    slot_response(&state.session, slot, &id)
}

fn with_pad(f: impl FnOnce(&mut SignaturePad)) -> SignatureResponse {
    let mut state = lock_state();
    match state.pad.as_mut() {
        Some(pad) => {
            f(pad);
            signature_response(pad, "ok")
        }
        None => SignatureResponse {
            ok: false,
            error_code: Some("invalid_input".to_string()),
            message: "no signature pad is open".to_string(),
            slot_id: None,
            paths: Vec::new(),
            has_signature: false,
        },
    }
}

fn resolve_settings_db_path() -> PathBuf {
    SETTINGS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SIGNOFF_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SETTINGS_DB_FILE_NAME)
        })
        .clone()
}

fn with_settings_store<T>(
    f: impl FnOnce(&SqliteSettingsStore<'_>) -> Result<T, signoff_core::SettingsError>,
) -> Result<T, SignoffError> {
    let conn = open_db(resolve_settings_db_path())?;
    let store = SqliteSettingsStore::new(&conn);
    Ok(f(&store)?)
}

fn startup_settings() -> AppSettings {
    match with_settings_store(|store| store.load()) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                "event=settings_load module=ffi status=degraded error_code={} error={}",
                err.code(),
                err
            );
            AppSettings::default()
        }
    }
}

fn roster_response(session: &MeetingSession) -> RosterResponse {
    let meeting = session.meeting();
    RosterResponse {
        meeting: MeetingView {
            date: meeting.date.clone(),
            location: meeting.location.clone(),
            facilitator: meeting.facilitator.clone(),
            topic: meeting.topic.clone(),
            expected_count: meeting.expected_count,
        },
        slots: session.slots().iter().map(slot_view).collect(),
        stats: stats_view(&session.stats()),
    }
}

fn slot_response(session: &MeetingSession, slot: Option<SlotView>, id: &SlotId) -> SlotResponse {
    let stats = stats_view(&session.stats());
    match slot {
        Some(slot) => SlotResponse {
            ok: true,
            error_code: None,
            message: "Slot updated.".to_string(),
            slot: Some(slot),
            stats,
        },
        None => SlotResponse {
            ok: false,
            error_code: Some("invalid_input".to_string()),
            message: format!("unknown slot `{id}`"),
            slot: None,
            stats,
        },
    }
}

fn slot_view(slot: &AttendeeSlot) -> SlotView {
    SlotView {
        slot_id: slot.id.to_string(),
        name: slot.name.clone(),
        is_present: slot.is_present,
        is_signed: slot.is_signed(),
        absent_reason: slot.absent_reason.clone(),
        date: slot.date.clone(),
        status_label: status_label(&slot.status()),
    }
}

fn stats_view(stats: &RosterStats) -> StatsView {
    StatsView {
        filled_names: to_u32(stats.filled_names),
        present_count: to_u32(stats.present_count),
        signed_count: to_u32(stats.signed_count),
        absent_count: to_u32(stats.absent_count),
        meeting_info_complete: to_u32(stats.meeting_info_complete),
        is_complete: stats.is_complete,
    }
}

fn signature_response(pad: &SignaturePad, message: &str) -> SignatureResponse {
    let session = pad.session();
    SignatureResponse {
        ok: true,
        error_code: None,
        message: message.to_string(),
        slot_id: Some(pad.slot_id().to_string()),
        paths: session.visible_paths().map(str::to_string).collect(),
        has_signature: session.has_signature(),
    }
}

fn settings_view(settings: &AppSettings) -> SettingsView {
    SettingsView {
        default_facilitator: settings.default_facilitator.clone(),
        default_location: settings.default_location.clone(),
        company_email: settings.company_email.clone(),
        auto_save_enabled: settings.auto_save_enabled,
        tablet_mode_enabled: settings.tablet_mode_enabled,
        default_attendee_count: settings.default_attendee_count,
    }
}

fn settings_response(settings: &AppSettings, message: &str) -> SettingsResponse {
    SettingsResponse {
        ok: true,
        error_code: None,
        message: message.to_string(),
        settings: settings_view(settings),
    }
}

fn settings_failure(err: &SignoffError) -> SettingsResponse {
    SettingsResponse {
        ok: false,
        error_code: Some(err.code().to_string()),
        message: err.to_string(),
        settings: settings_view(&AppSettings::default()),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, meeting_set_expected_count, meeting_set_field,
        meeting_step_expected_count, ping, report_email_draft, report_export_html,
        report_render_html, roster_generate, roster_set_absent_reason, roster_set_name,
        roster_snapshot, roster_toggle_presence, session_clear_all, signature_canvas,
        signature_open, signature_save, signature_stroke_begin, signature_stroke_end,
        signature_stroke_move,
    };
    use std::sync::Mutex;

    // Calls below share the process-wide session.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> std::sync::MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn unknown_meeting_field_is_rejected() {
        let response = meeting_set_field("weather".to_string(), "sunny".to_string());
        assert!(!response.ok);
        assert_eq!(response.error_code.as_deref(), Some("invalid_input"));
    }

    #[test]
    fn roster_flow_signs_one_attendee() {
        let _guard = serial();
        session_clear_all();
        assert_eq!(meeting_set_expected_count("3".to_string()), 3);
        assert_eq!(meeting_step_expected_count(-1), 2);

        let roster = roster_generate();
        assert_eq!(roster.slots.len(), 2);
        assert_eq!(roster.slots[0].slot_id, "attendee-1");

        assert!(roster_set_name("attendee-1".to_string(), "Alice".to_string()).ok);
        assert!(roster_set_name("attendee-2".to_string(), "Bob".to_string()).ok);

        let opened = signature_open("attendee-1".to_string());
        assert!(opened.ok, "{}", opened.message);
        signature_stroke_begin(10.0, 10.0);
        signature_stroke_move(20.0, 20.0);
        let pad = signature_stroke_end();
        assert_eq!(pad.paths, vec!["M10.00,10.00 L20.00,20.00".to_string()]);

        let saved = signature_save();
        assert!(saved.ok, "{}", saved.message);

        let toggled = roster_toggle_presence("attendee-2".to_string());
        let slot = toggled.slot.expect("slot returned");
        assert!(!slot.is_present);
        let reason = roster_set_absent_reason("attendee-2".to_string(), "Sick".to_string());
        assert_eq!(
            reason.slot.expect("slot returned").status_label,
            "Absent: Sick"
        );

        let snapshot = roster_snapshot();
        assert_eq!(snapshot.stats.signed_count, 1);
        assert_eq!(snapshot.stats.absent_count, 1);
        assert_eq!(snapshot.stats.filled_names, 2);
    }

    #[test]
    fn empty_signature_save_keeps_pad_open() {
        let _guard = serial();
        session_clear_all();
        meeting_set_expected_count("1".to_string());
        roster_generate();

        assert!(signature_open("attendee-1".to_string()).ok);
        let response = signature_save();
        assert!(!response.ok);
        assert_eq!(response.error_code.as_deref(), Some("empty_signature"));
        assert_eq!(response.title.as_deref(), Some("No Signature"));

        let pad = signature_stroke_begin(1.0, 2.0);
        assert!(pad.ok, "pad should still be open");
        assert!(signature_save().ok);
    }

    #[test]
    fn absent_slot_cannot_open_signature_pad() {
        let _guard = serial();
        session_clear_all();
        meeting_set_expected_count("1".to_string());
        roster_generate();
        roster_toggle_presence("attendee-1".to_string());

        let response = signature_open("attendee-1".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn regenerate_discards_open_pad() {
        let _guard = serial();
        session_clear_all();
        meeting_set_expected_count("1".to_string());
        roster_generate();
        assert!(signature_open("attendee-1".to_string()).ok);

        roster_generate();
        assert!(!signature_stroke_begin(1.0, 1.0).ok);
    }

    #[test]
    fn report_outputs_follow_session_state() {
        let _guard = serial();
        session_clear_all();
        meeting_set_field("topic".to_string(), "Ladder Safety".to_string());
        meeting_set_field("date".to_string(), "2025-03-05".to_string());
        meeting_set_expected_count("2".to_string());
        roster_generate();
        roster_set_name("attendee-1".to_string(), "Alice".to_string());

        let report = report_render_html();
        assert_eq!(report.row_count, 1);
        assert_eq!((report.page_width_pt, report.page_height_pt), (612, 792));
        assert!(report.html.contains("Alice"));

        let draft = report_email_draft();
        assert_eq!(
            draft.subject,
            "Safety Meeting Attendance - Ladder Safety - 2025-03-05"
        );
        assert!(draft.body.contains("Total Recorded: 1/2"));
        assert_eq!(draft.recipients.len(), 1);

        let dir = tempfile::tempdir().expect("tempdir");
        let export = report_export_html(dir.path().display().to_string());
        assert!(export.ok, "{}", export.message);
        assert_eq!(export.content_type.as_deref(), Some("text/html"));
        let written = std::fs::read_to_string(export.uri.expect("uri")).expect("read report");
        assert!(written.contains("Ladder Safety"));
    }

    #[test]
    fn canvas_sizing_matches_device_class() {
        let phone = signature_canvas(400.0, 800.0);
        assert!(!phone.is_tablet);
        assert!((phone.width - 360.0).abs() < 1e-9);
        assert!((phone.height - 200.0).abs() < 1e-9);
        assert!((phone.stroke_width - 2.0).abs() < 1e-9);

        let tablet = signature_canvas(1000.0, 700.0);
        assert!(tablet.is_tablet);
        assert!((tablet.width - 700.0).abs() < 1e-9);
        assert_eq!(tablet.placeholder, "Tap and drag to sign");
    }
}
