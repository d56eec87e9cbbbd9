//! Meeting session: the single owner of metadata and roster state.
//!
//! # Responsibility
//! - Route every meeting-form and roster edit through one owner.
//! - Open signature pads for one slot and apply their result.
//!
//! # Invariants
//! - A `SignaturePad` is owned by its caller; the session keeps no
//!   reference to it.
//! - A capture taken against an older roster generation is dropped.
//! - A capture for an absent slot is dropped.
//!
//! # See also
//! - `roster::RosterManager` for slot-level rules.
//! - `signature::SignatureSession` for the stroke state machine.

use crate::model::attendee::{AttendeeSlot, SlotId, SlotPatch};
use crate::model::meeting::{parse_expected_count, MeetingField, MeetingInfo};
use crate::model::signature::SignatureBlob;
use crate::report::{gather_report, ReportData};
use crate::roster::stats::RosterStats;
use crate::roster::RosterManager;
use crate::settings::AppSettings;
use crate::signature::{SignatureError, SignatureSession};
use chrono::NaiveDate;
use log::{info, warn};
use std::fmt::{Debug, Formatter};
use thiserror::Error;

/// Meeting form plus generated roster for one meeting.
#[derive(Debug, Clone)]
pub struct MeetingSession {
    meeting: MeetingInfo,
    roster: RosterManager,
    defaults: AppSettings,
}

impl MeetingSession {
    /// Creates an empty session dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_settings(&AppSettings::default(), today)
    }

    /// Creates a session whose form is seeded from operator defaults.
    pub fn from_settings(settings: &AppSettings, today: NaiveDate) -> Self {
        let defaults = settings.normalized();
        Self {
            meeting: fresh_meeting(&defaults, today),
            roster: RosterManager::new(),
            defaults,
        }
    }

    pub fn meeting(&self) -> &MeetingInfo {
        &self.meeting
    }

    pub fn roster(&self) -> &RosterManager {
        &self.roster
    }

    pub fn slots(&self) -> &[AttendeeSlot] {
        self.roster.slots()
    }

    /// Operator defaults used by `clear_all`.
    pub fn defaults(&self) -> &AppSettings {
        &self.defaults
    }

    /// Swaps operator defaults; the current form is left as is.
    pub fn replace_defaults(&mut self, settings: &AppSettings) {
        self.defaults = settings.normalized();
    }

    pub fn set_field(&mut self, field: MeetingField, value: impl Into<String>) {
        self.meeting.set_field(field, value);
    }

    /// Sets the headcount from a numeric control.
    pub fn set_expected_count(&mut self, value: i64) -> u32 {
        self.meeting.set_expected_count(value)
    }

    /// Sets the headcount from typed text (`"abc"` and `"0"` fall back to
    /// the default before clamping).
    pub fn set_expected_count_input(&mut self, text: &str) -> u32 {
        self.meeting.expected_count = parse_expected_count(text);
        self.meeting.expected_count
    }

    /// Regenerates the roster from the current headcount and date.
    pub fn generate_roster(&mut self) -> &[AttendeeSlot] {
        let MeetingInfo {
            expected_count,
            date,
            ..
        } = &self.meeting;
        self.roster.generate_roster(*expected_count, date)
    }

    pub fn update_slot(&mut self, id: &SlotId, patch: SlotPatch) -> Option<&AttendeeSlot> {
        self.roster.update_slot(id, patch)
    }

    pub fn toggle_presence(&mut self, id: &SlotId) -> Option<&AttendeeSlot> {
        self.roster.toggle_presence(id)
    }

    pub fn stats(&self) -> RosterStats {
        self.roster.stats(&self.meeting)
    }

    /// Snapshot used by the report formatters.
    pub fn report_data(&self) -> ReportData<'_> {
        gather_report(&self.meeting, self.roster.slots())
    }

    /// Resets the form to the meeting a new session starts with, dated
    /// `today`, and empties the roster.
    ///
    /// Pads opened before the reset can no longer be applied.
    pub fn clear_all(&mut self, today: NaiveDate) {
        self.meeting = fresh_meeting(&self.defaults, today);
        self.roster.clear();
        info!(
            "event=session_clear module=session status=ok generation={}",
            self.roster.generation()
        );
    }

    /// Opens a signature pad for a present slot.
    ///
    /// The pad starts with the slot's stored strokes when they decode, and
    /// blank otherwise. Returns `None` for unknown or absent slots.
    pub fn open_signature(&self, id: &SlotId) -> Option<SignaturePad> {
        let slot = self.roster.slot(id)?;
        if !slot.is_present {
            warn!("event=signature_open module=session status=rejected reason=absent slot_id={id}");
            return None;
        }

        let session = match slot.signature.as_ref() {
            Some(blob) => SignatureSession::resume(blob).unwrap_or_else(|err| {
                warn!(
                    "event=signature_open module=session status=degraded slot_id={id} error={err}"
                );
                SignatureSession::new()
            }),
            None => SignatureSession::new(),
        };
        info!("event=signature_open module=session status=ok slot_id={id}");
        Some(SignaturePad {
            slot_id: slot.id.clone(),
            generation: self.roster.generation(),
            session,
        })
    }

    /// Writes a saved signature back into its slot.
    ///
    /// Returns `None` when the capture is stale, its slot is gone, or the
    /// slot was marked absent while the pad was open.
    pub fn apply_signature(&mut self, capture: SignatureCapture) -> Option<&AttendeeSlot> {
        if capture.generation != self.roster.generation() {
            warn!(
                "event=signature_apply module=session status=rejected reason=stale_generation slot_id={}",
                capture.slot_id
            );
            return None;
        }
        let present = self
            .roster
            .slot(&capture.slot_id)
            .is_some_and(|slot| slot.is_present);
        if !present {
            warn!(
                "event=signature_apply module=session status=rejected reason=not_present slot_id={}",
                capture.slot_id
            );
            return None;
        }

        info!(
            "event=signature_apply module=session status=ok slot_id={}",
            capture.slot_id
        );
        self.roster.set_signature(&capture.slot_id, capture.blob)
    }
}

/// Operator defaults for location, facilitator and count; empty topic.
fn fresh_meeting(defaults: &AppSettings, today: NaiveDate) -> MeetingInfo {
    MeetingInfo::from_settings(defaults, MeetingInfo::date_string(today))
}

/// Modal signature sub-session bound to one slot.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    slot_id: SlotId,
    generation: u64,
    session: SignatureSession,
}

impl SignaturePad {
    pub fn slot_id(&self) -> &SlotId {
        &self.slot_id
    }

    pub fn session(&self) -> &SignatureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SignatureSession {
        &mut self.session
    }

    /// Serializes the strokes into a capture message for the session.
    ///
    /// On failure the pad is handed back so the operator can keep drawing.
    pub fn save(self) -> Result<SignatureCapture, PadSaveError> {
        self.save_with(SignatureSession::save)
    }

    /// Like `save`, stamping the blob with `timestamp_ms`.
    pub fn save_at(self, timestamp_ms: i64) -> Result<SignatureCapture, PadSaveError> {
        self.save_with(|session| session.save_at(timestamp_ms))
    }

    fn save_with(
        mut self,
        save: impl FnOnce(&mut SignatureSession) -> Result<SignatureBlob, SignatureError>,
    ) -> Result<SignatureCapture, PadSaveError> {
        match save(&mut self.session) {
            Ok(blob) => Ok(SignatureCapture {
                slot_id: self.slot_id,
                generation: self.generation,
                blob,
            }),
            Err(error) => Err(PadSaveError { pad: self, error }),
        }
    }
}

/// Saved signature addressed to one slot of one roster generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCapture {
    pub slot_id: SlotId,
    pub generation: u64,
    pub blob: SignatureBlob,
}

/// Failed pad save; owns the pad so drawing can continue.
#[derive(Error)]
#[error("{error}")]
pub struct PadSaveError {
    pad: SignaturePad,
    #[source]
    error: SignatureError,
}

impl PadSaveError {
    pub fn error(&self) -> &SignatureError {
        &self.error
    }

    pub fn into_pad(self) -> SignaturePad {
        self.pad
    }

    /// Splits into the pad and the underlying error.
    pub fn into_parts(self) -> (SignaturePad, SignatureError) {
        (self.pad, self.error)
    }
}

impl Debug for PadSaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PadSaveError")
            .field("slot_id", &self.pad.slot_id)
            .field("error", &self.error)
            .finish()
    }
}
