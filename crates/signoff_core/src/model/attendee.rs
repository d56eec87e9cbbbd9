//! Attendee slot model.
//!
//! # Responsibility
//! - Define one roster line: name, presence, signature or absence reason.
//! - Apply partial updates while keeping presence exclusivity.
//!
//! # Invariants
//! - `id` is stable for the lifetime of one generated roster.
//! - Changing presence clears both `signature` and `absent_reason`.
//! - A present slot never keeps an absence reason; an absent slot never
//!   keeps a signature.

use super::is_blank;
use super::signature::SignatureBlob;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier of one roster slot, e.g. `attendee-3`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Builds the id for the 1-based roster position `position`.
    pub fn from_position(position: usize) -> Self {
        Self(format!("attendee-{position}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for SlotId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Derived attendance state of a filled slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Signed,
    NotSigned,
    /// Absent, with the reason if one was typed.
    Absent(Option<String>),
}

/// One roster line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeSlot {
    pub id: SlotId,
    /// Empty means the slot is unfilled.
    pub name: String,
    pub is_present: bool,
    /// Meaningful only while `is_present`.
    pub signature: Option<SignatureBlob>,
    /// Meaningful only while absent.
    pub absent_reason: Option<String>,
    /// Meeting date copied at generation time.
    pub date: String,
}

impl AttendeeSlot {
    /// Creates an unfilled, present slot.
    pub fn new(id: SlotId, date: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            is_present: true,
            signature: None,
            absent_reason: None,
            date: date.into(),
        }
    }

    /// Returns whether a name was entered.
    pub fn is_filled(&self) -> bool {
        !is_blank(&self.name)
    }

    /// Returns whether a present slot carries a drawn signature.
    pub fn is_signed(&self) -> bool {
        self.is_present
            && self
                .signature
                .as_ref()
                .is_some_and(SignatureBlob::has_strokes)
    }

    /// Flips presence and drops signature and absence reason.
    pub fn toggle_presence(&mut self) {
        self.set_presence(!self.is_present);
    }

    /// Sets presence; a change clears signature and reason.
    pub fn set_presence(&mut self, is_present: bool) {
        if self.is_present == is_present {
            return;
        }
        self.is_present = is_present;
        self.signature = None;
        self.absent_reason = None;
    }

    /// Returns the derived attendance state.
    pub fn status(&self) -> AttendanceStatus {
        if !self.is_present {
            let reason = self
                .absent_reason
                .as_deref()
                .filter(|reason| !is_blank(reason))
                .map(str::to_string);
            return AttendanceStatus::Absent(reason);
        }
        if self.is_signed() {
            AttendanceStatus::Signed
        } else {
            AttendanceStatus::NotSigned
        }
    }

    /// Applies a partial update.
    ///
    /// Presence is applied first (clearing signature and reason when it
    /// changes), then the explicit fields; a field that contradicts the
    /// resulting presence is dropped.
    pub fn apply(&mut self, patch: SlotPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_present) = patch.is_present {
            self.set_presence(is_present);
        }
        if let Some(signature) = patch.signature {
            self.signature = signature;
        }
        if let Some(reason) = patch.absent_reason {
            self.absent_reason = reason;
        }

        if self.is_present {
            self.absent_reason = None;
        } else {
            self.signature = None;
        }
    }
}

/// Partial update for one slot. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPatch {
    pub name: Option<String>,
    pub is_present: Option<bool>,
    /// `Some(None)` clears the stored signature.
    pub signature: Option<Option<SignatureBlob>>,
    /// `Some(None)` clears the stored reason.
    pub absent_reason: Option<Option<String>>,
}

impl SlotPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn presence(is_present: bool) -> Self {
        Self {
            is_present: Some(is_present),
            ..Self::default()
        }
    }

    pub fn signature(blob: SignatureBlob) -> Self {
        Self {
            signature: Some(Some(blob)),
            ..Self::default()
        }
    }

    pub fn absent_reason(reason: impl Into<String>) -> Self {
        Self {
            absent_reason: Some(Some(reason.into())),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttendanceStatus, AttendeeSlot, SlotId, SlotPatch};
    use crate::model::signature::SignatureBlob;

    fn slot() -> AttendeeSlot {
        AttendeeSlot::new(SlotId::from_position(1), "2025-03-05")
    }

    fn stroke() -> SignatureBlob {
        SignatureBlob::from_raw(r#"{"paths":["M1.00,1.00 L2.00,2.00"],"timestamp":1}"#)
    }

    #[test]
    fn new_slot_is_present_and_unfilled() {
        let slot = slot();
        assert_eq!(slot.id.as_str(), "attendee-1");
        assert!(slot.is_present);
        assert!(!slot.is_filled());
        assert_eq!(slot.status(), AttendanceStatus::NotSigned);
    }

    #[test]
    fn whitespace_name_is_unfilled() {
        let mut slot = slot();
        slot.apply(SlotPatch::name("   "));
        assert!(!slot.is_filled());
    }

    #[test]
    fn toggle_clears_signature() {
        let mut slot = slot();
        slot.apply(SlotPatch::signature(stroke()));
        assert!(slot.is_signed());

        slot.toggle_presence();
        assert!(!slot.is_present);
        assert!(slot.signature.is_none());
        assert!(slot.absent_reason.is_none());
    }

    #[test]
    fn toggle_clears_absent_reason() {
        let mut slot = slot();
        slot.toggle_presence();
        slot.apply(SlotPatch::absent_reason("Sick"));
        assert_eq!(slot.status(), AttendanceStatus::Absent(Some("Sick".to_string())));

        slot.toggle_presence();
        assert!(slot.is_present);
        assert!(slot.absent_reason.is_none());
        assert!(slot.signature.is_none());
    }

    #[test]
    fn contradicting_fields_are_dropped() {
        let mut slot = slot();
        slot.apply(SlotPatch::absent_reason("Sick"));
        assert!(slot.absent_reason.is_none());

        slot.apply(SlotPatch::presence(false));
        slot.apply(SlotPatch::signature(stroke()));
        assert!(slot.signature.is_none());
    }

    #[test]
    fn repeating_current_presence_keeps_signature_and_reason() {
        let mut signed = slot();
        signed.apply(SlotPatch::signature(stroke()));
        signed.apply(SlotPatch::presence(true));
        assert_eq!(signed.signature, Some(stroke()));
        assert_eq!(signed.status(), AttendanceStatus::Signed);

        let mut absent = slot();
        absent.apply(SlotPatch::presence(false));
        absent.apply(SlotPatch::absent_reason("Sick"));
        absent.apply(SlotPatch::presence(false));
        assert_eq!(absent.absent_reason.as_deref(), Some("Sick"));
    }

    #[test]
    fn empty_stroke_blob_leaves_slot_unsigned() {
        let mut slot = slot();
        slot.apply(SlotPatch::signature(SignatureBlob::from_raw(
            r#"{"paths":[],"timestamp":1}"#,
        )));
        assert!(!slot.is_signed());
        assert_eq!(slot.status(), AttendanceStatus::NotSigned);
    }

    #[test]
    fn blank_reason_reports_absent_without_reason() {
        let mut slot = slot();
        slot.apply(SlotPatch {
            is_present: Some(false),
            absent_reason: Some(Some(" ".to_string())),
            ..SlotPatch::default()
        });
        assert_eq!(slot.status(), AttendanceStatus::Absent(None));
    }

    #[test]
    fn slot_id_trims_wire_input() {
        assert_eq!(SlotId::from(" attendee-2 "), SlotId::from_position(2));
    }
}
