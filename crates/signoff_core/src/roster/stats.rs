//! Roster completion statistics.
//!
//! # Invariants
//! - `signed_count <= present_count <= filled_names`.
//! - `present_count + absent_count == filled_names`.
//! - Unfilled slots never contribute to any count.

use crate::model::attendee::AttendeeSlot;
use crate::model::meeting::{MeetingInfo, REQUIRED_METADATA_FIELDS};
use serde::{Deserialize, Serialize};

/// Completion snapshot shared by the form, printed report and email body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterStats {
    /// Slots with a non-blank name.
    pub filled_names: usize,
    /// Filled and present.
    pub present_count: usize,
    /// Filled, present and signed.
    pub signed_count: usize,
    /// Filled and absent.
    pub absent_count: usize,
    /// Filled fields among location, facilitator and topic.
    pub meeting_info_complete: usize,
    /// Ready for submission. Does not gate export.
    pub is_complete: bool,
}

impl RosterStats {
    /// Present attendees still missing a signature.
    pub fn unsigned_present_count(&self) -> usize {
        self.present_count - self.signed_count
    }
}

/// Computes completion statistics for `slots` under `meeting`.
pub fn compute_stats(slots: &[AttendeeSlot], meeting: &MeetingInfo) -> RosterStats {
    let mut stats = RosterStats {
        filled_names: 0,
        present_count: 0,
        signed_count: 0,
        absent_count: 0,
        meeting_info_complete: meeting.filled_field_count(),
        is_complete: false,
    };

    for slot in slots.iter().filter(|slot| slot.is_filled()) {
        stats.filled_names += 1;
        if slot.is_present {
            stats.present_count += 1;
            if slot.is_signed() {
                stats.signed_count += 1;
            }
        } else {
            stats.absent_count += 1;
        }
    }

    stats.is_complete = stats.signed_count == stats.present_count
        && stats.present_count > 0
        && stats.meeting_info_complete >= REQUIRED_METADATA_FIELDS;
    stats
}
