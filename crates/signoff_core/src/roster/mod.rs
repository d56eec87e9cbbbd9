//! Roster manager: generated attendee slots for one meeting.
//!
//! # Responsibility
//! - Generate a fresh roster of `expected_count` slots.
//! - Apply per-slot partial updates by stable id.
//!
//! # Invariants
//! - Roster size equals the count of the last generation.
//! - Regeneration replaces every slot; nothing is merged.
//! - Slots are never added or removed outside regeneration.
//! - Updates for unknown ids are silent no-ops.

pub mod stats;

use crate::model::attendee::{AttendeeSlot, SlotId, SlotPatch};
use crate::model::meeting::MeetingInfo;
use crate::model::signature::SignatureBlob;
use log::{debug, info};
use stats::{compute_stats, RosterStats};

/// Owner of the generated slot list.
#[derive(Debug, Clone, Default)]
pub struct RosterManager {
    slots: Vec<AttendeeSlot>,
    generation: u64,
}

impl RosterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the roster with `expected_count` fresh slots.
    ///
    /// # Contract
    /// - Ids run `attendee-1..=attendee-N` in roster order.
    /// - Every slot is present, unnamed and dated `date`.
    /// - The count is used as given; clamping happens at input time.
    pub fn generate_roster(&mut self, expected_count: u32, date: &str) -> &[AttendeeSlot] {
        let count = expected_count as usize;
        self.slots = (1..=count)
            .map(|position| AttendeeSlot::new(SlotId::from_position(position), date))
            .collect();
        self.generation = self.generation.wrapping_add(1);
        info!(
            "event=roster_generate module=roster status=ok slot_count={} generation={}",
            count, self.generation
        );
        &self.slots
    }

    /// Applies a partial update to the slot with `id`.
    ///
    /// Returns the updated slot, or `None` when no slot matches.
    pub fn update_slot(&mut self, id: &SlotId, patch: SlotPatch) -> Option<&AttendeeSlot> {
        let Some(slot) = self.slots.iter_mut().find(|slot| &slot.id == id) else {
            debug!("event=roster_update module=roster status=skipped slot_id={id}");
            return None;
        };
        slot.apply(patch);
        Some(slot)
    }

    /// Flips presence of one slot, clearing its signature and reason.
    pub fn toggle_presence(&mut self, id: &SlotId) -> Option<&AttendeeSlot> {
        let slot = self.slots.iter_mut().find(|slot| &slot.id == id)?;
        slot.toggle_presence();
        Some(slot)
    }

    /// Stores a captured signature on a present slot.
    pub fn set_signature(&mut self, id: &SlotId, blob: SignatureBlob) -> Option<&AttendeeSlot> {
        self.update_slot(id, SlotPatch::signature(blob))
    }

    pub fn slot(&self, id: &SlotId) -> Option<&AttendeeSlot> {
        self.slots.iter().find(|slot| &slot.id == id)
    }

    pub fn slots(&self) -> &[AttendeeSlot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Monotonic counter bumped by every regeneration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Computes completion statistics for the current roster.
    pub fn stats(&self, meeting: &MeetingInfo) -> RosterStats {
        compute_stats(&self.slots, meeting)
    }
}
