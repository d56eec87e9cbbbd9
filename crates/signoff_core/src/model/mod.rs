//! Domain model for meeting metadata and attendee slots.
//!
//! # Responsibility
//! - Define the records shared by roster, report and FFI layers.
//! - Own the value-level invariants (count clamp, presence exclusivity).
//!
//! # Invariants
//! - Every attendee slot is identified by a stable `SlotId`.
//! - A slot carries a signature only when present, an absence reason only
//!   when absent.

pub mod attendee;
pub mod meeting;
pub mod signature;

/// Returns whether a typed name or absence reason counts as unfilled.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
