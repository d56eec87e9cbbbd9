//! Freehand signature capture.
//!
//! # Responsibility
//! - Turn pointer drag gestures into SVG path strokes.
//! - Serialize committed strokes into a `SignatureBlob`.
//! - Render strokes back as SVG for the capture surface.
//!
//! # Invariants
//! - Coordinates are device-local pixels of the capture surface.
//! - One session is exclusively owned by one open signature modal.

mod capture;
mod render;

pub use capture::{Point, SignatureSession};
pub use render::{CanvasGeometry, StrokeStyle, PLACEHOLDER_TEXT, TABLET_MIN_WIDTH};

use thiserror::Error;

/// Signature capture and blob errors.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Save requested before any stroke was drawn.
    #[error("signature has no strokes")]
    EmptySignature,
    /// Stroke data could not be serialized.
    #[error("failed to encode signature: {0}")]
    Encode(#[source] serde_json::Error),
    /// A stored blob is not valid stroke data.
    #[error("malformed signature blob: {0}")]
    MalformedBlob(#[source] serde_json::Error),
}
