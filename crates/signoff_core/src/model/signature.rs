//! Stored signature payload.
//!
//! # Responsibility
//! - Define the opaque blob stored verbatim on an attendee slot.
//! - Define the decoded stroke data behind that blob.
//!
//! # Invariants
//! - Encoded form is JSON `{"paths": [...], "timestamp": <epoch ms>}`.
//! - Each path is one stroke in SVG moveto/lineto syntax.

use crate::signature::SignatureError;
use serde::{Deserialize, Serialize};

/// Decoded signature strokes plus capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureData {
    /// One SVG path string per continuous drag gesture.
    pub paths: Vec<String>,
    /// Capture time in Unix epoch milliseconds.
    pub timestamp: i64,
}

impl SignatureData {
    /// A signature is present when at least one non-empty path exists.
    pub fn has_strokes(&self) -> bool {
        self.paths.iter().any(|path| !path.trim().is_empty())
    }

    /// Serializes into the opaque blob stored on a slot.
    pub fn encode(&self) -> Result<SignatureBlob, SignatureError> {
        let raw = serde_json::to_string(self).map_err(SignatureError::Encode)?;
        Ok(SignatureBlob(raw))
    }
}

/// Opaque signature payload stored on an attendee slot.
///
/// Stored verbatim. Only `has_strokes` and the signature canvas look
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureBlob(String);

impl SignatureBlob {
    /// Wraps a blob received from the UI shell.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the stored text verbatim.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the blob decodes to at least one drawn path.
    pub fn has_strokes(&self) -> bool {
        self.decode().is_ok_and(|data| data.has_strokes())
    }

    /// Decodes stroke data for redisplay.
    pub fn decode(&self) -> Result<SignatureData, SignatureError> {
        serde_json::from_str(&self.0).map_err(SignatureError::MalformedBlob)
    }
}
