//! Stroke capture state machine.
//!
//! `Idle --start--> Drawing --move--> Drawing --end--> Idle`; `clear` is
//! valid from any state and returns to `Idle`.

use super::SignatureError;
use crate::model::signature::{SignatureBlob, SignatureData};
use log::{debug, info};

/// Pointer location in capture-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CaptureState {
    Idle,
    Drawing { path: String },
}

/// One signature capture sub-session.
#[derive(Debug, Clone)]
pub struct SignatureSession {
    completed: Vec<String>,
    state: CaptureState,
}

impl Default for SignatureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureSession {
    /// Creates an idle session with no strokes.
    pub fn new() -> Self {
        Self {
            completed: Vec::new(),
            state: CaptureState::Idle,
        }
    }

    /// Reopens a session showing the strokes of an existing blob.
    pub fn resume(blob: &SignatureBlob) -> Result<Self, SignatureError> {
        let data = blob.decode()?;
        Ok(Self {
            completed: data
                .paths
                .into_iter()
                .filter(|path| !path.trim().is_empty())
                .collect(),
            state: CaptureState::Idle,
        })
    }

    /// Pointer down: starts a new stroke at `point`.
    ///
    /// A start while already drawing commits the open stroke first.
    pub fn begin_stroke(&mut self, point: Point) {
        self.commit_active();
        let mut path = String::new();
        push_command(&mut path, 'M', point);
        self.state = CaptureState::Drawing { path };
    }

    /// Pointer move: extends the open stroke. Ignored while idle.
    pub fn extend_stroke(&mut self, point: Point) {
        match &mut self.state {
            CaptureState::Drawing { path } => push_command(path, 'L', point),
            CaptureState::Idle => {
                debug!("event=signature_move module=signature status=skipped reason=idle");
            }
        }
    }

    /// Pointer up: commits the open stroke. Ignored while idle.
    pub fn end_stroke(&mut self) {
        self.commit_active();
    }

    /// Drops every stroke, including one in progress.
    pub fn clear(&mut self) {
        self.completed.clear();
        self.state = CaptureState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing { .. })
    }

    /// Committed strokes in drawing order.
    pub fn completed_paths(&self) -> &[String] {
        &self.completed
    }

    /// The stroke currently being drawn, if any.
    pub fn current_path(&self) -> Option<&str> {
        match &self.state {
            CaptureState::Drawing { path } => Some(path.as_str()),
            CaptureState::Idle => None,
        }
    }

    /// Committed strokes followed by the open stroke.
    pub fn visible_paths(&self) -> impl Iterator<Item = &str> {
        self.completed
            .iter()
            .map(String::as_str)
            .chain(self.current_path())
    }

    pub fn has_signature(&self) -> bool {
        !self.completed.is_empty() || self.is_drawing()
    }

    /// Serializes strokes stamped with the current time.
    pub fn save(&mut self) -> Result<SignatureBlob, SignatureError> {
        self.save_at(chrono::Utc::now().timestamp_millis())
    }

    /// Serializes strokes stamped with `timestamp_ms`.
    ///
    /// An open stroke is committed first. Fails with `EmptySignature` and
    /// leaves the session untouched when nothing was drawn.
    pub fn save_at(&mut self, timestamp_ms: i64) -> Result<SignatureBlob, SignatureError> {
        if !self.has_signature() {
            return Err(SignatureError::EmptySignature);
        }
        self.commit_active();

        let data = SignatureData {
            paths: self.completed.clone(),
            timestamp: timestamp_ms,
        };
        let blob = data.encode()?;
        info!(
            "event=signature_save module=signature status=ok stroke_count={}",
            data.paths.len()
        );
        Ok(blob)
    }

    fn commit_active(&mut self) {
        if let CaptureState::Drawing { path } = std::mem::replace(&mut self.state, CaptureState::Idle)
        {
            self.completed.push(path);
        }
    }
}

fn push_command(path: &mut String, command: char, point: Point) {
    if !path.is_empty() {
        path.push(' ');
    }
    path.push_str(&format!("{command}{:.2},{:.2}", point.x, point.y));
}
