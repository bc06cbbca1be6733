//! Append-only recording of brush gestures.
//!
//! A gesture is recorded as a [`PaintStroke`]: start position, end
//! position, and the ordered positions in between. Strokes are history for
//! the host (replay, analytics); nothing in the paint or fade algorithms
//! reads them back.

use glam::Vec3;

use crate::types::PaintStroke;

/// Error type for stroke recording operations.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("no active stroke - record a position first")]
    NotStarted,
}

#[derive(Debug, Clone)]
struct ActiveStroke {
    start: Vec3,
    positions: Vec<Vec3>,
}

/// Builds one stroke at a time from incoming gesture positions.
///
/// The first recorded position starts the stroke, subsequent positions
/// extend it, and `finish` seals it with its end position.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    active: Option<ActiveStroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is currently being recorded.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Record a gesture position, starting a new stroke if none is active.
    pub fn extend(&mut self, position: Vec3) {
        match &mut self.active {
            Some(stroke) => stroke.positions.push(position),
            None => {
                self.active = Some(ActiveStroke {
                    start: position,
                    positions: vec![position],
                });
            }
        }
    }

    /// Seal the active stroke with its end position.
    pub fn finish(&mut self, end: Vec3) -> Result<PaintStroke, RecorderError> {
        let stroke = self.active.take().ok_or(RecorderError::NotStarted)?;
        Ok(PaintStroke {
            start: stroke.start,
            end,
            positions: stroke.positions,
        })
    }

    /// Drop the active stroke without sealing it. Returns whether one
    /// was active.
    pub fn abort(&mut self) -> bool {
        self.active.take().is_some()
    }
}

/// Append-only storage for completed strokes.
#[derive(Debug, Default)]
pub struct StrokeLog {
    strokes: Vec<PaintStroke>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed stroke.
    pub fn append(&mut self, stroke: PaintStroke) {
        self.strokes.push(stroke);
    }

    /// All recorded strokes, oldest first.
    pub fn strokes(&self) -> &[PaintStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
