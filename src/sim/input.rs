//! Relative-motion input under exclusive pointer capture

use glam::Vec2;

use super::geometry::Rect;

/// Tracks whether pointer capture is engaged and applies motion deltas
///
/// Deltas that arrive while capture is off are dropped, so a browser
/// releasing the lock (and the jump that comes with it) never moves the marker.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    captured: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Record a capture-state change; returns true if the state flipped
    pub fn set_captured(&mut self, captured: bool) -> bool {
        let changed = self.captured != captured;
        self.captured = captured;
        changed
    }

    /// New marker position after a motion delta, or None while uncaptured
    pub fn apply(&self, position: Vec2, delta: Vec2, bounds: &Rect) -> Option<Vec2> {
        if !self.captured {
            return None;
        }
        Some(bounds.clamp_point(position + delta))
    }
}
