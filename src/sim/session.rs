//! Session clock

use serde::{Deserialize, Serialize};

/// Start timestamp and duration budget of the current session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Session {
    pub fn start(now_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms,
        }
    }

    #[inline]
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }

    /// True once the duration budget is used up
    ///
    /// Nothing acts on this yet; the master tick only reports it.
    pub fn check_duration(&self, now_ms: f64) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_duration() {
        let session = Session::start(1_000.0, 30_000.0);
        assert!(!session.check_duration(1_000.0));
        assert!(!session.check_duration(30_999.0));
        assert!(session.check_duration(31_000.0));
        assert_eq!(session.elapsed(11_000.0), 10_000.0);
    }
}
