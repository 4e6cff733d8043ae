//! Simulation clock and timer dispatch
//!
//! The host feeds frame deltas into [`GameState::advance`], which fires every
//! timer that came due in that window, in time order, each at its own due time.

use super::motion;
use super::schedule::TimerKind;
use super::state::{GamePhase, GameState};

impl GameState {
    /// Advance the simulation clock by `dt_ms` (clamped to `max_frame_ms`)
    ///
    /// Motion delivered between frames was already applied at the previous
    /// frame's clock, so it lands before any timer due in this window.
    pub fn advance(&mut self, dt_ms: f64) {
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return;
        }
        let until = self.clock_ms + dt_ms.min(self.tuning.max_frame_ms);

        while let Some((kind, due)) = self.schedule.pop_due(until, &mut self.rng) {
            self.clock_ms = due.max(self.clock_ms);
            self.fire(kind);
        }
        self.clock_ms = until;
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::MasterTick => self.master_tick(),
            TimerKind::Jitter => self.apply_jitter(),
            TimerKind::DisplaceA | TimerKind::DisplaceB => self.displace(),
            TimerKind::TeleportSettle => self.cursor.teleporting = false,
            TimerKind::Restart => self.restart(),
        }
    }

    /// Teleport the marker to a random in-bounds position
    pub fn displace(&mut self) {
        let bounds = self.layout.cursor_bounds();
        self.cursor.pos = motion::displacement_target(&bounds, &mut self.rng);
        self.cursor.teleporting = true;
        self.schedule.once(
            TimerKind::TeleportSettle,
            self.clock_ms + self.tuning.teleport_flag_ms,
        );
        log::trace!(
            "Displaced to ({:.0}, {:.0})",
            self.cursor.pos.x,
            self.cursor.pos.y
        );
        self.evaluate_cursor();
    }

    /// Nudge the marker by bounded random noise
    pub fn apply_jitter(&mut self) {
        let bounds = self.layout.cursor_bounds();
        self.cursor.pos = motion::jittered(
            self.cursor.pos,
            self.tuning.jitter_amount,
            &bounds,
            &mut self.rng,
        );
        self.evaluate_cursor();
    }

    /// Fixed-cadence re-evaluation, independent of movement
    pub fn master_tick(&mut self) {
        self.evaluate_cursor();

        if self.phase == GamePhase::Running
            && !self.duration_reported
            && self.session.check_duration(self.clock_ms)
        {
            self.duration_reported = true;
            log::debug!(
                "Session duration budget of {:.0} ms reached",
                self.session.duration_ms
            );
        }
    }
}
