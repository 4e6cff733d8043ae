//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of cursor, health and session state.
//! Input, timers and the host all mutate it through `&mut self`, and every
//! position change is followed by a proximity evaluation in the same call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::{Circle, Rect};
use super::health::{HealthMeter, HealthTransition};
use super::input::InputTracker;
use super::proximity::{self, Classification, VisualFeedback};
use super::schedule::{Scheduler, TimerKind};
use super::session::Session;
use crate::Tuning;

/// Session-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Producers running, health live
    Running,
    /// Health depleted: overlay up, waiting for the restart timer
    Terminating,
}

/// Side effects the host must carry out (audio, overlay)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Start the looping ambient track from the beginning
    StartAmbient,
    /// Stop and rewind the ambient track
    StopAmbient,
    /// Play the one-shot alert cue
    PlayAlert,
    ShowOverlay,
    HideOverlay,
    /// A new session replaced a terminated one
    Restarted { restarts: u32 },
}

/// Page geometry the simulation reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Viewport size (px)
    pub viewport: Vec2,
    /// Marker element size (px)
    pub marker: Vec2,
    /// Target icon region
    pub target: Circle,
}

impl Layout {
    pub fn new(viewport: Vec2, marker: Vec2, target: Circle) -> Self {
        Self {
            viewport,
            marker,
            target,
        }
    }

    /// Allowed range for the marker's top-left corner
    pub fn cursor_bounds(&self) -> Rect {
        Rect::from_origin_size(Vec2::ZERO, self.viewport - self.marker)
    }

    /// Point that is tested against the target
    #[inline]
    pub fn marker_center(&self, position: Vec2) -> Vec2 {
        position + self.marker / 2.0
    }

    /// Top-left corner at the viewport centre
    pub fn initial_cursor(&self) -> Vec2 {
        self.cursor_bounds().clamp_point(self.viewport / 2.0)
    }
}

/// The player-controlled marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Top-left corner in viewport coordinates
    pub pos: Vec2,
    /// Presentation hint: a displacement just happened
    pub teleporting: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation clock (ms)
    pub clock_ms: f64,
    pub phase: GamePhase,
    pub layout: Layout,
    pub cursor: Cursor,
    pub health: HealthMeter,
    pub session: Session,
    pub input: InputTracker,
    /// Latest proximity result; drives visual feedback
    pub last_classification: Classification,
    /// Sessions started after a termination
    pub restarts: u32,
    pub(crate) duration_reported: bool,
    pub(crate) schedule: Scheduler,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a running session with all producers armed
    pub fn new(seed: u64, layout: Layout, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            health: HealthMeter::new(&tuning),
            session: Session::start(0.0, tuning.session_duration_ms),
            tuning,
            clock_ms: 0.0,
            phase: GamePhase::Running,
            cursor: Cursor {
                pos: layout.initial_cursor(),
                teleporting: false,
            },
            layout,
            input: InputTracker::new(),
            last_classification: Classification::OnTarget,
            restarts: 0,
            duration_reported: false,
            schedule: Scheduler::new(),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Re-initialize everything to first-load values and re-arm the producers
    ///
    /// Pointer capture is left alone: it belongs to the host.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.health.refill();
        self.last_classification = Classification::OnTarget;
        self.session = Session::start(self.clock_ms, self.tuning.session_duration_ms);
        self.duration_reported = false;
        self.cursor = Cursor {
            pos: self.layout.initial_cursor(),
            teleporting: false,
        };
        self.schedule
            .arm_session(&self.tuning, self.clock_ms, &mut self.rng);

        self.events.push(GameEvent::HideOverlay);
        self.events.push(GameEvent::StartAmbient);
        log::info!("Session started at {:.0} ms", self.clock_ms);
    }

    /// Begin a fresh session after termination
    pub fn restart(&mut self) {
        self.restarts += 1;
        self.reset();
        self.events.push(GameEvent::Restarted {
            restarts: self.restarts,
        });
        log::info!("Session restarted ({} so far)", self.restarts);
    }

    /// Update page geometry; the marker is pulled back inside a shrunken viewport
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.cursor.pos = layout.cursor_bounds().clamp_point(self.cursor.pos);
    }

    /// Record a pointer-capture change reported by the host
    pub fn set_pointer_captured(&mut self, captured: bool) {
        if self.input.set_captured(captured) {
            log::debug!(
                "Pointer capture {}",
                if captured { "engaged" } else { "released" }
            );
        }
    }

    /// Apply a relative motion delta
    ///
    /// Returns the resulting classification, or None when the delta was
    /// dropped (capture off, or session terminating).
    pub fn on_relative_motion(&mut self, dx: f32, dy: f32) -> Option<Classification> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let bounds = self.layout.cursor_bounds();
        self.cursor.pos = self
            .input
            .apply(self.cursor.pos, Vec2::new(dx, dy), &bounds)?;
        Some(self.evaluate_cursor())
    }

    /// Centre of the marker
    pub fn marker_center(&self) -> Vec2 {
        self.layout.marker_center(self.cursor.pos)
    }

    /// Classify the marker against the target and feed the result to health
    pub fn evaluate_cursor(&mut self) -> Classification {
        let classification = proximity::evaluate(self.marker_center(), &self.layout.target);
        self.last_classification = classification;
        if self.health.apply(classification) == HealthTransition::Depleted {
            self.trigger_terminal();
        }
        classification
    }

    /// Enter the terminating phase after depletion
    ///
    /// Every producer is cancelled and only the restart timer stays armed.
    pub fn trigger_terminal(&mut self) {
        if self.phase == GamePhase::Terminating {
            return;
        }
        self.phase = GamePhase::Terminating;
        self.schedule.clear();
        self.schedule.once(
            TimerKind::Restart,
            self.clock_ms + self.tuning.restart_delay_ms,
        );

        self.events.push(GameEvent::StopAmbient);
        self.events.push(GameEvent::PlayAlert);
        self.events.push(GameEvent::ShowOverlay);
        log::info!(
            "Health depleted after {:.1} s, restarting in {:.0} ms",
            self.session.elapsed(self.clock_ms) / 1000.0,
            self.tuning.restart_delay_ms
        );
    }

    /// Marker/bar styling for the current classification
    pub fn feedback(&self) -> VisualFeedback {
        self.last_classification.into()
    }

    /// Health bar width (px)
    pub fn bar_width(&self) -> i32 {
        self.health.display_value()
    }

    pub fn overlay_visible(&self) -> bool {
        self.phase == GamePhase::Terminating
    }

    /// Take the pending host side effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::proximity::MarkerStyle;

    fn test_layout() -> Layout {
        Layout::new(
            Vec2::new(1000.0, 800.0),
            Vec2::new(20.0, 20.0),
            Circle::new(Vec2::new(500.0, 400.0), 50.0),
        )
    }

    #[test]
    fn test_new_session() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.health.value(), 200);
        assert_eq!(state.cursor.pos, Vec2::new(500.0, 400.0));
        assert_eq!(state.scheduler().len(), 4);
        assert!(!state.overlay_visible());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::HideOverlay, GameEvent::StartAmbient]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_marker_center_scenario() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());

        // Marker centre on the target centre
        state.cursor.pos = Vec2::new(490.0, 390.0);
        assert_eq!(state.evaluate_cursor(), Classification::OnTarget);

        // Marker centre 60 px to the right
        state.cursor.pos = Vec2::new(550.0, 390.0);
        assert_eq!(state.evaluate_cursor(), Classification::OffTarget);
        assert_eq!(state.feedback().marker, MarkerStyle::Alert);
    }

    #[test]
    fn test_motion_requires_capture() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        let start = state.cursor.pos;

        assert_eq!(state.on_relative_motion(30.0, 0.0), None);
        assert_eq!(state.cursor.pos, start);
        assert_eq!(state.health.value(), 200);

        state.set_pointer_captured(true);
        assert_eq!(
            state.on_relative_motion(100.0, 0.0),
            Some(Classification::OffTarget)
        );
        assert_eq!(state.cursor.pos, start + Vec2::new(100.0, 0.0));
        assert_eq!(state.health.value(), 198);
    }

    #[test]
    fn test_motion_clamped_to_viewport() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        state.set_pointer_captured(true);
        state.on_relative_motion(10_000.0, -10_000.0);
        assert_eq!(state.cursor.pos, Vec2::new(980.0, 0.0));
    }

    #[test]
    fn test_depletion_triggers_terminal_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, test_layout(), tuning.clone());
        state.drain_events();
        state.health = HealthMeter::with_value(&tuning, 3);
        state.cursor.pos = Vec2::ZERO;

        state.evaluate_cursor();
        assert_eq!(state.health.value(), 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.drain_events().is_empty());

        state.evaluate_cursor();
        assert_eq!(state.health.value(), -1);
        assert_eq!(state.phase, GamePhase::Terminating);
        assert!(state.overlay_visible());
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::StopAmbient,
                GameEvent::PlayAlert,
                GameEvent::ShowOverlay
            ]
        );

        // Only the restart is pending
        assert_eq!(state.scheduler().len(), 1);
        assert!(state.scheduler().is_armed(TimerKind::Restart));

        state.evaluate_cursor();
        state.trigger_terminal();
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_motion_ignored_while_terminating() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        state.set_pointer_captured(true);
        state.trigger_terminal();
        let pos = state.cursor.pos;
        assert_eq!(state.on_relative_motion(5.0, 5.0), None);
        assert_eq!(state.cursor.pos, pos);
    }

    #[test]
    fn test_restart_restores_initial_state() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        state.set_pointer_captured(true);
        state.on_relative_motion(-400.0, -300.0);
        state.trigger_terminal();
        state.drain_events();

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.health.value(), 200);
        assert_eq!(state.bar_width(), 200);
        assert!(!state.overlay_visible());
        assert_eq!(state.cursor.pos, Vec2::new(500.0, 400.0));
        assert_eq!(state.scheduler().len(), 4);
        assert!(state.input.is_captured());
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::HideOverlay,
                GameEvent::StartAmbient,
                GameEvent::Restarted { restarts: 1 }
            ]
        );
    }

    #[test]
    fn test_resize_reclamps_cursor() {
        let mut state = GameState::new(1, test_layout(), Tuning::default());
        state.cursor.pos = Vec2::new(900.0, 700.0);

        let mut layout = test_layout();
        layout.viewport = Vec2::new(500.0, 400.0);
        state.set_layout(layout);
        assert_eq!(state.cursor.pos, Vec2::new(480.0, 380.0));
    }
}
