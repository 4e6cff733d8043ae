//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock advanced only by the host
//! - Seeded RNG only
//! - Timers fire in (due time, kind) order
//! - No rendering or platform dependencies

pub mod geometry;
pub mod health;
pub mod input;
pub mod motion;
pub mod proximity;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use geometry::{Circle, Rect, distance};
pub use health::{HealthMeter, HealthTransition};
pub use input::InputTracker;
pub use proximity::{BarColor, Classification, MarkerStyle, VisualFeedback, evaluate};
pub use schedule::{Period, Scheduler, Timer, TimerKind};
pub use session::Session;
pub use state::{Cursor, GameEvent, GamePhase, GameState, Layout};
