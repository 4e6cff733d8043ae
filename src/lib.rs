//! Hold Steady - keep the cursor on the hidden target
//!
//! Core modules:
//! - `sim`: Deterministic simulation (cursor, health, timers, session)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser DOM and pointer-capture bindings (wasm32 only)
//! - `audio`: Procedural ambient loop and alert cue (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{RandomPeriod, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Health meter ceiling (also the bar width in px)
    pub const HEALTH_MAX: i32 = 200;
    /// Health regained per on-target evaluation
    pub const RECOVER_STEP: i32 = 5;
    /// Health lost per off-target evaluation
    pub const DECAY_STEP: i32 = 2;

    /// Master tick cadence (ms): re-evaluates proximity and session duration
    pub const MASTER_TICK_MS: f64 = 100.0;

    /// Maximum jitter offset per axis (px)
    pub const JITTER_AMOUNT: f32 = 6.0;
    /// Jitter cadence (ms)
    pub const JITTER_PERIOD_MS: f64 = 50.0;

    /// First displacement timer range (ms)
    pub const DISPLACE_A_MIN_MS: f64 = 2000.0;
    pub const DISPLACE_A_MAX_MS: f64 = 4000.0;
    /// Second displacement timer range (ms)
    pub const DISPLACE_B_MIN_MS: f64 = 4000.0;
    pub const DISPLACE_B_MAX_MS: f64 = 7000.0;
    /// How long the marker carries the teleport transition flag (ms)
    pub const TELEPORT_FLAG_MS: f64 = 50.0;

    /// Delay between depletion and the session restart (ms)
    pub const RESTART_DELAY_MS: f64 = 1000.0;
    /// Session length budget (ms); the duration hook is inert
    pub const SESSION_DURATION_MS: f64 = 30_000.0;

    /// Largest frame delta fed to the simulation (ms), prevents catch-up bursts
    pub const MAX_FRAME_MS: f64 = 250.0;
    /// Shortest period any timer may be tuned to (ms)
    pub const MIN_PERIOD_MS: f64 = 1.0;
}
