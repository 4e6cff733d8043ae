//! Health meter driven by proximity classifications

use serde::{Deserialize, Serialize};

use super::proximity::Classification;
use crate::Tuning;

/// Outcome of applying one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTransition {
    Recovered,
    Decayed,
    /// Value crossed to <= 0 on this update
    Depleted,
}

/// Bounded health value
///
/// Recovery is capped at `max`; decay has no floor so the value may go
/// negative, but depletion is reported only on the update that crosses to
/// `<= 0`. The latch clears only through [`HealthMeter::refill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMeter {
    value: i32,
    max: i32,
    recover_step: i32,
    decay_step: i32,
    depleted: bool,
}

impl HealthMeter {
    pub const MIN: i32 = 0;

    /// Full meter using the tuning's bounds and steps
    pub fn new(tuning: &Tuning) -> Self {
        Self::with_value(tuning, tuning.health_max)
    }

    /// Meter starting at an arbitrary value (capped at max)
    pub fn with_value(tuning: &Tuning, value: i32) -> Self {
        let value = value.min(tuning.health_max);
        Self {
            value,
            max: tuning.health_max,
            recover_step: tuning.recover_step,
            decay_step: tuning.decay_step,
            depleted: value <= Self::MIN,
        }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Value clamped into `MIN..=max`, for display
    #[inline]
    pub fn display_value(&self) -> i32 {
        self.value.clamp(Self::MIN, self.max)
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.value <= Self::MIN
    }

    pub fn recover(&mut self) {
        self.value = self.value.saturating_add(self.recover_step).min(self.max);
    }

    pub fn decay(&mut self) {
        self.value = self.value.saturating_sub(self.decay_step);
    }

    /// Apply a classification and report what happened
    pub fn apply(&mut self, classification: Classification) -> HealthTransition {
        match classification {
            Classification::OnTarget => self.recover(),
            Classification::OffTarget => self.decay(),
        }

        if self.is_depleted() {
            if !self.depleted {
                self.depleted = true;
                return HealthTransition::Depleted;
            }
        } else {
            self.depleted = false;
        }

        match classification {
            Classification::OnTarget => HealthTransition::Recovered,
            Classification::OffTarget => HealthTransition::Decayed,
        }
    }

    /// Back to full; re-arms the depletion latch
    pub fn refill(&mut self) {
        self.value = self.max;
        self.depleted = false;
    }
}
