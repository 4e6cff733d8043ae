//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A page may override any subset of
//! fields with a JSON block (`<script id="tuning" type="application/json">`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Inclusive range a randomized timer period is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomPeriod {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl RandomPeriod {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    fn validate(&self, field: &'static str) -> Result<(), TuningError> {
        if !(self.min_ms >= MIN_PERIOD_MS) {
            return Err(TuningError::Invalid {
                field,
                reason: "min_ms must be at least 1 ms",
            });
        }
        if !self.max_ms.is_finite() {
            return Err(TuningError::Invalid {
                field,
                reason: "max_ms must be finite",
            });
        }
        if self.max_ms < self.min_ms {
            return Err(TuningError::Invalid {
                field,
                reason: "max_ms must not be below min_ms",
            });
        }
        Ok(())
    }
}

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub health_max: i32,
    pub recover_step: i32,
    pub decay_step: i32,

    pub master_tick_ms: f64,

    pub jitter_amount: f32,
    pub jitter_period_ms: f64,

    pub displace_a: RandomPeriod,
    pub displace_b: RandomPeriod,
    pub teleport_flag_ms: f64,

    pub restart_delay_ms: f64,
    pub session_duration_ms: f64,

    pub max_frame_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            health_max: HEALTH_MAX,
            recover_step: RECOVER_STEP,
            decay_step: DECAY_STEP,

            master_tick_ms: MASTER_TICK_MS,

            jitter_amount: JITTER_AMOUNT,
            jitter_period_ms: JITTER_PERIOD_MS,

            displace_a: RandomPeriod::new(DISPLACE_A_MIN_MS, DISPLACE_A_MAX_MS),
            displace_b: RandomPeriod::new(DISPLACE_B_MIN_MS, DISPLACE_B_MAX_MS),
            teleport_flag_ms: TELEPORT_FLAG_MS,

            restart_delay_ms: RESTART_DELAY_MS,
            session_duration_ms: SESSION_DURATION_MS,

            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall a timer or break the health invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.health_max <= 0 {
            return Err(TuningError::Invalid {
                field: "health_max",
                reason: "must be positive",
            });
        }
        let steps = [
            ("recover_step", self.recover_step),
            ("decay_step", self.decay_step),
        ];
        for (field, step) in steps {
            if !(0..=self.health_max).contains(&step) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be between 0 and health_max",
                });
            }
        }
        if !(self.jitter_amount >= 0.0 && self.jitter_amount.is_finite()) {
            return Err(TuningError::Invalid {
                field: "jitter_amount",
                reason: "must be a finite, non-negative distance",
            });
        }

        let periods = [
            ("master_tick_ms", self.master_tick_ms),
            ("jitter_period_ms", self.jitter_period_ms),
            ("teleport_flag_ms", self.teleport_flag_ms),
            ("restart_delay_ms", self.restart_delay_ms),
            ("session_duration_ms", self.session_duration_ms),
            ("max_frame_ms", self.max_frame_ms),
        ];
        for (field, value) in periods {
            if !(value >= MIN_PERIOD_MS && value.is_finite()) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite period of at least 1 ms",
                });
            }
        }

        self.displace_a.validate("displace_a")?;
        self.displace_b.validate("displace_b")?;
        Ok(())
    }

    /// DOM id of the optional JSON override block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Load overrides from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.health_max, 200);
        assert_eq!(tuning.recover_step, 5);
        assert_eq!(tuning.decay_step, 2);
        assert_eq!(tuning.displace_a, RandomPeriod::new(2000.0, 4000.0));
        assert_eq!(tuning.displace_b, RandomPeriod::new(4000.0, 7000.0));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning =
            Tuning::from_json(r#"{ "decay_step": 4, "jitter_amount": 2.5 }"#).unwrap();
        assert_eq!(tuning.decay_step, 4);
        assert_eq!(tuning.jitter_amount, 2.5);
        assert_eq!(tuning.health_max, HEALTH_MAX);
        assert_eq!(tuning.master_tick_ms, MASTER_TICK_MS);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ decay_step: }").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Tuning::from_json(r#"{ "displace_b": { "min_ms": 5000, "max_ms": 100 } }"#)
            .unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "displace_b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let tuning = Tuning {
            jitter_period_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "jitter_period_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_health_rejected() {
        let tuning = Tuning {
            health_max: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_oversized_steps_rejected() {
        for json in [
            r#"{ "recover_step": 2147483647 }"#,
            r#"{ "decay_step": 201 }"#,
            r#"{ "recover_step": -1 }"#,
        ] {
            assert!(
                matches!(Tuning::from_json(json), Err(TuningError::Invalid { .. })),
                "accepted {json}"
            );
        }

        // A step equal to the whole meter is still allowed
        let tuning = Tuning::from_json(r#"{ "recover_step": 200, "decay_step": 200 }"#).unwrap();
        assert_eq!(tuning.recover_step, 200);
    }

    #[test]
    fn test_sub_millisecond_periods_rejected() {
        let err = Tuning::from_json(r#"{ "jitter_period_ms": 1e-13 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "jitter_period_ms",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "displace_a": { "min_ms": 0.5, "max_ms": 10 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "displace_a",
                ..
            }
        ));

        let tuning = Tuning::from_json(r#"{ "master_tick_ms": 1.0 }"#).unwrap();
        assert_eq!(tuning.master_tick_ms, MIN_PERIOD_MS);
    }
}
