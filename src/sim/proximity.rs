//! Cursor-vs-target proximity classification

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Circle;

/// Whether the marker sits over the target this evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    OnTarget,
    OffTarget,
}

/// Classify `point` against `target` (strict: the rim counts as off-target)
#[inline]
pub fn evaluate(point: Vec2, target: &Circle) -> Classification {
    if target.contains(point) {
        Classification::OnTarget
    } else {
        Classification::OffTarget
    }
}

/// Marker styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Normal,
    Alert,
}

/// Health bar color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    White,
    Red,
}

impl BarColor {
    pub fn as_css(&self) -> &'static str {
        match self {
            BarColor::White => "white",
            BarColor::Red => "red",
        }
    }
}

/// Visual state derived from the latest classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualFeedback {
    pub marker: MarkerStyle,
    pub bar: BarColor,
}

impl From<Classification> for VisualFeedback {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::OnTarget => Self {
                marker: MarkerStyle::Normal,
                bar: BarColor::White,
            },
            Classification::OffTarget => Self {
                marker: MarkerStyle::Alert,
                bar: BarColor::Red,
            },
        }
    }
}

impl Default for VisualFeedback {
    fn default() -> Self {
        Classification::OnTarget.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::distance;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_center_and_outside() {
        let target = Circle::new(Vec2::new(500.0, 400.0), 50.0);
        assert_eq!(evaluate(Vec2::new(500.0, 400.0), &target), Classification::OnTarget);
        assert_eq!(evaluate(Vec2::new(560.0, 400.0), &target), Classification::OffTarget);
    }

    #[test]
    fn test_boundary_is_off_target() {
        let target = Circle::new(Vec2::new(500.0, 400.0), 50.0);
        assert_eq!(evaluate(Vec2::new(500.0, 450.0), &target), Classification::OffTarget);
    }

    #[test]
    fn test_feedback_follows_classification() {
        let on: VisualFeedback = Classification::OnTarget.into();
        assert_eq!(on.marker, MarkerStyle::Normal);
        assert_eq!(on.bar.as_css(), "white");

        let off: VisualFeedback = Classification::OffTarget.into();
        assert_eq!(off.marker, MarkerStyle::Alert);
        assert_eq!(off.bar.as_css(), "red");
    }

    proptest! {
        #[test]
        fn prop_on_target_iff_strictly_inside(
            x in 0.0f32..1000.0,
            y in 0.0f32..800.0,
            r in 1.0f32..300.0,
        ) {
            let target = Circle::new(Vec2::new(500.0, 400.0), r);
            let p = Vec2::new(x, y);
            let expected = distance(p, target.center) < r;
            prop_assert_eq!(evaluate(p, &target) == Classification::OnTarget, expected);
        }
    }
}
