//! Involuntary cursor motion: random displacement and jitter

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;

/// Uniformly random in-bounds position
pub fn displacement_target<R: Rng>(bounds: &Rect, rng: &mut R) -> Vec2 {
    let size = bounds.size();
    let u = Vec2::new(rng.random::<f32>(), rng.random::<f32>());
    bounds.clamp_point(bounds.min + u * size)
}

/// Independent noise in `[-amount, amount]` per axis
pub fn jitter_offset<R: Rng>(amount: f32, rng: &mut R) -> Vec2 {
    let u = Vec2::new(rng.random::<f32>(), rng.random::<f32>());
    (u - Vec2::splat(0.5)) * amount * 2.0
}

/// Position after one jitter step, clamped to bounds
pub fn jittered<R: Rng>(position: Vec2, amount: f32, bounds: &Rect, rng: &mut R) -> Vec2 {
    bounds.clamp_point(position + jitter_offset(amount, rng))
}
