//! Easing curves for animated layout passes.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is non-decreasing, and hits both
//! end points exactly. Animated frames therefore move monotonically from the
//! start bounds to the target.

use serde::{Deserialize, Serialize};

/// Progress curve applied to animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow finish.
    EaseOut,
    /// Quadratic, slow start and finish.
    EaseInOut,
    /// Cubic, slow finish.
    EaseOutCubic,
}

/// Apply an easing curve to a progress value.
///
/// `t` is clamped to `[0, 1]` first.
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
    }
}

impl Easing {
    /// Apply this curve to `t`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        ease(self, t)
    }
}
