//! Easing curves
//!
//! All curves map `t` in [0, 1] to [0, 1]; inputs outside that range are clamped.

/// Easing function selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Hermite smoothstep `3t² - 2t³`
    Smoothstep,
    EaseInOutCubic,
    /// Exponential ease-out used for smooth wheel scrolling
    ///
    /// `min(1, 1.001 - 2^(-10t))`, which reaches exactly 1 slightly before `t == 1`.
    ExpoOut,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::ExpoOut => (1.001 - 2.0_f32.powf(-10.0 * t)).min(1.0),
        }
    }
}
