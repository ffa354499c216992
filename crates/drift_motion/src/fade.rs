//! Velocity-driven blur and fade for fast scrolling

/// Configuration for [`VelocityFade`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityFadeConfig {
    /// Speeds at or below this magnitude render crisp
    pub threshold: f32,
    pub blur_per_velocity: f32,
    pub max_blur: f32,
    pub fade_per_velocity: f32,
    /// Largest opacity reduction
    pub max_fade: f32,
}

impl Default for VelocityFadeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            blur_per_velocity: 0.02,
            max_blur: 2.0,
            fade_per_velocity: 0.002,
            max_fade: 0.05,
        }
    }
}

/// Blur radius and opacity for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSample {
    pub blur: f32,
    pub opacity: f32,
}

impl FadeSample {
    pub const REST: FadeSample = FadeSample {
        blur: 0.0,
        opacity: 1.0,
    };

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityFade {
    config: VelocityFadeConfig,
}

impl VelocityFade {
    pub fn new(config: VelocityFadeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VelocityFadeConfig {
        &self.config
    }

    /// Sample for a scroll velocity in units per tick
    pub fn sample(&self, velocity: f32) -> FadeSample {
        let speed = velocity.abs();
        if !speed.is_finite() || speed <= self.config.threshold {
            return FadeSample::REST;
        }

        FadeSample {
            blur: (speed * self.config.blur_per_velocity).min(self.config.max_blur),
            opacity: 1.0 - (speed * self.config.fade_per_velocity).min(self.config.max_fade),
        }
    }
}
