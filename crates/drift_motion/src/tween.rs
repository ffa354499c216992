//! Smooth scroll driver
//!
//! Eases a scroll position toward a target over a fixed duration. Calling
//! [`ScrollTween::scroll_to`] mid-flight retargets from the current
//! position, so wheel input can keep pushing the destination.

use drift_core::{DriftError, Result};

use crate::easing::Easing;
use crate::snap::SnapPoints;

/// Configuration for [`ScrollTween`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTweenConfig {
    /// Time to reach the target, in seconds
    pub duration: f32,
    pub easing: Easing,
}

impl Default for ScrollTweenConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: Easing::ExpoOut,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollTween {
    config: ScrollTweenConfig,
    position: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    velocity: f32,
    animating: bool,
}

impl ScrollTween {
    pub fn new(config: ScrollTweenConfig, position: f32) -> Result<Self> {
        if !(config.duration.is_finite() && config.duration > 0.0) {
            return Err(DriftError::InvalidConfig(format!(
                "tween duration must be positive, got {}",
                config.duration
            )));
        }
        if !position.is_finite() {
            return Err(DriftError::NonFinite("initial scroll position"));
        }

        Ok(Self {
            config,
            position,
            from: position,
            to: position,
            elapsed: 0.0,
            velocity: 0.0,
            animating: false,
        })
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Displacement of the last tick
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Start easing toward `target` from the current position
    pub fn scroll_to(&mut self, target: f32) {
        if !target.is_finite() {
            tracing::trace!("ScrollTween: dropped non-finite target {}", target);
            return;
        }
        self.from = self.position;
        self.to = target;
        self.elapsed = 0.0;
        self.animating = self.from != self.to;
    }

    /// Shift the destination by `delta` (wheel input)
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.to + delta);
    }

    /// Ease toward the snap point nearest the current target
    ///
    /// `extent` is the scroll distance that maps to progress 1.
    pub fn settle_to_snap(&mut self, snaps: &SnapPoints, origin: f32, extent: f32) {
        if extent <= 0.0 {
            return;
        }
        if let Some(snap) = snaps.nearest((self.to - origin) / extent) {
            self.scroll_to(origin + snap * extent);
        }
    }

    /// Move immediately, cancelling any animation
    pub fn jump_to(&mut self, position: f32) {
        if !position.is_finite() {
            return;
        }
        self.position = position;
        self.from = position;
        self.to = position;
        self.velocity = 0.0;
        self.animating = false;
    }

    /// Advance by `dt` seconds and return the new position
    pub fn tick(&mut self, dt: f32) -> f32 {
        if !self.animating {
            self.velocity = 0.0;
            return self.position;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.elapsed += dt;
        let t = self.elapsed / self.config.duration;
        let eased = self.config.easing.apply(t);

        let next = if t >= 1.0 || eased >= 1.0 {
            self.animating = false;
            self.to
        } else {
            self.from + (self.to - self.from) * eased
        };

        self.velocity = next - self.position;
        self.position = next;
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_rejects_bad_config() {
        let config = ScrollTweenConfig {
            duration: 0.0,
            ..Default::default()
        };
        assert!(ScrollTween::new(config, 0.0).is_err());
        assert!(ScrollTween::new(ScrollTweenConfig::default(), f32::NAN).is_err());
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = ScrollTween::new(ScrollTweenConfig::default(), 0.0).unwrap();
        tween.scroll_to(1000.0);
        assert!(tween.is_animating());

        let mut prev = 0.0;
        for _ in 0..120 {
            let pos = tween.tick(DT);
            assert!(pos >= prev);
            assert!(pos <= 1000.0);
            prev = pos;
        }
        assert!(!tween.is_animating());
        assert_eq!(tween.position(), 1000.0);
        assert_eq!(tween.tick(DT), 1000.0);
        assert_eq!(tween.velocity(), 0.0);
    }

    #[test]
    fn test_velocity_decays() {
        let mut tween = ScrollTween::new(ScrollTweenConfig::default(), 0.0).unwrap();
        tween.scroll_to(1000.0);

        tween.tick(DT);
        let early = tween.velocity();
        for _ in 0..30 {
            tween.tick(DT);
        }
        assert!(early > 0.0);
        assert!(tween.velocity() < early);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let config = ScrollTweenConfig {
            duration: 1.0,
            easing: Easing::Linear,
        };
        let mut tween = ScrollTween::new(config, 0.0).unwrap();
        tween.scroll_to(100.0);
        for _ in 0..30 {
            tween.tick(DT);
        }
        let mid = tween.position();
        assert!((mid - 50.0).abs() < 1.0);

        tween.scroll_by(100.0);
        assert_eq!(tween.target(), 200.0);
        tween.tick(0.5);
        assert!((tween.position() - (mid + (200.0 - mid) * 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_jump_and_non_finite() {
        let mut tween = ScrollTween::new(ScrollTweenConfig::default(), 0.0).unwrap();
        tween.scroll_to(f32::NAN);
        assert!(!tween.is_animating());

        tween.scroll_to(300.0);
        tween.jump_to(50.0);
        assert!(!tween.is_animating());
        assert_eq!(tween.tick(DT), 50.0);

        // A non-finite step advances no time
        tween.scroll_to(60.0);
        assert!((tween.tick(f32::NAN) - 50.0).abs() < 0.1);
        assert!(tween.is_animating());
    }

    #[test]
    fn test_settle_to_snap() {
        let snaps = SnapPoints::even(4).unwrap();
        let mut tween = ScrollTween::new(ScrollTweenConfig::default(), 0.0).unwrap();

        tween.scroll_to(900.0);
        tween.settle_to_snap(&snaps, 0.0, 2400.0);
        assert_eq!(tween.target(), 600.0);

        tween.scroll_to(1500.0);
        tween.settle_to_snap(&snaps, 0.0, 2400.0);
        assert_eq!(tween.target(), 1200.0);
    }
}
