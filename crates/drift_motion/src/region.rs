//! Scroll-linked region geometry
//!
//! A region is a tall section whose content stays pinned while the page
//! scrolls through it. Its progress runs from 0 when the section's top
//! reaches the viewport top to 1 when its bottom reaches the viewport bottom.

use drift_core::Rect;

/// A region's vertical placement relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollRegion {
    /// Distance from the viewport top to the region top (negative once scrolled past)
    pub top: f32,
    /// Total region height
    pub height: f32,
}

impl ScrollRegion {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Region from viewport-relative bounds
    pub fn from_bounds(bounds: Rect) -> Self {
        Self::new(bounds.y, bounds.height)
    }

    /// Height that scrolls past while the region content is pinned
    pub fn scrollable(&self, viewport_height: f32) -> f32 {
        self.height - viewport_height
    }

    /// Progress through the region in [0, 1]
    ///
    /// Regions no taller than the viewport jump from 0 to 1 as their top
    /// crosses the viewport top. Non-finite geometry yields NaN, which the
    /// step mapper drops.
    pub fn progress(&self, viewport_height: f32) -> f32 {
        if !(self.top.is_finite() && self.height.is_finite() && viewport_height.is_finite()) {
            return f32::NAN;
        }

        let scrollable = self.scrollable(viewport_height);
        if scrollable <= 0.0 {
            return if self.top > 0.0 { 0.0 } else { 1.0 };
        }

        (-self.top / scrollable).clamp(0.0, 1.0)
    }

    /// Whether any part of the region overlaps the viewport
    pub fn is_in_viewport(&self, viewport_height: f32) -> bool {
        self.top < viewport_height && self.top + self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_progress() {
        // 400vh section in an 800px viewport
        let viewport = 800.0;
        let height = 3200.0;

        assert_eq!(ScrollRegion::new(100.0, height).progress(viewport), 0.0);
        assert_eq!(ScrollRegion::new(0.0, height).progress(viewport), 0.0);
        assert!((ScrollRegion::new(-1200.0, height).progress(viewport) - 0.5).abs() < 1e-6);
        assert_eq!(ScrollRegion::new(-2400.0, height).progress(viewport), 1.0);
        assert_eq!(ScrollRegion::new(-5000.0, height).progress(viewport), 1.0);
    }

    #[test]
    fn test_short_region_progress() {
        let region = ScrollRegion::new(10.0, 500.0);
        assert_eq!(region.progress(800.0), 0.0);

        let region = ScrollRegion::new(-10.0, 500.0);
        assert_eq!(region.progress(800.0), 1.0);
    }

    #[test]
    fn test_non_finite_geometry() {
        assert!(ScrollRegion::new(f32::NAN, 100.0).progress(800.0).is_nan());
        assert!(ScrollRegion::new(0.0, 3200.0)
            .progress(f32::INFINITY)
            .is_nan());
    }

    #[test]
    fn test_in_viewport() {
        let viewport = 800.0;
        assert!(ScrollRegion::new(700.0, 3200.0).is_in_viewport(viewport));
        assert!(ScrollRegion::new(-3000.0, 3200.0).is_in_viewport(viewport));
        assert!(!ScrollRegion::new(800.0, 3200.0).is_in_viewport(viewport));
        assert!(!ScrollRegion::new(-3200.0, 3200.0).is_in_viewport(viewport));
    }

    #[test]
    fn test_from_bounds() {
        let region = ScrollRegion::from_bounds(Rect::new(0.0, -50.0, 1200.0, 2000.0));
        assert_eq!(region, ScrollRegion::new(-50.0, 2000.0));
    }
}
