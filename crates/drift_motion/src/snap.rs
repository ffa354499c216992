//! Snap points
//!
//! Advisory resting positions along a progress range. An external driver
//! (for instance [`ScrollTween`](crate::tween::ScrollTween)) eases toward
//! the nearest one; the step mapper's index arithmetic ignores them.

use drift_core::{DriftError, Result};
use smallvec::SmallVec;

/// A validated, strictly increasing sequence of progress values from 0 to 1
#[derive(Clone, Debug, PartialEq)]
pub struct SnapPoints {
    points: SmallVec<[f32; 8]>,
}

impl SnapPoints {
    /// Validate and wrap a sequence of snap points
    ///
    /// The sequence must be non-empty, finite, strictly increasing, start at
    /// exactly 0 and end at exactly 1.
    pub fn new(points: impl IntoIterator<Item = f32>) -> Result<Self> {
        let points: SmallVec<[f32; 8]> = points.into_iter().collect();

        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Err(DriftError::InvalidSnapPoints("no snap points".into()));
        };
        if points.iter().any(|p| !p.is_finite()) {
            return Err(DriftError::NonFinite("snap point"));
        }
        if first != 0.0 {
            return Err(DriftError::InvalidSnapPoints(format!(
                "first snap point must be 0, got {}",
                first
            )));
        }
        if last != 1.0 {
            return Err(DriftError::InvalidSnapPoints(format!(
                "last snap point must be 1, got {}",
                last
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1] <= w[0]) {
            return Err(DriftError::InvalidSnapPoints(format!(
                "snap points must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }

        Ok(Self { points })
    }

    /// Snap points at every step boundary: `i / step_count` for `i` in `0..=step_count`
    pub fn even(step_count: usize) -> Result<Self> {
        if step_count < 1 {
            return Err(DriftError::InvalidStepCount(step_count));
        }
        let n = step_count as f32;
        Self::new((0..=step_count).map(|i| if i == step_count { 1.0 } else { i as f32 / n }))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the snap point closest to `progress`
    ///
    /// Ties resolve toward the lower snap point. `progress` is clamped to
    /// [0, 1]; non-finite input yields `None`.
    pub fn nearest_index(&self, progress: f32) -> Option<usize> {
        if !progress.is_finite() {
            return None;
        }
        let progress = progress.clamp(0.0, 1.0);

        // First snap point >= progress; always in range because the last point is 1
        let upper = self.points.partition_point(|&p| p < progress);
        if upper == 0 {
            return Some(0);
        }
        let lower = upper - 1;
        let below = progress - self.points[lower];
        let above = self.points[upper] - progress;

        Some(if above < below { upper } else { lower })
    }

    /// The snap point value closest to `progress` (ties toward the lower one)
    pub fn nearest(&self, progress: f32) -> Option<f32> {
        self.nearest_index(progress).map(|i| self.points[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_validation() {
        assert!(SnapPoints::new([0.0, 0.5, 1.0]).is_ok());
        assert!(SnapPoints::new([0.0, 1.0]).is_ok());

        assert!(matches!(
            SnapPoints::new(std::iter::empty()),
            Err(DriftError::InvalidSnapPoints(_))
        ));
        assert!(matches!(
            SnapPoints::new([0.1, 1.0]),
            Err(DriftError::InvalidSnapPoints(_))
        ));
        assert!(matches!(
            SnapPoints::new([0.0, 0.9]),
            Err(DriftError::InvalidSnapPoints(_))
        ));
        assert!(matches!(
            SnapPoints::new([0.0, 0.5, 0.5, 1.0]),
            Err(DriftError::InvalidSnapPoints(_))
        ));
        assert!(matches!(
            SnapPoints::new([0.0, f32::NAN, 1.0]),
            Err(DriftError::NonFinite(_))
        ));
    }

    #[test]
    fn test_even_snaps() {
        let snaps = SnapPoints::even(4).unwrap();
        assert_eq!(snaps.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(SnapPoints::even(0).is_err());

        let single = SnapPoints::even(1).unwrap();
        assert_eq!(single.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_nearest_snap() {
        let snaps = SnapPoints::new([0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();

        assert_eq!(snaps.nearest(0.0), Some(0.0));
        assert_eq!(snaps.nearest(0.1), Some(0.0));
        assert_eq!(snaps.nearest(0.2), Some(0.25));
        assert_eq!(snaps.nearest(0.25), Some(0.25));
        assert_eq!(snaps.nearest(0.9), Some(1.0));
        assert_eq!(snaps.nearest(1.0), Some(1.0));
    }

    #[test]
    fn test_nearest_snap_tie_goes_low() {
        let snaps = SnapPoints::new([0.0, 0.5, 1.0]).unwrap();
        assert_eq!(snaps.nearest(0.25), Some(0.0));
        assert_eq!(snaps.nearest(0.75), Some(0.5));
    }

    #[test]
    fn test_nearest_snap_clamps() {
        let snaps = SnapPoints::new([0.0, 0.5, 1.0]).unwrap();
        assert_eq!(snaps.nearest(-3.0), Some(0.0));
        assert_eq!(snaps.nearest(7.0), Some(1.0));
        assert_eq!(snaps.nearest(f32::NAN), None);
        assert_eq!(snaps.nearest_index(0.6), Some(1));
    }
}
