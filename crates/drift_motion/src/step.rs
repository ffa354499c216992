//! Scroll progress to discrete step mapping
//!
//! Converts a continuous progress value in [0, 1] into the active step of a
//! multi-step scroll presentation ("card N of M") plus how far into that
//! step the progress has advanced.
//!
//! Step `i` covers the half-open span `[i / n, (i + 1) / n)`. The last step
//! is closed at both ends so `progress == 1` lands on it exactly once, with
//! `local_progress == 1` so consumers can treat it as fully entered.
//!
//! # Example
//!
//! ```rust
//! use drift_motion::ScrollStepMapper;
//!
//! let mut mapper = ScrollStepMapper::new(4).unwrap();
//! let state = mapper.update(0.3);
//! assert_eq!(state.active_index, 1);
//! assert!((state.local_progress - 0.2).abs() < 1e-4);
//! ```

use drift_core::{DriftError, Result};

use crate::snap::SnapPoints;

/// Derived output of a [`ScrollStepMapper`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepState {
    /// Active step in `[0, step_count - 1]`
    pub active_index: usize,
    /// Fraction of the active step's span covered, in [0, 1]
    pub local_progress: f32,
    /// The clamped progress this state was computed from
    pub progress: f32,
    /// Number of steps in the mapping
    pub step_count: usize,
}

impl StepState {
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active_index
    }

    /// Step already scrolled past
    pub fn is_past(&self, index: usize) -> bool {
        index < self.active_index
    }

    /// Step not yet reached
    pub fn is_future(&self, index: usize) -> bool {
        index > self.active_index
    }

    /// Signed distance from the active step (negative for past steps)
    pub fn depth(&self, index: usize) -> isize {
        index as isize - self.active_index as isize
    }

    /// Fraction of steps reached, counting the active one: `(active + 1) / n`
    pub fn completion(&self) -> f32 {
        (self.active_index + 1) as f32 / self.step_count as f32
    }
}

/// Maps a progress scalar onto one of `step_count` discrete steps
#[derive(Clone, Debug)]
pub struct ScrollStepMapper {
    step_count: usize,
    snap_points: Option<SnapPoints>,
    last: StepState,
}

impl ScrollStepMapper {
    /// Create a mapper over `step_count` steps
    ///
    /// Fails with [`DriftError::InvalidStepCount`] if `step_count < 1`.
    pub fn new(step_count: usize) -> Result<Self> {
        Self::builder().steps(step_count).build()
    }

    pub fn builder() -> ScrollStepMapperBuilder {
        ScrollStepMapperBuilder::default()
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn snap_points(&self) -> Option<&SnapPoints> {
        self.snap_points.as_ref()
    }

    /// The most recent state produced by [`update`](Self::update)
    pub fn state(&self) -> StepState {
        self.last
    }

    /// Pure mapping of `progress` to a step state
    ///
    /// Out-of-range progress is clamped. Returns `None` for NaN or infinite input.
    pub fn map(&self, progress: f32) -> Option<StepState> {
        if !progress.is_finite() {
            return None;
        }
        Some(map_progress(self.step_count, progress.clamp(0.0, 1.0)))
    }

    /// Recompute the state from a new progress value
    ///
    /// Non-finite progress is treated as "no update this tick" and the
    /// previous state is returned unchanged.
    pub fn update(&mut self, progress: f32) -> StepState {
        match self.map(progress) {
            Some(state) => self.last = state,
            None => tracing::trace!("ScrollStepMapper: dropped non-finite progress {}", progress),
        }
        self.last
    }

    /// Closest configured snap point to `progress`, ties toward the earlier one
    ///
    /// Advisory output for an external easing driver; `None` when no snap
    /// points are configured or `progress` is non-finite.
    pub fn nearest_snap(&self, progress: f32) -> Option<f32> {
        self.snap_points.as_ref()?.nearest(progress)
    }
}

fn map_progress(step_count: usize, progress: f32) -> StepState {
    let last_index = step_count - 1;

    if progress >= 1.0 {
        return StepState {
            active_index: last_index,
            local_progress: 1.0,
            progress,
            step_count,
        };
    }

    let raw = progress * step_count as f32;
    // Rounding can push `raw` to `step_count` just below progress 1
    let active_index = (raw.floor() as usize).min(last_index);
    let local_progress = (raw - active_index as f32).clamp(0.0, 1.0);

    StepState {
        active_index,
        local_progress,
        progress,
        step_count,
    }
}

/// Builder for [`ScrollStepMapper`]
#[derive(Clone, Debug, Default)]
pub struct ScrollStepMapperBuilder {
    steps: usize,
    snap_points: Option<Vec<f32>>,
    even_snaps: bool,
}

impl ScrollStepMapperBuilder {
    pub fn steps(mut self, count: usize) -> Self {
        self.steps = count;
        self
    }

    /// Use explicit snap points (validated at `build`)
    pub fn snap_points(mut self, points: impl IntoIterator<Item = f32>) -> Self {
        self.snap_points = Some(points.into_iter().collect());
        self.even_snaps = false;
        self
    }

    /// Snap to every step boundary
    pub fn even_snaps(mut self) -> Self {
        self.snap_points = None;
        self.even_snaps = true;
        self
    }

    pub fn build(self) -> Result<ScrollStepMapper> {
        if self.steps < 1 {
            return Err(DriftError::InvalidStepCount(self.steps));
        }

        let snap_points = match (self.snap_points, self.even_snaps) {
            (Some(points), _) => Some(SnapPoints::new(points)?),
            (None, true) => Some(SnapPoints::even(self.steps)?),
            (None, false) => None,
        };

        Ok(ScrollStepMapper {
            step_count: self.steps,
            snap_points,
            last: map_progress(self.steps, 0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_steps() {
        assert_eq!(
            ScrollStepMapper::new(0).unwrap_err(),
            DriftError::InvalidStepCount(0)
        );
        assert!(ScrollStepMapper::builder().build().is_err());
    }

    #[test]
    fn test_four_step_examples() {
        let mut mapper = ScrollStepMapper::new(4).unwrap();

        let s = mapper.update(0.0);
        assert_eq!(s.active_index, 0);
        assert_eq!(s.local_progress, 0.0);

        let s = mapper.update(0.3);
        assert_eq!(s.active_index, 1);
        assert!((s.local_progress - 0.2).abs() < 1e-4);

        let s = mapper.update(0.99);
        assert_eq!(s.active_index, 3);
        assert!((s.local_progress - 0.96).abs() < 1e-4);

        let s = mapper.update(1.0);
        assert_eq!(s.active_index, 3);
        assert_eq!(s.local_progress, 1.0);
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let mapper = ScrollStepMapper::new(4).unwrap();

        let s = mapper.map(0.25).unwrap();
        assert_eq!(s.active_index, 1);
        assert_eq!(s.local_progress, 0.0);

        let s = mapper.map(0.5).unwrap();
        assert_eq!(s.active_index, 2);

        let s = mapper.map(0.249).unwrap();
        assert_eq!(s.active_index, 0);
    }

    #[test]
    fn test_index_always_in_range() {
        for steps in 1..=12 {
            let mapper = ScrollStepMapper::new(steps).unwrap();
            for i in 0..=1000 {
                let s = mapper.map(i as f32 / 1000.0).unwrap();
                assert!(s.active_index < steps);
                assert!((0.0..=1.0).contains(&s.local_progress));
            }
            let end = mapper.map(1.0).unwrap();
            assert_eq!(end.active_index, steps - 1);
            assert_eq!(end.local_progress, 1.0);
        }
    }

    #[test]
    fn test_index_monotonic_in_progress() {
        for steps in [1, 3, 4, 7, 10] {
            let mapper = ScrollStepMapper::new(steps).unwrap();
            let mut prev = 0;
            for i in 0..=2000 {
                let s = mapper.map(i as f32 / 2000.0).unwrap();
                assert!(s.active_index >= prev);
                prev = s.active_index;
            }
        }
    }

    #[test]
    fn test_single_step() {
        let mapper = ScrollStepMapper::new(1).unwrap();
        let s = mapper.map(0.4).unwrap();
        assert_eq!(s.active_index, 0);
        assert!((s.local_progress - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let mapper = ScrollStepMapper::new(4).unwrap();

        let s = mapper.map(-0.5).unwrap();
        assert_eq!(s.active_index, 0);
        assert_eq!(s.progress, 0.0);

        let s = mapper.map(3.0).unwrap();
        assert_eq!(s.active_index, 3);
        assert_eq!(s.local_progress, 1.0);
    }

    #[test]
    fn test_non_finite_keeps_previous_state() {
        let mut mapper = ScrollStepMapper::new(4).unwrap();
        let before = mapper.update(0.6);

        assert_eq!(mapper.update(f32::NAN), before);
        assert_eq!(mapper.update(f32::INFINITY), before);
        assert_eq!(mapper.update(f32::NEG_INFINITY), before);
        assert_eq!(mapper.state(), before);
        assert!(mapper.map(f32::NAN).is_none());
    }

    #[test]
    fn test_state_helpers() {
        let mapper = ScrollStepMapper::new(4).unwrap();
        let s = mapper.map(0.55).unwrap();

        assert!(s.is_active(2));
        assert!(s.is_past(0));
        assert!(s.is_future(3));
        assert_eq!(s.depth(0), -2);
        assert_eq!(s.depth(3), 1);
        assert!((s.completion() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_snap_configuration() {
        let mapper = ScrollStepMapper::new(4).unwrap();
        assert_eq!(mapper.nearest_snap(0.3), None);

        let mapper = ScrollStepMapper::builder()
            .steps(4)
            .even_snaps()
            .build()
            .unwrap();
        assert_eq!(mapper.nearest_snap(0.3), Some(0.25));
        assert_eq!(mapper.nearest_snap(0.4), Some(0.5));

        let mapper = ScrollStepMapper::builder()
            .steps(2)
            .snap_points([0.0, 0.8, 1.0])
            .build()
            .unwrap();
        assert_eq!(mapper.nearest_snap(0.5), Some(0.8));
        // Snapping never changes the index arithmetic
        assert_eq!(mapper.map(0.5).unwrap().active_index, 1);

        let err = ScrollStepMapper::builder()
            .steps(2)
            .snap_points([0.2, 1.0])
            .build();
        assert!(matches!(err, Err(DriftError::InvalidSnapPoints(_))));
    }
}
