//! Smoothed pointer following
//!
//! A [`PointerFollower`] keeps one or more named points that chase the
//! latest pointer position with per-point exponential decay:
//!
//! ```text
//! current += (target - current) * speed      // once per tick
//! ```
//!
//! Pointer events only record the target; all smoothing happens in
//! [`tick`](PointerFollower::tick), so any number of moves between two
//! frames coalesce into the most recent one. On every `Inactive -> Active`
//! transition the first tick snaps each point straight to the target so the
//! visuals never fly in from a stale position.

use drift_core::{ActivationGate, DriftError, Interpolate, Point, Result};
use indexmap::IndexMap;

use crate::hover::HoverRegistry;

/// Whether the input device supports continuous pointer tracking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerCapability {
    /// Mouse or trackpad; the follower runs
    #[default]
    Fine,
    /// Touch-only; the follower never activates
    Coarse,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    current: Point,
    speed: f32,
}

/// Named points trailing a pointer target
#[derive(Clone, Debug)]
pub struct PointerFollower {
    target: Option<Point>,
    points: IndexMap<String, Tracked>,
    gate: ActivationGate,
    capability: PointerCapability,
    hovering: bool,
}

impl PointerFollower {
    pub fn builder() -> PointerFollowerBuilder {
        PointerFollowerBuilder::default()
    }

    /// Builder preloaded with a near-instant `cursor` dot, a glow `aura`
    /// riding with it, and a lagging `trail`
    pub fn cursor_preset() -> PointerFollowerBuilder {
        Self::builder()
            .point(CURSOR, 0.8)
            .point(AURA, 0.8)
            .point(TRAIL, 0.15)
            .initial(Point::new(-100.0, -100.0))
    }

    /// Record the newest pointer position
    ///
    /// The first position after construction or after [`pointer_leave`]
    /// activates the follower. Non-finite coordinates are ignored.
    ///
    /// [`pointer_leave`]: Self::pointer_leave
    pub fn set_target(&mut self, x: f32, y: f32) {
        let target = Point::new(x, y);
        if !target.is_finite() {
            tracing::trace!("PointerFollower: dropped non-finite target {:?}", target);
            return;
        }
        self.target = Some(target);

        if self.capability == PointerCapability::Fine {
            self.gate.activate();
        }
    }

    /// Pointer re-entered the tracked surface
    ///
    /// Activates only once a target is known. Leaving forgets the target,
    /// so after a leave the next `set_target` activates and snaps.
    pub fn pointer_enter(&mut self) {
        if self.target.is_some() && self.capability == PointerCapability::Fine {
            self.gate.activate();
        }
    }

    /// Pointer left the tracked surface
    pub fn pointer_leave(&mut self) {
        self.gate.deactivate();
        self.target = None;
        self.hovering = false;
    }

    /// Advance every tracked point one step toward the target
    ///
    /// While inactive the points hold still.
    pub fn tick(&mut self) -> Positions<'_> {
        if let (true, Some(target)) = (self.gate.is_active(), self.target) {
            if self.gate.take_activation() {
                for tracked in self.points.values_mut() {
                    tracked.current = target;
                }
            } else {
                for tracked in self.points.values_mut() {
                    tracked.current = tracked.current.lerp(&target, tracked.speed);
                }
            }
        }

        Positions {
            points: &self.points,
        }
    }

    /// Recompute hover state against the host's registry
    pub fn update_hover(&mut self, registry: &HoverRegistry) -> bool {
        self.hovering = match self.target {
            Some(target) if self.gate.is_active() => registry.hit_test(target).is_some(),
            _ => false,
        };
        self.hovering
    }

    /// Current positions without advancing
    pub fn positions(&self) -> Positions<'_> {
        Positions {
            points: &self.points,
        }
    }

    pub fn position(&self, name: &str) -> Option<Point> {
        self.points.get(name).map(|t| t.current)
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Whether the host should render the follower
    pub fn is_visible(&self) -> bool {
        self.gate.is_active()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn capability(&self) -> PointerCapability {
        self.capability
    }

    pub fn speed(&self, name: &str) -> Option<f32> {
        self.points.get(name).map(|t| t.speed)
    }

    /// Change one point's speed
    pub fn set_speed(&mut self, name: &str, speed: f32) -> Result<()> {
        validate_speed(name, speed)?;
        let tracked = self
            .points
            .get_mut(name)
            .ok_or_else(|| DriftError::UnknownPoint(name.to_string()))?;
        tracked.speed = speed;
        Ok(())
    }
}

/// Name of the fast point in [`PointerFollower::cursor_preset`]
pub const CURSOR: &str = "cursor";
/// Name of the glow point in [`PointerFollower::cursor_preset`]
pub const AURA: &str = "aura";
/// Name of the slow point in [`PointerFollower::cursor_preset`]
pub const TRAIL: &str = "trail";

/// Borrowed view of tracked positions, in registration order
#[derive(Clone, Copy, Debug)]
pub struct Positions<'a> {
    points: &'a IndexMap<String, Tracked>,
}

impl<'a> Positions<'a> {
    pub fn get(&self, name: &str) -> Option<Point> {
        self.points.get(name).map(|t| t.current)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Point)> + 'a {
        self.points.iter().map(|(name, t)| (name.as_str(), t.current))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builder for [`PointerFollower`]
#[derive(Clone, Debug, Default)]
pub struct PointerFollowerBuilder {
    points: Vec<(String, f32)>,
    initial: Point,
    capability: PointerCapability,
}

impl PointerFollowerBuilder {
    /// Track a named point with interpolation factor `speed` in (0, 1]
    pub fn point(mut self, name: impl Into<String>, speed: f32) -> Self {
        self.points.push((name.into(), speed));
        self
    }

    /// Starting position for every point
    pub fn initial(mut self, position: Point) -> Self {
        self.initial = position;
        self
    }

    pub fn capability(mut self, capability: PointerCapability) -> Self {
        self.capability = capability;
        self
    }

    pub fn build(self) -> Result<PointerFollower> {
        if !self.initial.is_finite() {
            return Err(DriftError::NonFinite("initial position"));
        }

        let mut points = IndexMap::with_capacity(self.points.len());
        for (name, speed) in self.points {
            validate_speed(&name, speed)?;
            if points.contains_key(&name) {
                return Err(DriftError::DuplicatePoint(name));
            }
            points.insert(
                name,
                Tracked {
                    current: self.initial,
                    speed,
                },
            );
        }

        Ok(PointerFollower {
            target: None,
            points,
            gate: ActivationGate::new(),
            capability: self.capability,
            hovering: false,
        })
    }
}

fn validate_speed(name: &str, speed: f32) -> Result<()> {
    if speed > 0.0 && speed <= 1.0 {
        Ok(())
    } else {
        Err(DriftError::InvalidSpeed {
            name: name.to_string(),
            speed,
        })
    }
}

/// Ticks needed for exponential decay at `speed` to close all but `tolerance` of a gap
///
/// `ceil(ln(tolerance) / ln(1 - speed))`; zero when `speed == 1`. For
/// example `settle_ticks(0.15, 0.05)` is 19.
pub fn settle_ticks(speed: f32, tolerance: f32) -> Result<u32> {
    validate_speed("settle", speed)?;
    if !(tolerance > 0.0 && tolerance < 1.0) {
        return Err(DriftError::InvalidConfig(format!(
            "settle tolerance must be in (0, 1), got {}",
            tolerance
        )));
    }
    if speed >= 1.0 {
        return Ok(0);
    }

    let decay = (1.0 - f64::from(speed)).ln();
    if decay == 0.0 {
        return Err(DriftError::InvalidConfig(format!(
            "settle speed {} is too small to converge",
            speed
        )));
    }
    let ticks = (f64::from(tolerance).ln() / decay).ceil();
    if ticks > f64::from(u32::MAX) {
        return Err(DriftError::InvalidConfig(format!(
            "settle speed {} needs more than {} ticks",
            speed,
            u32::MAX
        )));
    }
    Ok(ticks as u32)
}
