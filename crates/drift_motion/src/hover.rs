//! Host-owned registry of hoverable surfaces
//!
//! The host registers bounds for every element that should put the cursor
//! into its hover state and keeps them current as layout changes. Targets
//! registered with [`HoverRegistry::register_default`] occlude the targets
//! beneath them but never report hovering themselves.

use drift_core::{Point, Rect};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered hover target
    pub struct HoverId;
}

#[derive(Clone, Copy, Debug)]
struct HoverTarget {
    bounds: Rect,
    hoverable: bool,
    order: u64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverRegistry {
    targets: SlotMap<HoverId, HoverTarget>,
    next_order: u64,
}

impl HoverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hoverable target
    pub fn register(&mut self, bounds: Rect) -> HoverId {
        self.insert(bounds, true)
    }

    /// Register a target that keeps the default cursor
    pub fn register_default(&mut self, bounds: Rect) -> HoverId {
        self.insert(bounds, false)
    }

    fn insert(&mut self, bounds: Rect, hoverable: bool) -> HoverId {
        let order = self.next_order;
        self.next_order += 1;
        self.targets.insert(HoverTarget {
            bounds,
            hoverable,
            order,
        })
    }

    /// Remove a target, returning false if it was already gone
    pub fn unregister(&mut self, id: HoverId) -> bool {
        if self.targets.remove(id).is_none() {
            tracing::warn!("HoverRegistry: unregister of unknown target {:?}", id);
            return false;
        }
        true
    }

    /// Update a target's bounds after layout
    pub fn set_bounds(&mut self, id: HoverId, bounds: Rect) -> bool {
        match self.targets.get_mut(id) {
            Some(target) => {
                target.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn bounds(&self, id: HoverId) -> Option<Rect> {
        self.targets.get(id).map(|t| t.bounds)
    }

    /// The topmost hoverable target under `point`
    ///
    /// Later registrations stack above earlier ones. Returns `None` when the
    /// topmost target under the point keeps the default cursor.
    pub fn hit_test(&self, point: Point) -> Option<HoverId> {
        self.targets
            .iter()
            .filter(|(_, t)| t.bounds.contains(point))
            .max_by_key(|(_, t)| t.order)
            .filter(|(_, t)| t.hoverable)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }
}
