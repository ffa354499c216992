//! Per-view composition of the motion units
//!
//! A [`Stage`] is what a host view owns: one step mapper for its
//! scroll-linked region, one pointer follower, the hover registry the
//! follower tests against, and a frame loop for extra per-frame work.
//! Input events may arrive any number of times between frames; each
//! [`Stage::frame`] first applies everything received since the previous
//! frame (latest value wins) and then computes the frame's output.

use drift_core::{ActivationGate, Point};

use crate::cards::{CardPose, CardStack};
use crate::follower::PointerFollower;
use crate::frame::FrameLoop;
use crate::hover::HoverRegistry;
use crate::region::ScrollRegion;
use crate::step::{ScrollStepMapper, StepState};

/// Raw input from the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerEnter,
    PointerLeave,
    /// Region geometry after a scroll or resize
    Scroll {
        region: ScrollRegion,
        viewport_height: f32,
    },
    /// The region was reported outside the viewport
    RegionLeave,
}

/// Derived state for one rendered frame
#[derive(Clone, Debug, PartialEq)]
pub struct StageFrame {
    pub step: StepState,
    /// Whether the scroll region is in view
    pub scroll_active: bool,
    pub cards: Vec<CardPose>,
    /// Tracked pointer positions in registration order
    pub cursor: Vec<(String, Point)>,
    pub cursor_visible: bool,
    pub hovering: bool,
}

pub struct Stage {
    mapper: ScrollStepMapper,
    follower: PointerFollower,
    hover: HoverRegistry,
    cards: CardStack,
    frames: FrameLoop,
    region_gate: ActivationGate,
    pending_scroll: Option<(ScrollRegion, f32)>,
    torn_down: bool,
}

impl Stage {
    pub fn new(mapper: ScrollStepMapper, follower: PointerFollower) -> Self {
        Self {
            mapper,
            follower,
            hover: HoverRegistry::new(),
            cards: CardStack::default(),
            frames: FrameLoop::new(),
            region_gate: ActivationGate::new(),
            pending_scroll: None,
            torn_down: false,
        }
    }

    pub fn with_card_stack(mut self, cards: CardStack) -> Self {
        self.cards = cards;
        self
    }

    /// Receive one input event
    ///
    /// Ignored after [`teardown`](Self::teardown).
    pub fn dispatch(&mut self, event: InputEvent) {
        if self.torn_down {
            return;
        }

        match event {
            InputEvent::PointerMove { x, y } => self.follower.set_target(x, y),
            InputEvent::PointerEnter => self.follower.pointer_enter(),
            InputEvent::PointerLeave => self.follower.pointer_leave(),
            InputEvent::Scroll {
                region,
                viewport_height,
            } => self.pending_scroll = Some((region, viewport_height)),
            InputEvent::RegionLeave => {
                self.pending_scroll = None;
                self.region_gate.deactivate();
            }
        }
    }

    /// Apply pending input and compute the frame
    ///
    /// Returns `None` after teardown.
    pub fn frame(&mut self, dt: f32) -> Option<StageFrame> {
        if self.torn_down {
            return None;
        }

        if let Some((region, viewport_height)) = self.pending_scroll.take() {
            if region.is_in_viewport(viewport_height) {
                self.region_gate.activate();
                self.mapper.update(region.progress(viewport_height));
            } else {
                self.region_gate.deactivate();
            }
        }

        let cursor = self
            .follower
            .tick()
            .iter()
            .map(|(name, p)| (name.to_string(), p))
            .collect();
        let hovering = self.follower.update_hover(&self.hover);
        self.frames.tick(dt);

        let step = self.mapper.state();
        Some(StageFrame {
            step,
            scroll_active: self.region_gate.is_active(),
            cards: self.cards.poses(&step),
            cursor,
            cursor_visible: self.follower.is_visible(),
            hovering,
        })
    }

    /// Stop the frame loop and drop all pending input; idempotent
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        tracing::debug!("Stage: teardown");
        self.torn_down = true;
        self.pending_scroll = None;
        self.frames.stop();
        self.hover.clear();
        self.follower.pointer_leave();
        self.region_gate.deactivate();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn mapper(&self) -> &ScrollStepMapper {
        &self.mapper
    }

    pub fn follower(&self) -> &PointerFollower {
        &self.follower
    }

    pub fn hover_registry(&self) -> &HoverRegistry {
        &self.hover
    }

    pub fn hover_registry_mut(&mut self) -> &mut HoverRegistry {
        &mut self.hover
    }

    pub fn frames_mut(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follower::{CURSOR, TRAIL};
    use drift_core::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn stage() -> Stage {
        Stage::new(
            ScrollStepMapper::new(4).unwrap(),
            PointerFollower::cursor_preset().build().unwrap(),
        )
    }

    fn scroll(top: f32) -> InputEvent {
        InputEvent::Scroll {
            region: ScrollRegion::new(top, 3200.0),
            viewport_height: 800.0,
        }
    }

    fn cursor(frame: &StageFrame, name: &str) -> Point {
        frame
            .cursor
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
            .unwrap()
    }

    #[test]
    fn test_latest_scroll_wins() {
        let mut stage = stage();
        stage.dispatch(scroll(-100.0));
        stage.dispatch(scroll(-2000.0));
        stage.dispatch(scroll(-700.0));

        let frame = stage.frame(0.016).unwrap();
        assert!(frame.scroll_active);
        // 700 / 2400 = 0.2917 -> step 1
        assert_eq!(frame.step.active_index, 1);
        assert_eq!(frame.cards.len(), 4);
        assert_eq!(frame.cards[1].z_index, 50);
    }

    #[test]
    fn test_state_holds_without_input() {
        let mut stage = stage();
        stage.dispatch(scroll(-2000.0));
        let first = stage.frame(0.016).unwrap();
        let second = stage.frame(0.016).unwrap();
        assert_eq!(first.step, second.step);
    }

    #[test]
    fn test_region_leaves_viewport() {
        let mut stage = stage();
        stage.dispatch(scroll(-100.0));
        assert!(stage.frame(0.016).unwrap().scroll_active);

        stage.dispatch(scroll(-5000.0));
        let frame = stage.frame(0.016).unwrap();
        assert!(!frame.scroll_active);

        stage.dispatch(scroll(-100.0));
        assert!(stage.frame(0.016).unwrap().scroll_active);

        stage.dispatch(InputEvent::RegionLeave);
        assert!(!stage.frame(0.016).unwrap().scroll_active);
    }

    #[test]
    fn test_pointer_snaps_then_trails() {
        let mut stage = stage();
        let frame = stage.frame(0.016).unwrap();
        assert!(!frame.cursor_visible);

        stage.dispatch(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        stage.dispatch(InputEvent::PointerMove { x: 50.0, y: 50.0 });
        let frame = stage.frame(0.016).unwrap();
        assert!(frame.cursor_visible);
        assert_eq!(cursor(&frame, CURSOR), Point::new(50.0, 50.0));
        assert_eq!(cursor(&frame, TRAIL), Point::new(50.0, 50.0));

        stage.dispatch(InputEvent::PointerMove { x: 150.0, y: 50.0 });
        let frame = stage.frame(0.016).unwrap();
        assert!((cursor(&frame, CURSOR).x - 130.0).abs() < 1e-3);
        assert!((cursor(&frame, TRAIL).x - 65.0).abs() < 1e-3);
    }

    #[test]
    fn test_leave_then_move_in_same_frame_reactivates() {
        let mut stage = stage();
        stage.dispatch(InputEvent::PointerMove { x: 0.0, y: 0.0 });
        stage.frame(0.016);

        stage.dispatch(InputEvent::PointerLeave);
        stage.dispatch(InputEvent::PointerMove { x: 300.0, y: 300.0 });
        let frame = stage.frame(0.016).unwrap();
        assert!(frame.cursor_visible);
        assert_eq!(cursor(&frame, TRAIL), Point::new(300.0, 300.0));
    }

    #[test]
    fn test_hover_through_registry() {
        let mut stage = stage();
        stage
            .hover_registry_mut()
            .register(Rect::new(0.0, 0.0, 100.0, 100.0));

        stage.dispatch(InputEvent::PointerMove { x: 20.0, y: 20.0 });
        assert!(stage.frame(0.016).unwrap().hovering);

        stage.dispatch(InputEvent::PointerMove { x: 220.0, y: 20.0 });
        assert!(!stage.frame(0.016).unwrap().hovering);
    }

    #[test]
    fn test_teardown_idempotent() {
        let ticks = Rc::new(Cell::new(0));
        let mut stage = stage();
        let t = Rc::clone(&ticks);
        stage
            .frames_mut()
            .subscribe(move |_| t.set(t.get() + 1))
            .unwrap();

        stage.frame(0.016);
        assert_eq!(ticks.get(), 1);

        stage.teardown();
        stage.teardown();
        assert!(stage.is_torn_down());
        assert_eq!(Rc::strong_count(&ticks), 1);
        assert!(stage.hover_registry().is_empty());

        stage.dispatch(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        assert!(stage.frame(0.016).is_none());
        assert!(!stage.follower().is_visible());
        assert_eq!(ticks.get(), 1);
    }
}
