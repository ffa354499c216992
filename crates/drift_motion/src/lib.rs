//! Drift Motion
//!
//! Scroll-linked and pointer-following motion for presentation hosts.
//!
//! # Features
//!
//! - **Step Mapping**: Continuous scroll progress to "card N of M" plus intra-step progress
//! - **Snap Points**: Advisory resting positions for an easing driver
//! - **Pointer Following**: Named points that trail the pointer with exponential decay
//! - **Hover Registry**: Host-owned hover targets instead of implicit document scans
//! - **Scroll Effects**: Region progress, stacked card poses, velocity blur, smooth scroll
//! - **Frame Loop**: Host-ticked subscriptions with idempotent teardown
//! - **Stage**: Per-view composition with coalesced per-frame input
//!
//! Everything runs on the host's thread. Configuration is validated when a
//! unit is built; per-frame calls never fail and drop non-finite input.
//!
//! # Example
//!
//! ```rust
//! use drift_motion::{InputEvent, PointerFollower, ScrollRegion, ScrollStepMapper, Stage};
//!
//! let mapper = ScrollStepMapper::new(4).unwrap();
//! let follower = PointerFollower::cursor_preset().build().unwrap();
//! let mut stage = Stage::new(mapper, follower);
//!
//! stage.dispatch(InputEvent::Scroll {
//!     region: ScrollRegion::new(-1200.0, 3200.0),
//!     viewport_height: 800.0,
//! });
//! stage.dispatch(InputEvent::PointerMove { x: 40.0, y: 60.0 });
//!
//! let frame = stage.frame(1.0 / 60.0).unwrap();
//! assert_eq!(frame.step.active_index, 2);
//! assert!(frame.cursor_visible);
//! ```

pub mod cards;
pub mod easing;
pub mod fade;
pub mod follower;
pub mod frame;
pub mod hover;
pub mod region;
pub mod snap;
pub mod stage;
pub mod step;
pub mod tween;

pub use cards::{CardPose, CardStack, CardStackConfig};
pub use easing::Easing;
pub use fade::{FadeSample, VelocityFade, VelocityFadeConfig};
pub use follower::{
    settle_ticks, PointerCapability, PointerFollower, PointerFollowerBuilder, Positions, AURA,
    CURSOR, TRAIL,
};
pub use frame::{FrameLoop, SubscriptionId, TickCallback};
pub use hover::{HoverId, HoverRegistry};
pub use region::ScrollRegion;
pub use snap::SnapPoints;
pub use stage::{InputEvent, Stage, StageFrame};
pub use step::{ScrollStepMapper, ScrollStepMapperBuilder, StepState};
pub use tween::{ScrollTween, ScrollTweenConfig};

pub use drift_core::{DriftError, Point, Rect, Result};
