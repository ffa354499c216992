//! Drift Core
//!
//! Shared primitives for the Drift scroll and pointer motion units:
//!
//! - **Geometry**: `Point` and `Rect` in host coordinates
//! - **Interpolation**: the `Interpolate` trait used by smoothed values
//! - **Activation**: the two-state `Inactive`/`Active` machine that gates updates
//! - **Errors**: `DriftError`, raised only at construction/configuration time
//!
//! # Example
//!
//! ```rust
//! use drift_core::{Activation, Interpolate, Point, StateTransitions};
//!
//! let a = Point::new(0.0, 0.0);
//! let b = Point::new(100.0, 50.0);
//! assert_eq!(a.lerp(&b, 0.5), Point::new(50.0, 25.0));
//!
//! let state = Activation::Inactive;
//! assert_eq!(
//!     state.on_event(drift_core::activation::events::INPUT),
//!     Some(Activation::Active)
//! );
//! ```

pub mod activation;
pub mod error;
pub mod geometry;

pub use activation::{Activation, ActivationGate, StateTransitions};
pub use error::{DriftError, Result};
pub use geometry::{Interpolate, Point, Rect};
