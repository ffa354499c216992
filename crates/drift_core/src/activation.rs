//! Visibility gating state machine
//!
//! Followers and mappers only update while their host surface is live:
//!
//! ```text
//!              INPUT
//!   Inactive ─────────► Active
//!      ▲                  │
//!      └──────────────────┘
//!            INPUT_END
//! ```
//!
//! The machine has no terminal state. Every `Inactive -> Active` edge arms
//! a one-shot activation flag that consumers use to snap stale output
//! straight to the newest input instead of easing toward it.

use std::hash::Hash;

/// Activation event identifiers
pub mod events {
    /// Raw input arrived (pointer move/enter, region scrolled into view)
    pub const INPUT: u32 = 1;
    /// Input ended (pointer left the surface, region left the viewport)
    pub const INPUT_END: u32 = 2;
}

/// Trait for state types driven by numeric events
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Whether a unit is currently receiving input and producing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Activation {
    /// Not updating; the host does not render output
    #[default]
    Inactive,
    /// Updating every tick
    Active,
}

impl Activation {
    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Active)
    }
}

impl StateTransitions for Activation {
    fn on_event(&self, event: u32) -> Option<Self> {
        use events::*;

        match (self, event) {
            (Activation::Inactive, INPUT) => Some(Activation::Active),
            (Activation::Active, INPUT_END) => Some(Activation::Inactive),
            _ => None,
        }
    }
}

/// An `Activation` state plus its one-shot activation flag
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationGate {
    state: Activation,
    pending_activation: bool,
}

impl ActivationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Activation {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Feed an event, returning the new state if a transition happened
    pub fn dispatch(&mut self, event: u32) -> Option<Activation> {
        let next = self.state.on_event(event)?;
        tracing::debug!("ActivationGate: {:?} -> {:?}", self.state, next);

        match next {
            Activation::Active => self.pending_activation = true,
            // Never snap on a later activation using a flag armed by an earlier one
            Activation::Inactive => self.pending_activation = false,
        }
        self.state = next;
        Some(next)
    }

    /// Shorthand for `dispatch(events::INPUT)`
    pub fn activate(&mut self) -> Option<Activation> {
        self.dispatch(events::INPUT)
    }

    /// Shorthand for `dispatch(events::INPUT_END)`
    pub fn deactivate(&mut self) -> Option<Activation> {
        self.dispatch(events::INPUT_END)
    }

    /// Consume the activation flag
    ///
    /// Returns true exactly once after each `Inactive -> Active` transition.
    pub fn take_activation(&mut self) -> bool {
        std::mem::take(&mut self.pending_activation)
    }
}

#[cfg(test)]
mod tests {
    use super::events::*;
    use super::*;

    #[test]
    fn test_activation_transitions() {
        assert_eq!(
            Activation::Inactive.on_event(INPUT),
            Some(Activation::Active)
        );
        assert_eq!(
            Activation::Active.on_event(INPUT_END),
            Some(Activation::Inactive)
        );
        assert_eq!(Activation::Active.on_event(INPUT), None);
        assert_eq!(Activation::Inactive.on_event(INPUT_END), None);
        assert_eq!(Activation::Inactive.on_event(999), None);
    }

    #[test]
    fn test_gate_one_shot_flag() {
        let mut gate = ActivationGate::new();
        assert!(!gate.is_active());
        assert!(!gate.take_activation());

        assert_eq!(gate.activate(), Some(Activation::Active));
        // Repeated input while active does not re-arm
        assert_eq!(gate.activate(), None);

        assert!(gate.take_activation());
        assert!(!gate.take_activation());
    }

    #[test]
    fn test_gate_cycles() {
        let mut gate = ActivationGate::new();

        for _ in 0..3 {
            gate.activate();
            assert!(gate.is_active());
            assert!(gate.take_activation());

            gate.deactivate();
            assert_eq!(gate.state(), Activation::Inactive);
            assert!(!gate.take_activation());
        }
    }

    #[test]
    fn test_gate_deactivate_clears_unconsumed_flag() {
        let mut gate = ActivationGate::new();
        gate.activate();
        gate.deactivate();
        assert!(!gate.take_activation());
    }
}
