//! Stacked card poses for step-driven reveals
//!
//! The active card sits centered on top. Cards already passed slide up,
//! shrink and fade out; upcoming cards wait below with only the next one
//! peeking through.

use crate::step::StepState;

/// Tunable offsets and factors for [`CardStack`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStackConfig {
    /// Vertical offset of the first past card
    pub past_offset: f32,
    /// Additional offset per step of depth for past cards
    pub past_offset_step: f32,
    /// Scale lost per step of depth for past cards
    pub past_scale_step: f32,
    /// Opacity lost per step of depth for past cards
    pub past_fade_step: f32,
    /// Stacking order of a depth-0 past card
    pub past_z_base: i32,
    /// Vertical offset of the first future card
    pub future_offset: f32,
    pub future_offset_step: f32,
    /// Scale of a depth-0 future card
    pub future_scale: f32,
    pub future_scale_step: f32,
    /// Opacity of the card directly after the active one
    pub future_peek_opacity: f32,
    pub future_z_base: i32,
    pub active_z: i32,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            past_offset: -80.0,
            past_offset_step: -20.0,
            past_scale_step: 0.05,
            past_fade_step: 0.5,
            past_z_base: 10,
            future_offset: 100.0,
            future_offset_step: 30.0,
            future_scale: 0.9,
            future_scale_step: 0.02,
            future_peek_opacity: 0.3,
            future_z_base: 5,
            active_z: 50,
        }
    }
}

/// Visual transform of one card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub translate_y: f32,
    pub scale: f32,
    pub opacity: f32,
    pub z_index: i32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CardStack {
    config: CardStackConfig,
}

impl CardStack {
    pub fn new(config: CardStackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CardStackConfig {
        &self.config
    }

    pub fn pose(&self, index: usize, state: &StepState) -> CardPose {
        let c = &self.config;
        let depth = state.depth(index);

        match depth {
            0 => CardPose {
                translate_y: 0.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: c.active_z,
            },
            d if d < 0 => {
                let d = d.unsigned_abs() as f32;
                CardPose {
                    translate_y: c.past_offset + d * c.past_offset_step,
                    scale: (1.0 - d * c.past_scale_step).max(0.0),
                    opacity: (1.0 - d * c.past_fade_step).max(0.0),
                    z_index: c.past_z_base - d as i32,
                }
            }
            d => {
                let peek = d == 1;
                let d = d as f32;
                CardPose {
                    translate_y: c.future_offset + d * c.future_offset_step,
                    scale: (c.future_scale - d * c.future_scale_step).max(0.0),
                    opacity: if peek { c.future_peek_opacity } else { 0.0 },
                    z_index: c.future_z_base - d as i32,
                }
            }
        }
    }

    /// Poses for every card of the state's step count, in index order
    pub fn poses(&self, state: &StepState) -> Vec<CardPose> {
        (0..state.step_count).map(|i| self.pose(i, state)).collect()
    }
}
