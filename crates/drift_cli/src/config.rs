//! Drift configuration file handling
//!
//! `drift.toml` holds the per-instance timing constants: step counts, snap
//! points, follower speeds, card stack offsets, smooth scroll duration and
//! fade response. Every section is optional and falls back to the defaults
//! of the corresponding `drift_motion` type.

use anyhow::{Context, Result};
use drift_motion::{
    CardStackConfig, Easing, PointerCapability, PointerFollower, ScrollStepMapper,
    ScrollTweenConfig, VelocityFadeConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "drift.toml";

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DriftConfig {
    #[serde(default)]
    pub steps: StepsConfig,
    #[serde(default)]
    pub follower: FollowerConfig,
    #[serde(default)]
    pub cards: CardsConfig,
    #[serde(default)]
    pub smooth_scroll: SmoothScrollConfig,
    #[serde(default)]
    pub fade: FadeConfig,
}

/// Step mapper configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct StepsConfig {
    #[serde(default = "default_step_count")]
    pub count: usize,
    /// Snap at every step boundary
    #[serde(default)]
    pub even_snaps: bool,
    /// Explicit snap points; takes precedence over `even_snaps`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_points: Option<Vec<f32>>,
}

fn default_step_count() -> usize {
    4
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            count: default_step_count(),
            even_snaps: false,
            snap_points: None,
        }
    }
}

impl StepsConfig {
    /// Build a mapper, optionally overriding the configured step count
    pub fn mapper(&self, count: Option<usize>) -> Result<ScrollStepMapper> {
        let mut builder = ScrollStepMapper::builder().steps(count.unwrap_or(self.count));
        if let Some(points) = &self.snap_points {
            builder = builder.snap_points(points.iter().copied());
        } else if self.even_snaps {
            builder = builder.even_snaps();
        }
        builder.build().context("Invalid [steps] configuration")
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityName {
    #[default]
    Fine,
    Coarse,
}

impl From<CapabilityName> for PointerCapability {
    fn from(name: CapabilityName) -> Self {
        match name {
            CapabilityName::Fine => PointerCapability::Fine,
            CapabilityName::Coarse => PointerCapability::Coarse,
        }
    }
}

/// Pointer follower configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct FollowerConfig {
    #[serde(default)]
    pub capability: CapabilityName,
    #[serde(default = "default_points")]
    pub points: Vec<PointConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PointConfig {
    pub name: String,
    pub speed: f32,
}

fn default_points() -> Vec<PointConfig> {
    vec![
        PointConfig {
            name: drift_motion::CURSOR.to_string(),
            speed: 0.8,
        },
        PointConfig {
            name: drift_motion::AURA.to_string(),
            speed: 0.8,
        },
        PointConfig {
            name: drift_motion::TRAIL.to_string(),
            speed: 0.15,
        },
    ]
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            capability: CapabilityName::default(),
            points: default_points(),
        }
    }
}

impl FollowerConfig {
    pub fn follower(&self) -> Result<PointerFollower> {
        let builder = self
            .points
            .iter()
            .fold(PointerFollower::builder(), |b, p| b.point(p.name.clone(), p.speed))
            .capability(self.capability.into());
        builder.build().context("Invalid [follower] configuration")
    }
}

/// Card stack offsets; unset fields keep the library defaults
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CardsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_offset_step: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_scale_step: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_fade_step: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_offset_step: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_scale_step: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_peek_opacity: Option<f32>,
}

impl CardsConfig {
    pub fn to_config(&self) -> CardStackConfig {
        let d = CardStackConfig::default();
        CardStackConfig {
            past_offset: self.past_offset.unwrap_or(d.past_offset),
            past_offset_step: self.past_offset_step.unwrap_or(d.past_offset_step),
            past_scale_step: self.past_scale_step.unwrap_or(d.past_scale_step),
            past_fade_step: self.past_fade_step.unwrap_or(d.past_fade_step),
            future_offset: self.future_offset.unwrap_or(d.future_offset),
            future_offset_step: self.future_offset_step.unwrap_or(d.future_offset_step),
            future_scale: self.future_scale.unwrap_or(d.future_scale),
            future_scale_step: self.future_scale_step.unwrap_or(d.future_scale_step),
            future_peek_opacity: self.future_peek_opacity.unwrap_or(d.future_peek_opacity),
            ..d
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EasingName {
    Linear,
    Smoothstep,
    EaseInOutCubic,
    #[default]
    ExpoOut,
}

impl From<EasingName> for Easing {
    fn from(name: EasingName) -> Self {
        match name {
            EasingName::Linear => Easing::Linear,
            EasingName::Smoothstep => Easing::Smoothstep,
            EasingName::EaseInOutCubic => Easing::EaseInOutCubic,
            EasingName::ExpoOut => Easing::ExpoOut,
        }
    }
}

/// Smooth scroll driver configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct SmoothScrollConfig {
    /// Seconds to reach a new target
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub easing: EasingName,
}

fn default_duration() -> f32 {
    1.2
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            easing: EasingName::default(),
        }
    }
}

impl SmoothScrollConfig {
    pub fn to_config(&self) -> ScrollTweenConfig {
        ScrollTweenConfig {
            duration: self.duration,
            easing: self.easing.into(),
        }
    }
}

/// Velocity fade configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FadeConfig {
    pub threshold: f32,
    pub blur_per_velocity: f32,
    pub max_blur: f32,
    pub fade_per_velocity: f32,
    pub max_fade: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        let d = VelocityFadeConfig::default();
        Self {
            threshold: d.threshold,
            blur_per_velocity: d.blur_per_velocity,
            max_blur: d.max_blur,
            fade_per_velocity: d.fade_per_velocity,
            max_fade: d.max_fade,
        }
    }
}

impl FadeConfig {
    pub fn to_config(&self) -> VelocityFadeConfig {
        VelocityFadeConfig {
            threshold: self.threshold,
            blur_per_velocity: self.blur_per_velocity,
            max_blur: self.max_blur,
            fade_per_velocity: self.fade_per_velocity,
            max_fade: self.max_fade,
        }
    }
}

impl DriftConfig {
    /// Load `drift.toml` from a directory, or defaults if there is none
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!(
                "No {} in {}, using defaults",
                CONFIG_FILE,
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
