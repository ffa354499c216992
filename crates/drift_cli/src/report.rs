//! Simulation runs and their printable rows

use anyhow::Result;
use drift_core::Point;
use drift_motion::{
    CardStack, PointerFollower, ScrollStepMapper, ScrollTween, StepState, VelocityFade,
};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct StepRow {
    pub progress: f32,
    pub active_index: usize,
    pub local_progress: f32,
    pub completion: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_snap: Option<f32>,
}

/// Sample the mapper at `samples` evenly spaced progress values from 0 to 1
pub fn step_rows(mapper: &mut ScrollStepMapper, samples: usize) -> Vec<StepRow> {
    let samples = samples.max(2);
    (0..samples)
        .map(|i| {
            let progress = i as f32 / (samples - 1) as f32;
            let state = mapper.update(progress);
            StepRow {
                progress,
                active_index: state.active_index,
                local_progress: state.local_progress,
                completion: state.completion(),
                nearest_snap: mapper.nearest_snap(progress),
            }
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FollowRow {
    pub tick: u32,
    pub point: String,
    pub x: f32,
    pub y: f32,
    /// Remaining distance to the target
    pub distance: f32,
}

/// Activate at `from`, retarget to `to`, then tick `ticks` times
pub fn follow_rows(
    follower: &mut PointerFollower,
    from: Point,
    to: Point,
    ticks: u32,
) -> Vec<FollowRow> {
    follower.set_target(from.x, from.y);
    follower.tick();
    follower.set_target(to.x, to.y);

    let mut rows = Vec::new();
    for tick in 1..=ticks {
        for (name, p) in follower.tick().iter() {
            rows.push(FollowRow {
                tick,
                point: name.to_string(),
                x: p.x,
                y: p.y,
                distance: p.distance(&to),
            });
        }
    }
    rows
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SettleRow {
    pub point: String,
    pub speed: f32,
    pub ticks: u32,
}

pub fn settle_rows(points: &[(String, f32)], tolerance: f32) -> Result<Vec<SettleRow>> {
    points
        .iter()
        .map(|(name, speed)| {
            Ok(SettleRow {
                point: name.clone(),
                speed: *speed,
                ticks: drift_motion::settle_ticks(*speed, tolerance)?,
            })
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CardRow {
    pub index: usize,
    pub active: bool,
    pub translate_y: f32,
    pub scale: f32,
    pub opacity: f32,
    pub z_index: i32,
}

pub fn card_rows(stack: &CardStack, state: &StepState) -> Vec<CardRow> {
    stack
        .poses(state)
        .into_iter()
        .enumerate()
        .map(|(index, pose)| CardRow {
            index,
            active: state.is_active(index),
            translate_y: pose.translate_y,
            scale: pose.scale,
            opacity: pose.opacity,
            z_index: pose.z_index,
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ScrollRow {
    pub tick: u32,
    pub position: f32,
    pub velocity: f32,
    pub blur: f32,
    pub opacity: f32,
}

/// Ease from the tween's position to `to`, one row per tick, stopping once settled
pub fn scroll_rows(
    tween: &mut ScrollTween,
    fade: &VelocityFade,
    to: f32,
    ticks: u32,
    dt: f32,
) -> Vec<ScrollRow> {
    tween.scroll_to(to);

    let mut rows = Vec::new();
    for tick in 1..=ticks {
        if !tween.is_animating() {
            break;
        }
        let position = tween.tick(dt);
        let sample = fade.sample(tween.velocity());
        rows.push(ScrollRow {
            tick,
            position,
            velocity: tween.velocity(),
            blur: sample.blur,
            opacity: sample.opacity,
        });
    }
    rows
}
