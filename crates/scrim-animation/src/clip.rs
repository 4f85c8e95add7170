//! Core animation data types

use crate::pose::Joint;
use serde::{Deserialize, Serialize};

/// A complete animation clip with per-joint tracks.
///
/// Clips are immutable values shared across fighters via `Arc`; the
/// play-time loop override lives on the player, never on the clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Human-readable name
    pub name: String,
    /// Total duration in milliseconds
    pub duration_ms: f32,
    /// Animated joint tracks
    pub tracks: Vec<Track>,
    /// Whether the clip loops by default
    #[serde(default)]
    pub looped: bool,
}

/// A single animated joint track (e.g. left shoulder over time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Which joint this track drives
    pub joint: Joint,
    /// Interpolation mode between keyframes
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Keyframes sorted by time
    pub keyframes: Vec<Keyframe>,
}

/// A keyframe: a radian value at a point in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in milliseconds from clip start
    pub time: f32,
    /// Joint angle in radians
    pub value: f32,
}

/// How to interpolate between keyframes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Interpolation {
    /// Jump to the previous value (no blending)
    Step,
    /// Linear interpolation
    #[default]
    Linear,
}

impl Track {
    pub fn new(joint: Joint, keyframes: Vec<Keyframe>) -> Self {
        Self {
            joint,
            interpolation: Interpolation::Linear,
            keyframes,
        }
    }
}
