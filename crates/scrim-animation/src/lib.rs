//! Scrim Animation - procedural and keyframe animation
//!
//! Provides the animation building blocks for a stick fighter:
//! - `AnimationClip` / `Track` — immutable keyframe data, shared via `Arc`
//! - `sample_track` — pure keyframe evaluation
//! - `ClipPlayer` — per-fighter playback with cross-clip blending
//! - `Pose` / `JointAngles` — fixed-size joint-angle poses
//! - `Skeleton` — indexed bone arena with a single FK pass
//! - `solve_two_bone` — leg IK with mandatory reach clamping

pub mod clip;
pub mod clips;
pub mod ik;
pub mod player;
pub mod pose;
pub mod sampler;
pub mod skeleton;

pub use clip::{AnimationClip, Interpolation, Keyframe, Track};
pub use clips::{idle_clip, walk_clip};
pub use ik::{solve_two_bone, IkSolution};
pub use player::{ClipPlayer, PlayOptions, PlayerOutput};
pub use pose::{Joint, JointAngles, Pose};
pub use sampler::sample_track;
pub use skeleton::{BoneId, Skeleton};
