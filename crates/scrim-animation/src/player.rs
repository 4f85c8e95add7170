//! Per-fighter animation clip playback with cross-clip blending

use crate::clip::AnimationClip;
use crate::pose::Pose;
use crate::sampler::sample_track;
use std::sync::Arc;

/// Options for starting clip playback.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Override the clip's default loop flag. Stored on the player so
    /// the shared clip is never mutated.
    pub loop_override: Option<bool>,
    /// Blend from the last produced pose over this many milliseconds.
    pub blend_ms: Option<f32>,
}

/// Result of one playback update.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerOutput {
    /// The pose for this frame (empty when nothing is playing).
    pub pose: Pose,
    /// True exactly once: on the update that reached the end of a
    /// non-looping clip.
    pub finished: bool,
}

/// Playback state for one fighter.
///
/// Holds a shared reference to the current clip, the playback time, and
/// the cross-clip blend state (a snapshot of the last produced pose,
/// interpolated toward the freshly sampled pose).
#[derive(Debug, Clone, Default)]
pub struct ClipPlayer {
    clip: Option<Arc<AnimationClip>>,
    time: f32,
    playing: bool,
    looping: bool,
    blend_active: bool,
    blend_elapsed: f32,
    blend_duration: f32,
    initial_pose: Pose,
    latest_pose: Pose,
}

impl ClipPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing a clip from time 0.
    pub fn play(&mut self, clip: Arc<AnimationClip>, opts: PlayOptions) {
        if let Some(blend_ms) = opts.blend_ms {
            if blend_ms > 0.0 {
                self.blend_active = true;
                self.blend_elapsed = 0.0;
                self.blend_duration = blend_ms;
                self.initial_pose = self.latest_pose;
            }
        }
        self.looping = opts.loop_override.unwrap_or(clip.looped);
        self.clip = Some(clip);
        self.time = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn clip_name(&self) -> Option<&str> {
        self.clip.as_deref().map(|c| c.name.as_str())
    }

    /// Advance playback and produce this frame's pose.
    ///
    /// Looping clips wrap by modulo; non-looping clips clamp to the end,
    /// stop, and report `finished` on that update only.
    pub fn update(&mut self, delta_ms: f32) -> PlayerOutput {
        let clip = match (&self.clip, self.playing) {
            (Some(clip), true) => Arc::clone(clip),
            _ => return PlayerOutput::default(),
        };

        let mut finished = false;
        self.time += delta_ms;
        if self.time > clip.duration_ms {
            if self.looping {
                self.time %= clip.duration_ms;
            } else {
                self.time = clip.duration_ms;
                self.playing = false;
                finished = true;
            }
        }

        let mut pose_to = Pose::empty();
        for track in &clip.tracks {
            if let Some(value) = sample_track(track, self.time) {
                pose_to.set(track.joint, value);
            }
        }

        let pose = self.blend_pose(pose_to, delta_ms);
        self.latest_pose = pose;
        PlayerOutput { pose, finished }
    }

    /// Interpolate between the captured blend-source pose and the freshly
    /// sampled pose. The blend deactivates only once the factor hits 1.
    fn blend_pose(&mut self, pose_to: Pose, delta_ms: f32) -> Pose {
        if !self.blend_active {
            return pose_to;
        }
        self.blend_elapsed += delta_ms;
        let t = (self.blend_elapsed / self.blend_duration).min(1.0);

        let mut blended = Pose::empty();
        for (joint, to) in pose_to.iter() {
            let from = self.initial_pose.get(joint).unwrap_or(to);
            blended.set(joint, from * (1.0 - t) + to * t);
        }
        if t >= 1.0 {
            self.blend_active = false;
        }
        blended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Keyframe, Track};
    use crate::pose::Joint;

    fn ramp_clip(looped: bool) -> Arc<AnimationClip> {
        Arc::new(AnimationClip {
            name: "ramp".to_string(),
            duration_ms: 1000.0,
            tracks: vec![Track::new(
                Joint::LeftShoulder,
                vec![
                    Keyframe {
                        time: 0.0,
                        value: 0.0,
                    },
                    Keyframe {
                        time: 1000.0,
                        value: 1.0,
                    },
                ],
            )],
            looped,
        })
    }

    #[test]
    fn no_clip_yields_empty_pose() {
        let mut player = ClipPlayer::new();
        let out = player.update(16.0);
        assert!(out.pose.is_empty());
        assert!(!out.finished);
    }

    #[test]
    fn looping_full_duration_returns_to_start_pose() {
        let clip = ramp_clip(true);
        let mut player = ClipPlayer::new();
        player.play(Arc::clone(&clip), PlayOptions::default());

        let at_zero = player.update(0.0).pose.get(Joint::LeftShoulder).unwrap();
        // Cumulative delta equal to exactly one full duration (then a hair past)
        player.update(500.0);
        player.update(500.0);
        let wrapped = player.update(0.5).pose;
        let v = wrapped.get(Joint::LeftShoulder).unwrap();
        assert!((v - at_zero).abs() < 1e-3);
        assert!(player.is_playing());
    }

    #[test]
    fn non_looping_finishes_exactly_once() {
        let clip = ramp_clip(false);
        let mut player = ClipPlayer::new();
        player.play(clip, PlayOptions::default());

        let out = player.update(1500.0);
        assert!(out.finished);
        assert!(!player.is_playing());
        assert_eq!(out.pose.get(Joint::LeftShoulder), Some(1.0));

        // Further updates never re-report
        for _ in 0..3 {
            assert!(!player.update(100.0).finished);
        }
    }

    #[test]
    fn loop_override_does_not_touch_shared_clip() {
        let clip = ramp_clip(false);
        let mut a = ClipPlayer::new();
        let mut b = ClipPlayer::new();
        a.play(
            Arc::clone(&clip),
            PlayOptions {
                loop_override: Some(true),
                ..Default::default()
            },
        );
        b.play(Arc::clone(&clip), PlayOptions::default());

        a.update(1500.0);
        let out_b = b.update(1500.0);
        // b still sees the clip as non-looping
        assert!(out_b.finished);
        assert!(a.is_playing());
        assert!(!clip.looped);
    }

    #[test]
    fn blend_interpolates_from_previous_pose() {
        let clip = ramp_clip(true);
        let mut player = ClipPlayer::new();
        player.play(Arc::clone(&clip), PlayOptions::default());
        // Establish a latest pose at t=500 (value 0.5)
        player.update(500.0);

        // Restart with a 100ms blend; after 50ms the output should sit
        // halfway between the captured 0.5 and the fresh sample.
        player.play(
            clip,
            PlayOptions {
                blend_ms: Some(100.0),
                ..Default::default()
            },
        );
        let out = player.update(50.0);
        let fresh = 50.0 / 1000.0;
        let expected = 0.5 * 0.5 + 0.5 * fresh;
        let v = out.pose.get(Joint::LeftShoulder).unwrap();
        assert!((v - expected).abs() < 1e-4);
    }

    #[test]
    fn blend_deactivates_at_factor_one() {
        let clip = ramp_clip(true);
        let mut player = ClipPlayer::new();
        player.play(Arc::clone(&clip), PlayOptions::default());
        player.update(500.0);

        player.play(
            clip,
            PlayOptions {
                blend_ms: Some(100.0),
                ..Default::default()
            },
        );
        player.update(100.0);
        // Blend factor reached 1; the next output is the raw sample
        let out = player.update(100.0);
        let v = out.pose.get(Joint::LeftShoulder).unwrap();
        assert!((v - 200.0 / 1000.0).abs() < 1e-4);
    }
}
