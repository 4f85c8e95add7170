//! Built-in animation clips

use crate::clip::{AnimationClip, Keyframe, Track};
use crate::pose::Joint;

fn track(joint: Joint, keys: &[(f32, f32)]) -> Track {
    Track::new(
        joint,
        keys.iter()
            .map(|&(time, value)| Keyframe { time, value })
            .collect(),
    )
}

/// Idle: slight shoulder swing, looping over one second.
pub fn idle_clip() -> AnimationClip {
    AnimationClip {
        name: "idle".to_string(),
        duration_ms: 1000.0,
        tracks: vec![
            track(
                Joint::LeftShoulder,
                &[(0.0, -0.2), (500.0, 0.2), (1000.0, -0.2)],
            ),
            track(
                Joint::RightShoulder,
                &[(0.0, 0.2), (500.0, -0.2), (1000.0, 0.2)],
            ),
        ],
        looped: true,
    }
}

/// Walk: counter-swinging hips, shoulders, and knees over 600ms.
pub fn walk_clip() -> AnimationClip {
    AnimationClip {
        name: "walk".to_string(),
        duration_ms: 600.0,
        tracks: vec![
            track(Joint::LeftHip, &[(0.0, -0.4), (300.0, 0.4), (600.0, -0.4)]),
            track(Joint::RightHip, &[(0.0, 0.4), (300.0, -0.4), (600.0, 0.4)]),
            track(
                Joint::LeftShoulder,
                &[(0.0, 0.5), (300.0, -0.5), (600.0, 0.5)],
            ),
            track(
                Joint::RightShoulder,
                &[(0.0, -0.5), (300.0, 0.5), (600.0, -0.5)],
            ),
            track(Joint::LeftKnee, &[(0.0, 0.2), (300.0, -0.2), (600.0, 0.2)]),
            track(
                Joint::RightKnee,
                &[(0.0, -0.2), (300.0, 0.2), (600.0, -0.2)],
            ),
        ],
        looped: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{ClipPlayer, PlayOptions};
    use std::sync::Arc;

    #[test]
    fn builtin_clips_loop() {
        assert!(idle_clip().looped);
        assert!(walk_clip().looped);
    }

    #[test]
    fn walk_hips_counter_swing() {
        let clip = Arc::new(walk_clip());
        let mut player = ClipPlayer::new();
        player.play(clip, PlayOptions::default());
        let pose = player.update(150.0).pose;
        let left = pose.get(Joint::LeftHip).unwrap();
        let right = pose.get(Joint::RightHip).unwrap();
        assert!((left + right).abs() < 1e-5, "hips mirror each other");
    }
}
