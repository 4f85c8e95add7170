//! Procedural pose composition
//!
//! Produces the frame's target joint angles from locomotion phase, idle
//! sway, held postures, action overrides, or a playing clip, then
//! smooths the current angles toward the target. Poses are authored
//! facing right and mirrored for a left-facing fighter; IK leg
//! placement runs after the mirror since it works in world space.

use scrim_animation::{solve_two_bone, AnimationClip, ClipPlayer, JointAngles, PlayOptions};
use scrim_core::{Tuning, Vec2};
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

/// Horizontal foot offset from the hip in a planted idle stance.
const STANCE_HALF_WIDTH: f32 = 6.0;

/// One-shot action animations that take over the whole pose while they
/// run. Held postures (guard) are not overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideKind {
    Punch,
    Kick,
    FlyingKick,
    GroundSlam,
    AirDodge,
    Parry,
    HitRecoil,
}

#[derive(Clone, Copy, Debug)]
struct ActionOverride {
    kind: OverrideKind,
    elapsed: f32,
    duration: f32,
}

/// Per-frame inputs the composer needs from the fighter.
#[derive(Clone, Copy, Debug)]
pub struct Posture {
    /// Horizontal speed magnitude, px/ms.
    pub speed: f32,
    pub facing_right: bool,
    pub grounded: bool,
    pub guarding: bool,
    /// World position of the hip joint.
    pub hip: Vec2,
    /// World y of the ground line under the fighter.
    pub ground_y: f32,
}

/// Composes joint angles each frame and smooths toward them.
#[derive(Clone, Debug)]
pub struct PoseComposer {
    current: JointAngles,
    target: JointAngles,
    walk_phase: f32,
    idle_phase: f32,
    planted_left: Option<Vec2>,
    planted_right: Option<Vec2>,
    action: Option<ActionOverride>,
    clip_player: ClipPlayer,
}

impl Default for PoseComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseComposer {
    pub fn new() -> Self {
        Self {
            current: JointAngles::default(),
            target: JointAngles::default(),
            walk_phase: 0.0,
            idle_phase: 0.0,
            planted_left: None,
            planted_right: None,
            action: None,
            clip_player: ClipPlayer::new(),
        }
    }

    pub fn override_active(&self) -> bool {
        self.action.is_some()
    }

    /// Begin a one-shot action animation. Replaces any running one.
    pub fn start_override(&mut self, kind: OverrideKind, duration_ms: f32) {
        self.action = Some(ActionOverride {
            kind,
            elapsed: 0.0,
            duration: duration_ms.max(1.0),
        });
    }

    pub fn clear_override(&mut self) {
        self.action = None;
    }

    pub fn play_clip(&mut self, clip: Arc<AnimationClip>, opts: PlayOptions) {
        self.clip_player.play(clip, opts);
    }

    pub fn stop_clip(&mut self) {
        self.clip_player.stop();
    }

    pub fn clip_playing(&self) -> bool {
        self.clip_player.is_playing()
    }

    pub fn current_angles(&self) -> JointAngles {
        self.current
    }

    /// Drop all transient pose state; used when restoring a fighter to
    /// a neutral footing.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Mirror the pose for a facing flip.
    ///
    /// The walk phase advances by half a cycle so the gait keeps its
    /// parity, and planted feet swap sides. A near-idle fighter drops
    /// its plants so the stance re-forms around the new facing.
    pub fn turn_around(&mut self, near_idle: bool) {
        self.current = self.current.mirrored();
        self.target = self.target.mirrored();
        self.walk_phase += PI;
        std::mem::swap(&mut self.planted_left, &mut self.planted_right);
        if near_idle {
            self.planted_left = None;
            self.planted_right = None;
        }
    }

    /// Compute this frame's target pose and smooth toward it. Returns
    /// the smoothed angles.
    pub fn update(&mut self, tuning: &Tuning, dt_ms: f32, posture: &Posture) -> JointAngles {
        let clip_out = self.clip_player.update(dt_ms);

        let mut target = if let Some(mut action) = self.action.take() {
            action.elapsed += dt_ms;
            let progress = (action.elapsed / action.duration).min(1.0);
            let pose = override_pose(action.kind, progress);
            if action.elapsed < action.duration {
                self.action = Some(action);
            }
            pose
        } else if posture.guarding {
            guard_pose()
        } else if !clip_out.pose.is_empty() {
            let mut angles = JointAngles::default();
            clip_out.pose.apply_to(&mut angles);
            angles
        } else if !posture.grounded {
            airborne_pose()
        } else if posture.speed > tuning.walk_speed_epsilon {
            self.planted_left = None;
            self.planted_right = None;
            self.walk_phase += dt_ms * tuning.walk_cycle_rate;
            walk_pose(tuning, self.walk_phase)
        } else {
            self.idle_phase += dt_ms * tuning.idle_sway_rate;
            idle_pose(tuning, self.idle_phase)
        };

        if !posture.facing_right {
            target = target.mirrored();
        }

        let idle_stance = self.action.is_none()
            && !posture.guarding
            && clip_out.pose.is_empty()
            && posture.grounded
            && posture.speed <= tuning.walk_speed_epsilon;
        if idle_stance {
            self.plant_feet(tuning, posture, &mut target);
        } else if !posture.grounded {
            self.planted_left = None;
            self.planted_right = None;
        }

        self.target = target;

        // Exponential smoothing, frame-rate corrected.
        let factor = 1.0 - (-tuning.pose_smoothing_rate * dt_ms).exp();
        for joint in scrim_animation::Joint::ALL {
            let current = self.current.get(joint);
            let wanted = self.target.get(joint);
            self.current.set(joint, current + (wanted - current) * factor);
        }
        self.current
    }

    /// Keep idle feet fixed on the ground line via two-bone IK,
    /// overriding the hip and knee targets.
    fn plant_feet(&mut self, tuning: &Tuning, posture: &Posture, target: &mut JointAngles) {
        let hip = posture.hip;
        let l = tuning.limb_segment_length;
        let reach = 2.0 * l * 0.9;

        let stale = |foot: &Option<Vec2>| match foot {
            Some(p) => (p.x - hip.x).abs() > reach,
            None => true,
        };
        if stale(&self.planted_left) {
            self.planted_left = Some(Vec2::new(hip.x - STANCE_HALF_WIDTH, posture.ground_y));
        }
        if stale(&self.planted_right) {
            self.planted_right = Some(Vec2::new(hip.x + STANCE_HALF_WIDTH, posture.ground_y));
        }

        if let Some(foot) = self.planted_left {
            let (hip_angle, knee_angle) = leg_angles_for(hip, foot, l, posture.facing_right);
            target.left_hip = hip_angle;
            target.left_knee = knee_angle;
        }
        if let Some(foot) = self.planted_right {
            let (hip_angle, knee_angle) = leg_angles_for(hip, foot, l, posture.facing_right);
            target.right_hip = hip_angle;
            target.right_knee = knee_angle;
        }
    }
}

/// Solve leg IK toward a world-space foot target and convert to the
/// rig's facing-signed hip/knee convention. A left-facing fighter
/// solves against the target reflected across the hip so the knee
/// bends toward its own front.
fn leg_angles_for(hip: Vec2, foot: Vec2, l: f32, facing_right: bool) -> (f32, f32) {
    let solve_target = if facing_right {
        foot
    } else {
        Vec2::new(2.0 * hip.x - foot.x, foot.y)
    };
    let sol = solve_two_bone(hip, solve_target, l, l);
    let hip_angle = if facing_right {
        sol.root_angle - FRAC_PI_2
    } else {
        FRAC_PI_2 - sol.root_angle
    };
    (hip_angle, -sol.bend_angle)
}

/// Walking gait, authored facing right. Negative shoulder/hip values
/// swing forward; arms counter-swing their same-side leg.
fn walk_pose(tuning: &Tuning, phase: f32) -> JointAngles {
    let swing = phase.sin();
    JointAngles {
        right_hip: -tuning.walk_hip_swing * swing,
        left_hip: tuning.walk_hip_swing * swing,
        right_knee: tuning.walk_knee_bend * swing.max(0.0),
        left_knee: tuning.walk_knee_bend * (-swing).max(0.0),
        right_shoulder: tuning.walk_arm_swing * swing,
        left_shoulder: -tuning.walk_arm_swing * swing,
        right_elbow: tuning.walk_elbow_bend * (1.0 - swing) * 0.5,
        left_elbow: tuning.walk_elbow_bend * (1.0 + swing) * 0.5,
    }
}

/// Idle sway touches shoulders and elbows only; legs are handled by
/// foot planting.
fn idle_pose(tuning: &Tuning, phase: f32) -> JointAngles {
    let sway = tuning.idle_sway_amplitude * phase.sin();
    JointAngles {
        left_shoulder: sway,
        right_shoulder: -sway,
        left_elbow: 0.15 + 0.05 * phase.sin(),
        right_elbow: 0.15 - 0.05 * phase.sin(),
        ..JointAngles::default()
    }
}

fn airborne_pose() -> JointAngles {
    JointAngles {
        left_shoulder: 0.6,
        right_shoulder: -0.6,
        left_elbow: 0.4,
        right_elbow: 0.4,
        left_hip: 0.3,
        right_hip: -0.3,
        left_knee: 0.5,
        right_knee: 0.5,
        ..JointAngles::default()
    }
}

/// Held guard: both arms raised in front of the face.
fn guard_pose() -> JointAngles {
    JointAngles {
        right_shoulder: -1.3,
        right_elbow: 1.6,
        left_shoulder: -1.0,
        left_elbow: 1.8,
        left_knee: 0.25,
        right_knee: 0.25,
        ..JointAngles::default()
    }
}

/// One-shot action poses, authored facing right. `progress` runs 0..1
/// over the action's duration; a sine envelope extends and retracts.
fn override_pose(kind: OverrideKind, progress: f32) -> JointAngles {
    let e = (progress * PI).sin();
    match kind {
        OverrideKind::Punch => JointAngles {
            right_shoulder: -1.4 * e,
            right_elbow: 0.9 * (1.0 - e),
            left_shoulder: -0.4 * e,
            left_elbow: 1.2 * e,
            ..JointAngles::default()
        },
        OverrideKind::Kick => JointAngles {
            right_hip: -1.2 * e,
            right_knee: 0.4 * (1.0 - e),
            left_shoulder: -0.5 * e,
            right_shoulder: 0.5 * e,
            left_knee: 0.2 * e,
            ..JointAngles::default()
        },
        OverrideKind::FlyingKick => JointAngles {
            right_hip: -1.5 * e,
            right_knee: 0.1,
            left_hip: 0.6 * e,
            left_knee: 1.6 * e,
            left_shoulder: 0.8 * e,
            right_shoulder: -0.8 * e,
            ..JointAngles::default()
        },
        OverrideKind::GroundSlam => JointAngles {
            left_shoulder: -2.6 * e,
            right_shoulder: -2.6 * e,
            left_elbow: 0.4,
            right_elbow: 0.4,
            left_knee: 0.6 * e,
            right_knee: 0.6 * e,
            ..JointAngles::default()
        },
        OverrideKind::AirDodge => JointAngles {
            left_elbow: 1.3 * e,
            right_elbow: 1.3 * e,
            left_hip: -0.9 * e,
            right_hip: -0.9 * e,
            left_knee: 2.0 * e,
            right_knee: 2.0 * e,
            ..JointAngles::default()
        },
        OverrideKind::Parry => JointAngles {
            right_shoulder: -1.9 * e,
            right_elbow: 0.5 * e,
            left_shoulder: -0.6 * e,
            left_elbow: 1.0 * e,
            ..JointAngles::default()
        },
        OverrideKind::HitRecoil => JointAngles {
            left_shoulder: 0.7 * e,
            right_shoulder: 0.7 * e,
            left_elbow: 0.5 * e,
            right_elbow: 0.5 * e,
            left_knee: 0.4 * e,
            right_knee: 0.4 * e,
            ..JointAngles::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_posture(speed: f32, facing_right: bool) -> Posture {
        Posture {
            speed,
            facing_right,
            grounded: true,
            guarding: false,
            hip: Vec2::new(100.0, 410.0),
            ground_y: 450.0,
        }
    }

    #[test]
    fn double_turn_around_restores_angles() {
        let tuning = Tuning::default();
        let mut composer = PoseComposer::new();
        composer.update(&tuning, 16.0, &grounded_posture(0.2, true));
        let before = composer.current_angles();

        composer.turn_around(false);
        composer.turn_around(false);
        assert_eq!(composer.current_angles(), before);
    }

    #[test]
    fn walking_swings_hips() {
        let tuning = Tuning::default();
        let mut composer = PoseComposer::new();
        // Enough frames for the smoothed pose to pick up the gait
        let mut max_hip: f32 = 0.0;
        for _ in 0..120 {
            let angles = composer.update(&tuning, 16.0, &grounded_posture(0.2, true));
            max_hip = max_hip.max(angles.left_hip.abs());
        }
        assert!(max_hip > 0.05, "hips never swung: {max_hip}");
    }

    #[test]
    fn override_expires_after_duration() {
        let tuning = Tuning::default();
        let mut composer = PoseComposer::new();
        composer.start_override(OverrideKind::Punch, 300.0);
        assert!(composer.override_active());

        composer.update(&tuning, 150.0, &grounded_posture(0.0, true));
        assert!(composer.override_active());
        composer.update(&tuning, 200.0, &grounded_posture(0.0, true));
        assert!(!composer.override_active());
    }

    #[test]
    fn smoothing_converges_toward_target() {
        let tuning = Tuning::default();
        let mut composer = PoseComposer::new();
        composer.start_override(OverrideKind::GroundSlam, 10_000.0);
        let posture = grounded_posture(0.0, true);

        let early = composer.update(&tuning, 16.0, &posture).left_shoulder;
        for _ in 0..60 {
            composer.update(&tuning, 16.0, &posture);
        }
        let late = composer.current_angles().left_shoulder;
        assert!(late < early, "shoulder should keep moving toward the raise");
    }

    #[test]
    fn idle_plants_feet_on_ground_line() {
        let tuning = Tuning::default();
        let mut composer = PoseComposer::new();
        let posture = grounded_posture(0.0, true);
        for _ in 0..200 {
            composer.update(&tuning, 16.0, &posture);
        }
        // With the pose converged, reconstruct the left foot through the
        // same chain the rig uses and check it sits near the ground.
        let angles = composer.current_angles();
        let l = tuning.limb_segment_length;
        let upper = posture.hip + Vec2::from_angle(FRAC_PI_2 + angles.left_hip) * l;
        let foot =
            upper + Vec2::from_angle(FRAC_PI_2 + angles.left_hip - angles.left_knee) * l;
        assert!(
            (foot.y - posture.ground_y).abs() < 1.5,
            "foot y {} vs ground {}",
            foot.y,
            posture.ground_y
        );
    }

    #[test]
    fn mirrored_gait_for_left_facing() {
        let tuning = Tuning::default();
        let mut right = PoseComposer::new();
        let mut left = PoseComposer::new();
        for _ in 0..40 {
            right.update(&tuning, 16.0, &grounded_posture(0.2, true));
            left.update(&tuning, 16.0, &grounded_posture(0.2, false));
        }
        let r = right.current_angles();
        let l = left.current_angles();
        assert!((r.left_shoulder + l.right_shoulder).abs() < 1e-4);
        assert!((r.left_hip + l.right_hip).abs() < 1e-4);
    }
}
