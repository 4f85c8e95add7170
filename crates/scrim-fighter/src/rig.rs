//! The stickman rig: skeleton construction, joint extraction, and
//! limb hitbox generation

use scrim_animation::{BoneId, JointAngles, Skeleton};
use scrim_core::{Circle, Rect, Tuning, Vec2};
use scrim_physics::{segment_aabb, Hitbox};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Named body segments carrying hitboxes (and, for limbs, impairment
/// timers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limb {
    Head,
    Torso,
    LeftUpperArm,
    LeftLowerArm,
    RightUpperArm,
    RightLowerArm,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
}

impl Limb {
    pub const COUNT: usize = 10;

    pub const ALL: [Limb; Limb::COUNT] = [
        Limb::Head,
        Limb::Torso,
        Limb::LeftUpperArm,
        Limb::LeftLowerArm,
        Limb::RightUpperArm,
        Limb::RightLowerArm,
        Limb::LeftUpperLeg,
        Limb::LeftLowerLeg,
        Limb::RightUpperLeg,
        Limb::RightLowerLeg,
    ];

    pub fn index(self) -> usize {
        match self {
            Limb::Head => 0,
            Limb::Torso => 1,
            Limb::LeftUpperArm => 2,
            Limb::LeftLowerArm => 3,
            Limb::RightUpperArm => 4,
            Limb::RightLowerArm => 5,
            Limb::LeftUpperLeg => 6,
            Limb::LeftLowerLeg => 7,
            Limb::RightUpperLeg => 8,
            Limb::RightLowerLeg => 9,
        }
    }

    /// True for arm and leg segments (the impairable ones).
    pub fn is_limb_segment(self) -> bool {
        !matches!(self, Limb::Head | Limb::Torso)
    }

    /// The arm on the facing side ("leading"), named consistently
    /// regardless of facing direction.
    pub fn leading_lower_arm(facing_right: bool) -> Limb {
        if facing_right {
            Limb::RightLowerArm
        } else {
            Limb::LeftLowerArm
        }
    }

    pub fn leading_lower_leg(facing_right: bool) -> Limb {
        if facing_right {
            Limb::RightLowerLeg
        } else {
            Limb::LeftLowerLeg
        }
    }
}

/// World positions of every joint, recomputed each frame after the FK
/// pass. Consumed by hitbox generation and external renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointPositions {
    pub hip: Vec2,
    pub neck: Vec2,
    pub head_center: Vec2,
    pub head_radius: f32,
    pub left_shoulder: Vec2,
    pub left_elbow: Vec2,
    pub left_hand: Vec2,
    pub right_shoulder: Vec2,
    pub right_elbow: Vec2,
    pub right_hand: Vec2,
    pub left_knee: Vec2,
    pub left_foot: Vec2,
    pub right_knee: Vec2,
    pub right_foot: Vec2,
}

impl JointPositions {
    /// Far end of a segment: the hand for a lower arm, the foot for a
    /// lower leg, and so on down the chain.
    pub fn tip_of(&self, limb: Limb) -> Vec2 {
        match limb {
            Limb::Head => self.head_center,
            Limb::Torso => self.hip,
            Limb::LeftUpperArm => self.left_elbow,
            Limb::LeftLowerArm => self.left_hand,
            Limb::RightUpperArm => self.right_elbow,
            Limb::RightLowerArm => self.right_hand,
            Limb::LeftUpperLeg => self.left_knee,
            Limb::LeftLowerLeg => self.left_foot,
            Limb::RightUpperLeg => self.right_knee,
            Limb::RightLowerLeg => self.right_foot,
        }
    }
}

/// Hitboxes for all ten body segments.
#[derive(Clone, Copy, Debug)]
pub struct LimbHitboxes {
    boxes: [Hitbox; Limb::COUNT],
}

impl LimbHitboxes {
    pub fn get(&self, limb: Limb) -> &Hitbox {
        &self.boxes[limb.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Limb, &Hitbox)> {
        Limb::ALL.iter().map(move |&l| (l, &self.boxes[l.index()]))
    }
}

/// One fighter's bone tree plus the bone handles needed to pose it.
///
/// Layout: a zero-length pelvis root anchors the torso (pointing up)
/// and both legs (pointing down); arms hang from the torso's end (the
/// neck), and the head continues above it.
#[derive(Clone, Debug)]
pub struct FighterRig {
    skeleton: Skeleton,
    torso: BoneId,
    head: BoneId,
    left_upper_arm: BoneId,
    left_lower_arm: BoneId,
    right_upper_arm: BoneId,
    right_lower_arm: BoneId,
    left_upper_leg: BoneId,
    left_lower_leg: BoneId,
    right_upper_leg: BoneId,
    right_lower_leg: BoneId,
    head_radius: f32,
    limb_length: f32,
}

impl FighterRig {
    pub fn new(tuning: &Tuning) -> Self {
        let mut skeleton = Skeleton::new();
        let limb = tuning.limb_segment_length;

        let pelvis = skeleton.add_bone(0.0, None);
        let torso = skeleton.add_bone(tuning.torso_length, Some(pelvis));
        let head = skeleton.add_bone(tuning.head_radius, Some(torso));
        let left_upper_arm = skeleton.add_bone(limb, Some(torso));
        let left_lower_arm = skeleton.add_bone(limb, Some(left_upper_arm));
        let right_upper_arm = skeleton.add_bone(limb, Some(torso));
        let right_lower_arm = skeleton.add_bone(limb, Some(right_upper_arm));
        let left_upper_leg = skeleton.add_bone(limb, Some(pelvis));
        let left_lower_leg = skeleton.add_bone(limb, Some(left_upper_leg));
        let right_upper_leg = skeleton.add_bone(limb, Some(pelvis));
        let right_lower_leg = skeleton.add_bone(limb, Some(right_upper_leg));

        Self {
            skeleton,
            torso,
            head,
            left_upper_arm,
            left_lower_arm,
            right_upper_arm,
            right_lower_arm,
            left_upper_leg,
            left_lower_leg,
            right_upper_leg,
            right_lower_leg,
            head_radius: tuning.head_radius,
            limb_length: limb,
        }
    }

    pub fn limb_length(&self) -> f32 {
        self.limb_length
    }

    /// Write joint angles into the bone tree and run the FK pass from
    /// the hip.
    ///
    /// Shoulder and hip angles are stored facing-signed (a facing flip
    /// negates them), so they map straight onto bone space; elbow and
    /// knee bends are symmetric magnitudes mirrored here by facing.
    pub fn update_pose(&mut self, hip: Vec2, angles: &JointAngles, facing_right: bool) {
        let bend_dir = if facing_right { -1.0 } else { 1.0 };
        let s = &mut self.skeleton;

        // Torso points straight up from the pelvis; the head continues it.
        s.set_local_angle(self.torso, -FRAC_PI_2);
        s.set_local_angle(self.head, 0.0);

        // Arms hang from the neck: local π relative to the torso is
        // straight down in world space.
        s.set_local_angle(self.left_upper_arm, PI + angles.left_shoulder);
        s.set_local_angle(self.left_lower_arm, angles.left_elbow * bend_dir);
        s.set_local_angle(self.right_upper_arm, PI + angles.right_shoulder);
        s.set_local_angle(self.right_lower_arm, angles.right_elbow * bend_dir);

        // Legs hang from the pelvis.
        s.set_local_angle(self.left_upper_leg, FRAC_PI_2 + angles.left_hip);
        s.set_local_angle(self.left_lower_leg, angles.left_knee * bend_dir);
        s.set_local_angle(self.right_upper_leg, FRAC_PI_2 + angles.right_hip);
        s.set_local_angle(self.right_lower_leg, angles.right_knee * bend_dir);

        s.update(hip);
    }

    /// Extract world joint positions. Only valid after `update_pose`
    /// in the same frame.
    pub fn joint_positions(&self) -> JointPositions {
        let s = &self.skeleton;
        let neck = s.end(self.torso);
        // Head bone ends at the circle's center.
        JointPositions {
            hip: s.start(self.torso),
            neck,
            head_center: s.end(self.head),
            head_radius: self.head_radius,
            left_shoulder: s.start(self.left_upper_arm),
            left_elbow: s.end(self.left_upper_arm),
            left_hand: s.end(self.left_lower_arm),
            right_shoulder: s.start(self.right_upper_arm),
            right_elbow: s.end(self.right_upper_arm),
            right_hand: s.end(self.right_lower_arm),
            left_knee: s.end(self.left_upper_leg),
            left_foot: s.end(self.left_lower_leg),
            right_knee: s.end(self.right_upper_leg),
            right_foot: s.end(self.right_lower_leg),
        }
    }

    /// Build padded hitboxes for every segment from current joint
    /// positions.
    pub fn limb_hitboxes(&self, padding: f32) -> LimbHitboxes {
        let j = self.joint_positions();
        let seg = |a, b| Hitbox::Rect(segment_aabb(a, b, padding));
        LimbHitboxes {
            boxes: [
                Hitbox::Circle(Circle::new(j.head_center, j.head_radius + padding)),
                seg(j.neck, j.hip),
                seg(j.left_shoulder, j.left_elbow),
                seg(j.left_elbow, j.left_hand),
                seg(j.right_shoulder, j.right_elbow),
                seg(j.right_elbow, j.right_hand),
                seg(j.hip, j.left_knee),
                seg(j.left_knee, j.left_foot),
                seg(j.hip, j.right_knee),
                seg(j.right_knee, j.right_foot),
            ],
        }
    }
}

/// The probe rectangle in front of a fighter, used by AI/input layers
/// to detect obstacles ahead. Sized to `probe_range_scale ×` the
/// fighter's width.
pub fn forward_probe_rect(
    center: Vec2,
    width: f32,
    height: f32,
    facing_right: bool,
    probe_range_scale: f32,
) -> Rect {
    let range = width * probe_range_scale;
    let x = if facing_right {
        center.x + width / 2.0
    } else {
        center.x - width / 2.0 - range
    };
    Rect::new(x, center.y - height / 2.0, range, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posed_rig(angles: JointAngles, facing_right: bool) -> FighterRig {
        let tuning = Tuning::default();
        let mut rig = FighterRig::new(&tuning);
        rig.update_pose(Vec2::new(100.0, 200.0), &angles, facing_right);
        rig
    }

    #[test]
    fn neutral_pose_stacks_vertically() {
        let rig = posed_rig(JointAngles::default(), true);
        let j = rig.joint_positions();

        // Torso rises from the hip, head above the neck
        assert!(j.neck.y < j.hip.y);
        assert!(j.head_center.y < j.neck.y);
        // Arms hang straight down from the neck
        assert!((j.left_hand.x - j.neck.x).abs() < 1e-3);
        assert!(j.left_hand.y > j.neck.y);
        // Feet below the hip
        assert!(j.left_foot.y > j.hip.y);
        assert!((j.right_foot.y - j.left_foot.y).abs() < 1e-3);
    }

    #[test]
    fn neutral_feet_reach_full_leg_length() {
        let tuning = Tuning::default();
        let rig = posed_rig(JointAngles::default(), true);
        let j = rig.joint_positions();
        let expected = 2.0 * tuning.limb_segment_length;
        assert!((j.left_foot.y - j.hip.y - expected).abs() < 1e-3);
    }

    #[test]
    fn hitboxes_have_minimum_dimensions() {
        let tuning = Tuning::default();
        let rig = posed_rig(JointAngles::default(), true);
        let boxes = rig.limb_hitboxes(tuning.limb_hitbox_padding);
        let min = 2.0 * tuning.limb_hitbox_padding;
        for (limb, hitbox) in boxes.iter() {
            if let Hitbox::Rect(r) = hitbox {
                assert!(r.width >= min, "{limb:?} width {}", r.width);
                assert!(r.height >= min, "{limb:?} height {}", r.height);
            }
        }
    }

    #[test]
    fn head_hitbox_is_a_padded_circle() {
        let tuning = Tuning::default();
        let rig = posed_rig(JointAngles::default(), true);
        let boxes = rig.limb_hitboxes(tuning.limb_hitbox_padding);
        match boxes.get(Limb::Head) {
            Hitbox::Circle(c) => {
                assert_eq!(c.radius, tuning.head_radius + tuning.limb_hitbox_padding)
            }
            other => panic!("expected circle head hitbox, got {other:?}"),
        }
    }

    #[test]
    fn probe_rect_sits_in_front() {
        let right = forward_probe_rect(Vec2::new(100.0, 200.0), 32.0, 64.0, true, 1.5);
        assert_eq!(right.x, 116.0);
        assert_eq!(right.width, 48.0);

        let left = forward_probe_rect(Vec2::new(100.0, 200.0), 32.0, 64.0, false, 1.5);
        assert_eq!(left.x, 100.0 - 16.0 - 48.0);
    }

    #[test]
    fn leading_limbs_follow_facing() {
        assert_eq!(Limb::leading_lower_arm(true), Limb::RightLowerArm);
        assert_eq!(Limb::leading_lower_arm(false), Limb::LeftLowerArm);
        assert_eq!(Limb::leading_lower_leg(false), Limb::LeftLowerLeg);
    }

    #[test]
    fn tip_of_reaches_segment_ends() {
        let rig = posed_rig(JointAngles::default(), true);
        let j = rig.joint_positions();
        assert_eq!(j.tip_of(Limb::leading_lower_arm(true)), j.right_hand);
        assert_eq!(j.tip_of(Limb::leading_lower_leg(false)), j.left_foot);
        assert_eq!(j.tip_of(Limb::Head), j.head_center);
    }
}
