//! Fixed-size joint-angle poses
//!
//! A pose maps each of the eight animated joints to a radian value.
//! Unlike a string-keyed map, coverage is tracked with a bitmask so a
//! clip that only animates the shoulders leaves the other joints alone.

use serde::{Deserialize, Serialize};

/// The eight animated joints of a stick fighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
}

impl Joint {
    pub const ALL: [Joint; 8] = [
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
    ];

    pub fn index(self) -> usize {
        match self {
            Joint::LeftShoulder => 0,
            Joint::RightShoulder => 1,
            Joint::LeftElbow => 2,
            Joint::RightElbow => 3,
            Joint::LeftHip => 4,
            Joint::RightHip => 5,
            Joint::LeftKnee => 6,
            Joint::RightKnee => 7,
        }
    }
}

/// A complete set of joint angles (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub left_shoulder: f32,
    pub right_shoulder: f32,
    pub left_elbow: f32,
    pub right_elbow: f32,
    pub left_hip: f32,
    pub right_hip: f32,
    pub left_knee: f32,
    pub right_knee: f32,
}

impl JointAngles {
    pub fn get(&self, joint: Joint) -> f32 {
        match joint {
            Joint::LeftShoulder => self.left_shoulder,
            Joint::RightShoulder => self.right_shoulder,
            Joint::LeftElbow => self.left_elbow,
            Joint::RightElbow => self.right_elbow,
            Joint::LeftHip => self.left_hip,
            Joint::RightHip => self.right_hip,
            Joint::LeftKnee => self.left_knee,
            Joint::RightKnee => self.right_knee,
        }
    }

    pub fn set(&mut self, joint: Joint, value: f32) {
        match joint {
            Joint::LeftShoulder => self.left_shoulder = value,
            Joint::RightShoulder => self.right_shoulder = value,
            Joint::LeftElbow => self.left_elbow = value,
            Joint::RightElbow => self.right_elbow = value,
            Joint::LeftHip => self.left_hip = value,
            Joint::RightHip => self.right_hip = value,
            Joint::LeftKnee => self.left_knee = value,
            Joint::RightKnee => self.right_knee = value,
        }
    }

    /// Mirror the pose across the sagittal plane for a facing flip.
    ///
    /// Shoulder and hip pairs swap with sign negation; elbow and knee
    /// pairs swap without it (a bend is symmetric about the plane).
    pub fn mirrored(&self) -> Self {
        Self {
            left_shoulder: -self.right_shoulder,
            right_shoulder: -self.left_shoulder,
            left_elbow: self.right_elbow,
            right_elbow: self.left_elbow,
            left_hip: -self.right_hip,
            right_hip: -self.left_hip,
            left_knee: self.right_knee,
            right_knee: self.left_knee,
        }
    }
}

/// A sampled pose: joint angles plus a coverage mask recording which
/// joints a clip actually animated. Ephemeral, rebuilt every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    angles: JointAngles,
    mask: u8,
}

impl Pose {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set(&mut self, joint: Joint, value: f32) {
        self.angles.set(joint, value);
        self.mask |= 1 << joint.index();
    }

    pub fn get(&self, joint: Joint) -> Option<f32> {
        if self.mask & (1 << joint.index()) != 0 {
            Some(self.angles.get(joint))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Iterate over the joints this pose covers.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, f32)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(move |&j| self.get(j).map(|v| (j, v)))
    }

    /// Write every covered joint into a full angle set.
    pub fn apply_to(&self, angles: &mut JointAngles) {
        for (joint, value) in self.iter() {
            angles.set(joint, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_tracks_coverage() {
        let mut pose = Pose::empty();
        assert!(pose.is_empty());
        assert_eq!(pose.get(Joint::LeftElbow), None);

        pose.set(Joint::LeftElbow, 0.5);
        assert_eq!(pose.get(Joint::LeftElbow), Some(0.5));
        assert_eq!(pose.get(Joint::RightElbow), None);
    }

    #[test]
    fn apply_to_leaves_uncovered_joints_alone() {
        let mut pose = Pose::empty();
        pose.set(Joint::LeftShoulder, 1.0);

        let mut angles = JointAngles {
            right_shoulder: 2.0,
            ..JointAngles::default()
        };
        pose.apply_to(&mut angles);
        assert_eq!(angles.left_shoulder, 1.0);
        assert_eq!(angles.right_shoulder, 2.0);
    }

    #[test]
    fn mirror_is_self_inverse() {
        let angles = JointAngles {
            left_shoulder: 0.3,
            right_shoulder: -0.7,
            left_elbow: 0.2,
            right_elbow: 0.9,
            left_hip: -0.4,
            right_hip: 0.1,
            left_knee: 0.6,
            right_knee: -0.2,
        };
        assert_eq!(angles.mirrored().mirrored(), angles);
    }

    #[test]
    fn mirror_negates_shoulders_and_hips_only() {
        let angles = JointAngles {
            left_shoulder: 0.3,
            right_elbow: 0.5,
            left_hip: 0.2,
            right_knee: 0.4,
            ..JointAngles::default()
        };
        let m = angles.mirrored();
        assert_eq!(m.right_shoulder, -0.3);
        assert_eq!(m.left_elbow, 0.5);
        assert_eq!(m.right_hip, -0.2);
        assert_eq!(m.left_knee, 0.4);
    }
}
