//! Gameplay tuning table
//!
//! Every gameplay constant lives here so a match can be retuned from a
//! TOML file without touching simulation code. Units are consistent
//! across the whole table: distances in pixels, times in milliseconds,
//! velocities in px/ms, accelerations in px/ms².

use crate::error::{Result, ScrimError};
use serde::{Deserialize, Serialize};

/// All gameplay constants for a match.
///
/// `Default` holds the shipped values. Partial TOML files override
/// individual fields; everything else keeps its default.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Fighter geometry
    pub fighter_width: f32,
    pub fighter_height: f32,
    pub limb_segment_length: f32,
    pub torso_length: f32,
    pub head_radius: f32,
    pub limb_hitbox_padding: f32,

    // Health and impairment
    pub health_max: f32,
    pub limb_impair_ms: f32,

    // Movement
    pub walk_acceleration: f32,
    pub max_walk_speed: f32,
    pub ground_friction: f32,
    /// Horizontal speed below which the fighter is considered idle
    /// (~0.1 px/frame at 60fps, expressed in px/ms).
    pub walk_speed_epsilon: f32,
    pub jump_force: f32,
    pub gravity: f32,

    // Attacks
    pub attack_ms: f32,
    pub special_attack_ms: f32,
    pub punch_range: f32,
    pub punch_damage: f32,
    pub kick_range: f32,
    pub kick_damage: f32,
    pub flying_kick_range: f32,
    pub flying_kick_damage: f32,
    pub ground_slam_aoe_range: f32,
    pub ground_slam_damage: f32,
    pub ground_slam_force: f32,

    // Knockback and stun
    pub knockback_base_x: f32,
    pub knockback_base_y: f32,
    pub knockback_special_multiplier: f32,
    pub hit_stun_ms: f32,
    pub hit_stun_heavy_ms: f32,

    // Guard
    pub guard_damage_scale: f32,
    pub guard_knockback_scale: f32,

    // Parry
    pub parry_ms: f32,
    pub parry_cooldown_ms: f32,
    pub parry_success_stun_multiplier: f32,
    pub parry_fail_vulnerable_ms: f32,

    // Air dodge
    pub air_dodge_ms: f32,
    pub air_dodge_cooldown_ms: f32,
    pub air_dodge_force: f32,

    // Combos
    pub combo_window_ms: f32,

    // Procedural animation
    pub walk_cycle_rate: f32,
    pub idle_sway_rate: f32,
    pub idle_sway_amplitude: f32,
    pub walk_arm_swing: f32,
    pub walk_elbow_bend: f32,
    pub walk_hip_swing: f32,
    pub walk_knee_bend: f32,
    /// Exponential smoothing rate toward target angles (per ms).
    pub pose_smoothing_rate: f32,

    // Obstacle queries
    pub probe_range_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fighter_width: 32.0,
            fighter_height: 64.0,
            limb_segment_length: 20.0,
            torso_length: 24.0,
            head_radius: 8.0,
            limb_hitbox_padding: 4.0,

            health_max: 100.0,
            limb_impair_ms: 2000.0,

            walk_acceleration: 0.002,
            max_walk_speed: 0.25,
            ground_friction: 0.008,
            walk_speed_epsilon: 0.006,
            jump_force: -0.4,
            gravity: 0.001,

            attack_ms: 300.0,
            special_attack_ms: 500.0,
            punch_range: 50.0,
            punch_damage: 8.0,
            kick_range: 65.0,
            kick_damage: 12.0,
            flying_kick_range: 80.0,
            flying_kick_damage: 18.0,
            ground_slam_aoe_range: 90.0,
            ground_slam_damage: 22.0,
            ground_slam_force: 1.2,

            knockback_base_x: 0.3,
            knockback_base_y: -0.25,
            knockback_special_multiplier: 1.5,
            hit_stun_ms: 250.0,
            hit_stun_heavy_ms: 600.0,

            guard_damage_scale: 0.5,
            guard_knockback_scale: 0.3,

            parry_ms: 150.0,
            parry_cooldown_ms: 800.0,
            parry_success_stun_multiplier: 2.0,
            parry_fail_vulnerable_ms: 400.0,

            air_dodge_ms: 200.0,
            air_dodge_cooldown_ms: 700.0,
            air_dodge_force: 0.35,

            combo_window_ms: 900.0,

            walk_cycle_rate: 0.0105,
            idle_sway_rate: 0.003,
            idle_sway_amplitude: 0.2,
            walk_arm_swing: 0.5,
            walk_elbow_bend: 0.3,
            walk_hip_swing: 0.4,
            walk_knee_bend: 0.2,
            pose_smoothing_rate: 0.015,

            probe_range_scale: 1.5,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table from TOML and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Fail fast on values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("fighter_width", self.fighter_width),
            ("fighter_height", self.fighter_height),
            ("limb_segment_length", self.limb_segment_length),
            ("torso_length", self.torso_length),
            ("head_radius", self.head_radius),
            ("health_max", self.health_max),
            ("gravity", self.gravity),
            ("max_walk_speed", self.max_walk_speed),
            ("attack_ms", self.attack_ms),
            ("special_attack_ms", self.special_attack_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScrimError::ValueOutOfRange {
                    field: field.to_string(),
                    min: f64::MIN_POSITIVE,
                    max: f64::MAX,
                    value: value as f64,
                });
            }
        }

        let non_negative = [
            ("limb_hitbox_padding", self.limb_hitbox_padding),
            ("limb_impair_ms", self.limb_impair_ms),
            ("punch_range", self.punch_range),
            ("punch_damage", self.punch_damage),
            ("kick_range", self.kick_range),
            ("kick_damage", self.kick_damage),
            ("flying_kick_range", self.flying_kick_range),
            ("flying_kick_damage", self.flying_kick_damage),
            ("ground_slam_aoe_range", self.ground_slam_aoe_range),
            ("ground_slam_damage", self.ground_slam_damage),
            ("hit_stun_ms", self.hit_stun_ms),
            ("hit_stun_heavy_ms", self.hit_stun_heavy_ms),
            ("parry_ms", self.parry_ms),
            ("parry_cooldown_ms", self.parry_cooldown_ms),
            ("parry_fail_vulnerable_ms", self.parry_fail_vulnerable_ms),
            ("air_dodge_ms", self.air_dodge_ms),
            ("air_dodge_cooldown_ms", self.air_dodge_cooldown_ms),
            ("combo_window_ms", self.combo_window_ms),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrimError::ValueOutOfRange {
                    field: field.to_string(),
                    min: 0.0,
                    max: f64::MAX,
                    value: value as f64,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.guard_damage_scale) {
            return Err(ScrimError::ValueOutOfRange {
                field: "guard_damage_scale".to_string(),
                min: 0.0,
                max: 1.0,
                value: self.guard_damage_scale as f64,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_single_field() {
        let tuning = Tuning::from_toml_str("punch_damage = 15.0").unwrap();
        assert_eq!(tuning.punch_damage, 15.0);
        assert_eq!(tuning.kick_damage, Tuning::default().kick_damage);
    }

    #[test]
    fn negative_gravity_rejected() {
        let err = Tuning::from_toml_str("gravity = -0.5").unwrap_err();
        assert!(matches!(err, ScrimError::ValueOutOfRange { .. }));
    }

    #[test]
    fn guard_scale_above_one_rejected() {
        assert!(Tuning::from_toml_str("guard_damage_scale = 1.5").is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Tuning::from_toml_str("punch_damage = [").unwrap_err();
        assert!(matches!(err, ScrimError::TomlParseError(_)));
    }
}
