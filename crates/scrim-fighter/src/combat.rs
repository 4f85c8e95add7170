//! Attack kinds, per-kind constants, knockback, and combo tracking

use scrim_core::{Tuning, Vec2};
use serde::{Deserialize, Serialize};

/// Basic attacks available on the ground or in the air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Punch,
    Kick,
}

/// Special moves. Flying kick is entered by punching while airborne;
/// ground slam dives and resolves as an AOE on landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    FlyingKick,
    GroundSlam,
}

/// What actually connected, for events and effect selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeKind {
    Punch,
    Kick,
    FlyingKick,
    GroundSlam,
}

/// Reach of the currently active attack or special move. Special moves
/// take precedence over the basic attack kind.
pub fn attack_range(
    tuning: &Tuning,
    attack: Option<AttackKind>,
    special: Option<SpecialKind>,
) -> f32 {
    match (special, attack) {
        (Some(SpecialKind::FlyingKick), _) => tuning.flying_kick_range,
        (Some(SpecialKind::GroundSlam), _) => tuning.ground_slam_aoe_range,
        (None, Some(AttackKind::Punch)) => tuning.punch_range,
        (None, Some(AttackKind::Kick)) => tuning.kick_range,
        (None, None) => 0.0,
    }
}

/// Damage of the currently active attack or special move.
pub fn attack_damage(
    tuning: &Tuning,
    attack: Option<AttackKind>,
    special: Option<SpecialKind>,
) -> f32 {
    match (special, attack) {
        (Some(SpecialKind::FlyingKick), _) => tuning.flying_kick_damage,
        (Some(SpecialKind::GroundSlam), _) => tuning.ground_slam_damage,
        (None, Some(AttackKind::Punch)) => tuning.punch_damage,
        (None, Some(AttackKind::Kick)) => tuning.kick_damage,
        (None, None) => 0.0,
    }
}

/// Knockback velocity for a hit, pushed along the attacker's facing.
/// Special moves scale the base vector.
pub fn knockback(tuning: &Tuning, facing_right: bool, special: bool) -> Vec2 {
    let multiplier = if special {
        tuning.knockback_special_multiplier
    } else {
        1.0
    };
    let dir = if facing_right { 1.0 } else { -1.0 };
    Vec2::new(
        tuning.knockback_base_x * multiplier * dir,
        tuning.knockback_base_y * multiplier,
    )
}

/// Tracks consecutive same-kind attacks against simulation time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComboState {
    count: u32,
    last_attack_ms: f64,
    last_kind: Option<AttackKind>,
}

impl ComboState {
    /// Record an attack at `now_ms`. A repeat of the same kind within
    /// the window increments the counter; anything else resets to 1.
    pub fn register(&mut self, kind: AttackKind, now_ms: f64, window_ms: f32) -> u32 {
        let within = now_ms - self.last_attack_ms <= window_ms as f64;
        if within && self.last_kind == Some(kind) && self.count > 0 {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.last_attack_ms = now_ms;
        self.last_kind = Some(kind);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of a resolved strike, consumed by the session to emit events
/// and spawn visual feedback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombatOutcome {
    /// The strike connected and damage was applied.
    Hit {
        kind: StrikeKind,
        damage: f32,
        defender_defeated: bool,
        /// Where to spawn the hit spark.
        at: Vec2,
        /// Damage/knockback were guard-reduced.
        guarded: bool,
    },
    /// The defender parried: the attacker eats a heavy stun, the
    /// defender gains a vulnerability window.
    Parried { kind: StrikeKind },
}
