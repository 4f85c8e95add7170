//! The fighter entity: action state machine, timers, combat
//! resolution, and physics integration
//!
//! Action attempts that fail their guard predicate are silent no-ops.
//! The input/AI layer retries every frame, so a refused action this
//! frame simply happens on a later one.

use crate::combat::{
    attack_damage, attack_range, knockback, AttackKind, CombatOutcome, ComboState, SpecialKind,
    StrikeKind,
};
use crate::composer::{OverrideKind, PoseComposer, Posture};
use crate::rig::{forward_probe_rect, FighterRig, JointPositions, Limb, LimbHitboxes};
use scrim_core::{Rect, Result, ScrimError, Tuning, Vec2};
use scrim_physics::{integrate_motion, resolve_ground, Arena, Hitbox, ObstacleField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The persisted subset of a fighter. Timers and action flags are
/// deliberately absent; a restored fighter resumes on a neutral footing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub x: f32,
    pub y: f32,
    pub health: f32,
    pub facing_right: bool,
}

/// An attack attempt that passed its guard predicate. A refused
/// attempt produces no value at all, so callers can tell "started and
/// whiffed" from "never started".
#[derive(Clone, Copy, Debug)]
pub struct AttackAttempt {
    /// The immediate hit check, if anything connected.
    pub outcome: Option<CombatOutcome>,
    /// Combo count registered by this attempt. `None` when the punch
    /// escalated into a flying kick (specials do not chain).
    pub combo: Option<u32>,
}

/// One stick fighter.
#[derive(Clone, Debug)]
pub struct Fighter {
    tuning: Arc<Tuning>,
    position: Vec2,
    velocity: Vec2,
    facing_right: bool,
    health: f32,
    airborne: bool,

    guarding: bool,
    parrying: bool,
    dodging: bool,
    attacking: bool,
    performing_special: bool,
    attack_kind: Option<AttackKind>,
    special_kind: Option<SpecialKind>,

    attack_timer: f32,
    special_timer: f32,
    hit_stun_timer: f32,
    parry_timer: f32,
    parry_cooldown_timer: f32,
    parry_fail_vuln_timer: f32,
    dodge_timer: f32,
    dodge_cooldown_timer: f32,
    ground_slam_impact_done: bool,

    combo: ComboState,
    limb_impair: [f32; Limb::COUNT],
    clock_ms: f64,
    move_input: f32,

    composer: PoseComposer,
    rig: FighterRig,
}

fn tick(timer: &mut f32, dt_ms: f32) {
    *timer = (*timer - dt_ms).max(0.0);
}

impl Fighter {
    pub fn new(tuning: Arc<Tuning>, position: Vec2, facing_right: bool) -> Result<Self> {
        if !position.is_finite() {
            return Err(ScrimError::InvalidGeometry(format!(
                "fighter position must be finite, got ({}, {})",
                position.x, position.y
            )));
        }
        let mut rig = FighterRig::new(&tuning);
        let composer = PoseComposer::new();
        rig.update_pose(
            hip_point(&tuning, position),
            &composer.current_angles(),
            facing_right,
        );
        Ok(Self {
            health: tuning.health_max,
            tuning,
            position,
            velocity: Vec2::ZERO,
            facing_right,
            airborne: false,
            guarding: false,
            parrying: false,
            dodging: false,
            attacking: false,
            performing_special: false,
            attack_kind: None,
            special_kind: None,
            attack_timer: 0.0,
            special_timer: 0.0,
            hit_stun_timer: 0.0,
            parry_timer: 0.0,
            parry_cooldown_timer: 0.0,
            parry_fail_vuln_timer: 0.0,
            dodge_timer: 0.0,
            dodge_cooldown_timer: 0.0,
            ground_slam_impact_done: true,
            combo: ComboState::default(),
            limb_impair: [0.0; Limb::COUNT],
            clock_ms: 0.0,
            move_input: 0.0,
            composer,
            rig,
        })
    }

    // --- guard predicates ---

    /// May a new action (attack, special, parry, dodge) start now?
    pub fn can_act(&self) -> bool {
        self.hit_stun_timer <= 0.0
            && self.parry_fail_vuln_timer <= 0.0
            && !self.dodging
            && !self.parrying
            && !self.attacking
            && !self.performing_special
            && !self.composer.override_active()
    }

    /// May horizontal input move the fighter this frame?
    pub fn can_move(&self) -> bool {
        !(self.guarding
            || self.parrying
            || (self.performing_special && self.special_kind == Some(SpecialKind::GroundSlam))
            || self.composer.override_active()
            || self.hit_stun_timer > 0.0
            || self.parry_fail_vuln_timer > 0.0
            || self.dodging)
    }

    pub fn can_change_facing(&self) -> bool {
        !(self.attacking
            || self.performing_special
            || self.composer.override_active()
            || self.hit_stun_timer > 0.0
            || self.parry_fail_vuln_timer > 0.0
            || self.parrying
            || self.dodging
            || self.guarding)
    }

    // --- transitions ---

    pub fn set_move_input(&mut self, direction: f32) {
        self.move_input = direction.clamp(-1.0, 1.0);
    }

    pub fn jump(&mut self) {
        if !self.airborne {
            self.velocity.y = self.tuning.jump_force;
            self.airborne = true;
        }
    }

    /// Start a basic attack and immediately test it against the
    /// opponent. An airborne punch escalates into a flying kick.
    /// Returns `None` when the guard predicate refused the attempt.
    pub fn initiate_attack(
        &mut self,
        kind: AttackKind,
        opponent: &mut Fighter,
    ) -> Option<AttackAttempt> {
        if !self.can_act() {
            return None;
        }
        if self.airborne && kind == AttackKind::Punch {
            return Some(AttackAttempt {
                outcome: self.begin_special(SpecialKind::FlyingKick, opponent),
                combo: None,
            });
        }
        self.attacking = true;
        self.attack_kind = Some(kind);
        self.attack_timer = self.tuning.attack_ms;
        let combo = self
            .combo
            .register(kind, self.clock_ms, self.tuning.combo_window_ms);
        let pose = match kind {
            AttackKind::Punch => OverrideKind::Punch,
            AttackKind::Kick => OverrideKind::Kick,
        };
        self.composer.start_override(pose, self.tuning.attack_ms);
        Some(AttackAttempt {
            outcome: self.check_hit(opponent),
            combo: Some(combo),
        })
    }

    /// Start a special move. Requires being airborne.
    pub fn initiate_special_move(
        &mut self,
        kind: SpecialKind,
        opponent: &mut Fighter,
    ) -> Option<CombatOutcome> {
        if !self.can_act() || !self.airborne {
            return None;
        }
        self.begin_special(kind, opponent)
    }

    fn begin_special(
        &mut self,
        kind: SpecialKind,
        opponent: &mut Fighter,
    ) -> Option<CombatOutcome> {
        self.performing_special = true;
        self.special_kind = Some(kind);
        self.special_timer = self.tuning.special_attack_ms;
        let pose = match kind {
            SpecialKind::FlyingKick => OverrideKind::FlyingKick,
            SpecialKind::GroundSlam => OverrideKind::GroundSlam,
        };
        self.composer
            .start_override(pose, self.tuning.special_attack_ms);
        if kind == SpecialKind::GroundSlam {
            self.velocity.y = self.tuning.ground_slam_force;
            self.ground_slam_impact_done = false;
        }
        self.check_hit(opponent)
    }

    pub fn initiate_parry(&mut self) {
        if !self.can_act() || self.parry_cooldown_timer > 0.0 {
            return;
        }
        self.parrying = true;
        self.parry_timer = self.tuning.parry_ms;
        self.parry_cooldown_timer = self.tuning.parry_cooldown_ms;
        self.composer
            .start_override(OverrideKind::Parry, self.tuning.parry_ms);
    }

    /// Airborne dodge: an additive velocity impulse along the given
    /// direction, so dodges stack with existing momentum.
    pub fn initiate_air_dodge(&mut self, dx: f32, dy: f32) {
        if !self.can_act() || !self.airborne || self.dodge_cooldown_timer > 0.0 {
            return;
        }
        let dir = Vec2::new(dx, dy);
        let len = dir.length();
        if len <= f32::EPSILON || !dir.is_finite() {
            return;
        }
        self.dodging = true;
        self.dodge_timer = self.tuning.air_dodge_ms;
        self.dodge_cooldown_timer = self.tuning.air_dodge_cooldown_ms;
        let impulse = dir * (self.tuning.air_dodge_force / len);
        self.velocity = self.velocity + impulse;
        self.composer
            .start_override(OverrideKind::AirDodge, self.tuning.air_dodge_ms);
    }

    pub fn set_guarding(&mut self, on: bool) {
        if on {
            if self.can_act() {
                self.guarding = true;
            }
        } else {
            self.guarding = false;
        }
    }

    pub fn turn_around(&mut self) {
        if !self.can_change_facing() {
            return;
        }
        self.facing_right = !self.facing_right;
        let near_idle = self.velocity.x.abs() <= self.tuning.walk_speed_epsilon;
        self.composer.turn_around(near_idle);
    }

    // --- combat resolution ---

    /// Test the active strike against the opponent. Ground slam never
    /// resolves here; its AOE fires at landing.
    pub fn check_hit(&mut self, opponent: &mut Fighter) -> Option<CombatOutcome> {
        let kind = self.active_strike()?;
        if kind == StrikeKind::GroundSlam {
            return None;
        }
        let range = attack_range(&self.tuning, self.attack_kind, self.special_kind);
        let dx = opponent.position.x - self.position.x;
        let dy = (opponent.position.y - self.position.y).abs();
        let in_front = if self.facing_right { dx >= 0.0 } else { dx <= 0.0 };
        if !in_front || dx.abs() > range || dy >= self.tuning.fighter_height {
            return None;
        }
        let damage = attack_damage(&self.tuning, self.attack_kind, self.special_kind);
        let special = self.special_kind.is_some();
        Some(self.resolve_strike(opponent, kind, damage, special))
    }

    /// One-shot AOE resolution when a ground slam reaches the ground.
    /// Safe to call on every grounded frame; only the first call after
    /// a slam does anything.
    pub fn handle_ground_slam_impact(&mut self, opponent: &mut Fighter) -> Option<CombatOutcome> {
        if self.ground_slam_impact_done || self.special_kind != Some(SpecialKind::GroundSlam) {
            return None;
        }
        self.ground_slam_impact_done = true;
        self.performing_special = false;
        self.special_kind = None;
        self.special_timer = 0.0;

        let dx = (opponent.position.x - self.position.x).abs();
        if dx > self.tuning.ground_slam_aoe_range {
            return None;
        }
        let damage = self.tuning.ground_slam_damage;
        Some(self.resolve_strike(opponent, StrikeKind::GroundSlam, damage, true))
    }

    fn resolve_strike(
        &mut self,
        opponent: &mut Fighter,
        kind: StrikeKind,
        damage: f32,
        special: bool,
    ) -> CombatOutcome {
        if opponent.parrying {
            return self.handle_parry_success(opponent, kind);
        }

        let strike_at = self.strike_point(kind);
        let guarded = opponent.guarding;
        let dealt = if guarded {
            damage * self.tuning.guard_damage_scale
        } else {
            damage
        };
        let defender_defeated = opponent.take_damage(dealt);

        let mut push = knockback(&self.tuning, self.facing_right, special);
        if guarded {
            push = push * self.tuning.guard_knockback_scale;
        }
        opponent.velocity = opponent.velocity + push;
        if push.y < 0.0 {
            opponent.airborne = true;
        }

        if !guarded {
            opponent.hit_stun_timer = if special {
                self.tuning.hit_stun_heavy_ms
            } else {
                self.tuning.hit_stun_ms
            };
            opponent
                .composer
                .start_override(OverrideKind::HitRecoil, opponent.hit_stun_timer);
            let struck = opponent.nearest_limb(strike_at);
            if struck.is_limb_segment() {
                opponent.limb_impair[struck.index()] = self.tuning.limb_impair_ms;
            }
        }

        CombatOutcome::Hit {
            kind,
            damage: dealt,
            defender_defeated,
            at: strike_at,
            guarded,
        }
    }

    /// The defender parried: the attacker eats a heavy, multiplied
    /// stun and its action is interrupted; the parrier pays with a
    /// short vulnerability window.
    fn handle_parry_success(&mut self, opponent: &mut Fighter, kind: StrikeKind) -> CombatOutcome {
        self.hit_stun_timer =
            self.tuning.hit_stun_heavy_ms * self.tuning.parry_success_stun_multiplier;
        self.attacking = false;
        self.attack_kind = None;
        self.attack_timer = 0.0;
        self.performing_special = false;
        self.special_kind = None;
        self.special_timer = 0.0;
        self.composer
            .start_override(OverrideKind::HitRecoil, self.hit_stun_timer);

        opponent.parrying = false;
        opponent.parry_timer = 0.0;
        opponent.parry_fail_vuln_timer = self.tuning.parry_fail_vulnerable_ms;

        CombatOutcome::Parried { kind }
    }

    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        self.health == 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(self.tuning.health_max);
    }

    // --- per-frame update ---

    /// Advance one frame: timers, movement, integration, ground and
    /// obstacle contact, and the pose. Returns any combat outcomes
    /// produced this frame (currently only a landing slam AOE).
    pub fn update(
        &mut self,
        dt_ms: f32,
        arena: &Arena,
        obstacles: &ObstacleField,
        opponent: &mut Fighter,
    ) -> Result<Vec<CombatOutcome>> {
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(ScrimError::InvalidGeometry(format!(
                "non-finite fighter state: position ({}, {}), velocity ({}, {})",
                self.position.x, self.position.y, self.velocity.x, self.velocity.y
            )));
        }

        self.clock_ms += dt_ms as f64;
        self.advance_timers(dt_ms);

        // Horizontal control
        if self.can_move() && self.move_input != 0.0 {
            let vx = self.velocity.x + self.move_input * self.tuning.walk_acceleration * dt_ms;
            self.velocity.x = vx.clamp(-self.tuning.max_walk_speed, self.tuning.max_walk_speed);
        } else if !self.airborne {
            let decel = self.tuning.ground_friction * dt_ms;
            let vx = self.velocity.x;
            self.velocity.x = vx - vx.signum() * decel.min(vx.abs());
        }

        let prev_x = self.position.x;
        integrate_motion(
            &mut self.position,
            &mut self.velocity,
            self.tuning.gravity,
            dt_ms,
        );
        self.position.x = arena.clamp_horizontal(self.position.x, self.tuning.fighter_width / 2.0);

        if obstacles.collision(&self.body_rect()).is_some() {
            self.position.x = prev_x;
            self.velocity.x = 0.0;
        }

        let floor = arena.floor_for(self.tuning.fighter_height / 2.0);
        let grounded = resolve_ground(&mut self.position, &mut self.velocity, floor);

        let mut outcomes = Vec::new();
        if grounded {
            if self.airborne {
                self.airborne = false;
                if let Some(outcome) = self.handle_ground_slam_impact(opponent) {
                    outcomes.push(outcome);
                }
            }
        } else {
            self.airborne = true;
        }

        let posture = Posture {
            speed: self.velocity.x.abs(),
            facing_right: self.facing_right,
            grounded: !self.airborne,
            guarding: self.guarding,
            hip: hip_point(&self.tuning, self.position),
            ground_y: arena.ground_y(),
        };
        let angles = self.composer.update(&self.tuning, dt_ms, &posture);
        self.rig
            .update_pose(posture.hip, &angles, self.facing_right);

        Ok(outcomes)
    }

    fn advance_timers(&mut self, dt_ms: f32) {
        tick(&mut self.attack_timer, dt_ms);
        if self.attacking && self.attack_timer == 0.0 {
            self.attacking = false;
            self.attack_kind = None;
        }

        tick(&mut self.special_timer, dt_ms);
        if self.performing_special && self.special_timer == 0.0 {
            // A ground slam ends at its landing impact, not on a timer.
            let slam_pending = self.special_kind == Some(SpecialKind::GroundSlam)
                && self.airborne
                && !self.ground_slam_impact_done;
            if !slam_pending {
                self.performing_special = false;
                self.special_kind = None;
            }
        }

        tick(&mut self.parry_timer, dt_ms);
        if self.parrying && self.parry_timer == 0.0 {
            self.parrying = false;
        }

        tick(&mut self.dodge_timer, dt_ms);
        if self.dodging && self.dodge_timer == 0.0 {
            self.dodging = false;
        }

        tick(&mut self.hit_stun_timer, dt_ms);
        tick(&mut self.parry_fail_vuln_timer, dt_ms);
        tick(&mut self.parry_cooldown_timer, dt_ms);
        tick(&mut self.dodge_cooldown_timer, dt_ms);
        for timer in &mut self.limb_impair {
            tick(timer, dt_ms);
        }
    }

    // --- queries ---

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0.0
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_performing_special(&self) -> bool {
        self.performing_special
    }

    pub fn is_guarding(&self) -> bool {
        self.guarding
    }

    pub fn is_parrying(&self) -> bool {
        self.parrying
    }

    pub fn is_dodging(&self) -> bool {
        self.dodging
    }

    pub fn hit_stun_remaining(&self) -> f32 {
        self.hit_stun_timer
    }

    pub fn parry_vulnerable_remaining(&self) -> f32 {
        self.parry_fail_vuln_timer
    }

    pub fn combo_count(&self) -> u32 {
        self.combo.count()
    }

    pub fn is_limb_impaired(&self, limb: Limb) -> bool {
        self.limb_impair[limb.index()] > 0.0
    }

    /// Fighter body as an axis-aligned rect around the center.
    pub fn body_rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.tuning.fighter_width / 2.0,
            self.position.y - self.tuning.fighter_height / 2.0,
            self.tuning.fighter_width,
            self.tuning.fighter_height,
        )
    }

    /// World joint positions for renderers and diagnostics.
    pub fn joint_positions(&self) -> JointPositions {
        self.rig.joint_positions()
    }

    /// Current padded hitboxes for every body segment.
    pub fn limb_hitboxes(&self) -> LimbHitboxes {
        self.rig.limb_hitboxes(self.tuning.limb_hitbox_padding)
    }

    /// The forward probe rect used by AI/input to look for obstacles
    /// ahead.
    pub fn probe_rect(&self) -> Rect {
        forward_probe_rect(
            self.position,
            self.tuning.fighter_width,
            self.tuning.fighter_height,
            self.facing_right,
            self.tuning.probe_range_scale,
        )
    }

    /// Body segment whose hitbox center is closest to a world point.
    pub fn nearest_limb(&self, point: Vec2) -> Limb {
        let boxes = self.limb_hitboxes();
        let mut best = Limb::Torso;
        let mut best_dist = f32::MAX;
        for (limb, hitbox) in boxes.iter() {
            let center = match hitbox {
                Hitbox::Rect(r) => r.center(),
                Hitbox::Circle(c) => c.center,
            };
            let dist = center.distance(point);
            if dist < best_dist {
                best_dist = dist;
                best = limb;
            }
        }
        best
    }

    fn active_strike(&self) -> Option<StrikeKind> {
        match (self.special_kind, self.attack_kind) {
            (Some(SpecialKind::FlyingKick), _) => Some(StrikeKind::FlyingKick),
            (Some(SpecialKind::GroundSlam), _) => Some(StrikeKind::GroundSlam),
            (None, Some(AttackKind::Punch)) => Some(StrikeKind::Punch),
            (None, Some(AttackKind::Kick)) => Some(StrikeKind::Kick),
            (None, None) => None,
        }
    }

    /// Where a strike visually lands: the leading hand for punches,
    /// the leading foot for kicks, the body center for a slam.
    fn strike_point(&self, kind: StrikeKind) -> Vec2 {
        let joints = self.rig.joint_positions();
        match kind {
            StrikeKind::Punch => joints.tip_of(Limb::leading_lower_arm(self.facing_right)),
            StrikeKind::Kick | StrikeKind::FlyingKick => {
                joints.tip_of(Limb::leading_lower_leg(self.facing_right))
            }
            StrikeKind::GroundSlam => self.position,
        }
    }

    // --- persistence ---

    pub fn snapshot(&self) -> FighterSnapshot {
        FighterSnapshot {
            x: self.position.x,
            y: self.position.y,
            health: self.health,
            facing_right: self.facing_right,
        }
    }

    /// Apply a snapshot and reset all transient state to a neutral
    /// footing.
    pub fn restore(&mut self, snap: &FighterSnapshot) -> Result<()> {
        let position = Vec2::new(snap.x, snap.y);
        if !position.is_finite() || !snap.health.is_finite() {
            return Err(ScrimError::InvalidGeometry(
                "fighter snapshot contains non-finite values".to_string(),
            ));
        }
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.health = snap.health.clamp(0.0, self.tuning.health_max);
        self.facing_right = snap.facing_right;
        self.airborne = false;
        self.guarding = false;
        self.parrying = false;
        self.dodging = false;
        self.attacking = false;
        self.performing_special = false;
        self.attack_kind = None;
        self.special_kind = None;
        self.attack_timer = 0.0;
        self.special_timer = 0.0;
        self.hit_stun_timer = 0.0;
        self.parry_timer = 0.0;
        self.parry_cooldown_timer = 0.0;
        self.parry_fail_vuln_timer = 0.0;
        self.dodge_timer = 0.0;
        self.dodge_cooldown_timer = 0.0;
        self.ground_slam_impact_done = true;
        self.combo.reset();
        self.limb_impair = [0.0; Limb::COUNT];
        self.move_input = 0.0;
        self.composer.reset();
        self.rig.update_pose(
            hip_point(&self.tuning, self.position),
            &self.composer.current_angles(),
            self.facing_right,
        );
        Ok(())
    }
}

/// World position of the hip joint for a fighter centered at `center`.
fn hip_point(tuning: &Tuning, center: Vec2) -> Vec2 {
    Vec2::new(
        center.x,
        center.y + tuning.fighter_height / 2.0 - 2.0 * tuning.limb_segment_length,
    )
}
