//! The match session: owned fighter registry and per-frame driver
//!
//! The session owns the arena, the obstacle field, and the fighters;
//! nothing lives in module-level state, so multiple matches can run
//! side by side. Fighters advance sequentially in registration order,
//! and a fighter's hit checks read the opponent as it stands at that
//! moment in the pass (a fighter updated earlier in the frame is seen
//! post-update by the one after it).

use crate::clock::GameClock;
use crate::effects::{EffectKind, EffectSink};
use crate::event::MatchEvent;
use crate::event_bus::EventBus;
use crate::save::MatchSave;
use scrim_core::{Result, ScrimError, Tuning, Vec2};
use scrim_fighter::{AttackKind, CombatOutcome, Fighter, SpecialKind, StrikeKind};
use scrim_physics::{Arena, Obstacle, ObstacleField, ObstacleSpec};
use std::sync::Arc;

/// Everything the input/AI layer can ask a fighter to do. Commands
/// whose guard predicate fails are silently dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Held horizontal input, -1..1. Persists until replaced.
    Move(f32),
    Jump,
    Attack(AttackKind),
    Special(SpecialKind),
    GuardOn,
    GuardOff,
    Parry,
    AirDodge { dx: f32, dy: f32 },
    TurnAround,
    /// Restore health, capped at the maximum. Issued by the host's
    /// powerup layer when a fighter collects a pickup.
    Heal(f32),
}

/// One running match.
pub struct MatchSession {
    tuning: Arc<Tuning>,
    arena: Arena,
    fighters: Vec<Fighter>,
    obstacles: ObstacleField,
    bus: EventBus,
    pending: Vec<(usize, CombatOutcome)>,
    defeated_reported: Vec<bool>,
    time_ms: f64,
    over: bool,
}

impl MatchSession {
    pub fn new(arena: Arena, tuning: Arc<Tuning>) -> Self {
        Self {
            tuning,
            arena,
            fighters: Vec::new(),
            obstacles: ObstacleField::new(),
            bus: EventBus::new(),
            pending: Vec::new(),
            defeated_reported: Vec::new(),
            time_ms: 0.0,
            over: false,
        }
    }

    /// Register a fighter standing on the ground line. Returns its
    /// session index.
    pub fn add_fighter(&mut self, x: f32, facing_right: bool) -> Result<usize> {
        let y = self.arena.floor_for(self.tuning.fighter_height / 2.0);
        let fighter = Fighter::new(Arc::clone(&self.tuning), Vec2::new(x, y), facing_right)?;
        self.fighters.push(fighter);
        self.defeated_reported.push(false);
        Ok(self.fighters.len() - 1)
    }

    pub fn add_obstacle(&mut self, spec: ObstacleSpec) -> Result<u32> {
        self.obstacles.add(spec)
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    /// Obstacle in front of a fighter's probe rect, if any. Consumed by
    /// the AI/input layer to react to terrain ahead.
    pub fn obstacle_ahead(&self, index: usize) -> Result<Option<&Obstacle>> {
        let fighter = self.fighter(index)?;
        Ok(self.obstacles.collision(&fighter.probe_rect()))
    }

    pub fn fighter(&self, index: usize) -> Result<&Fighter> {
        self.fighters
            .get(index)
            .ok_or(ScrimError::FighterNotFound(index))
    }

    pub fn fighter_count(&self) -> usize {
        self.fighters.len()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// True once any fighter has been defeated.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Take everything published since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.bus.drain()
    }

    /// Apply one command to a fighter. Combat commands resolve their
    /// hit check immediately; the outcome is published on the next
    /// `step`.
    pub fn command(&mut self, index: usize, cmd: Command) -> Result<()> {
        if index >= self.fighters.len() {
            return Err(ScrimError::FighterNotFound(index));
        }
        match cmd {
            Command::Move(direction) => self.fighters[index].set_move_input(direction),
            Command::Jump => self.fighters[index].jump(),
            Command::GuardOn => self.fighters[index].set_guarding(true),
            Command::GuardOff => self.fighters[index].set_guarding(false),
            Command::Parry => self.fighters[index].initiate_parry(),
            Command::AirDodge { dx, dy } => self.fighters[index].initiate_air_dodge(dx, dy),
            Command::TurnAround => self.fighters[index].turn_around(),
            Command::Attack(kind) => {
                let opponent = self.opponent_of(index)?;
                let (fighter, other) = pair_mut(&mut self.fighters, index, opponent);
                // Only an attempt that actually started can extend or
                // announce a chain; refused retries publish nothing.
                if let Some(attempt) = fighter.initiate_attack(kind, other) {
                    if let Some(outcome) = attempt.outcome {
                        self.pending.push((index, outcome));
                    }
                    if let Some(count) = attempt.combo {
                        if count >= 2 {
                            self.bus.push(MatchEvent::ComboPerformed { index, count });
                        }
                    }
                }
            }
            Command::Heal(amount) => {
                self.fighters[index].heal(amount);
                self.bus.push(MatchEvent::PowerupCollected {
                    index,
                    heal: amount,
                });
            }
            Command::Special(kind) => {
                let opponent = self.opponent_of(index)?;
                let (fighter, other) = pair_mut(&mut self.fighters, index, opponent);
                if let Some(outcome) = fighter.initiate_special_move(kind, other) {
                    self.pending.push((index, outcome));
                }
            }
        }
        Ok(())
    }

    /// Drive the match from a real-time host frame: measure the frame
    /// delta on the clock and run every whole fixed step it yields.
    /// Returns the number of simulation steps taken.
    pub fn advance(&mut self, clock: &mut GameClock, effects: &mut dyn EffectSink) -> u32 {
        clock.tick();
        let mut steps = 0;
        while let Some(dt) = clock.try_consume_step() {
            self.step(dt, effects);
            steps += 1;
        }
        steps
    }

    /// Advance the whole match by one frame.
    ///
    /// A fighter whose update fails is logged and skipped for the
    /// frame; the rest of the match keeps running.
    pub fn step(&mut self, dt_ms: f32, effects: &mut dyn EffectSink) {
        self.time_ms += dt_ms as f64;

        let pending = std::mem::take(&mut self.pending);
        for (attacker, outcome) in pending {
            self.publish_outcome(attacker, outcome, effects);
        }

        if self.fighters.len() >= 2 {
            for i in 0..self.fighters.len() {
                let j = (i + 1) % self.fighters.len();
                let arena = self.arena;
                let (fighter, opponent) = pair_mut(&mut self.fighters, i, j);
                match fighter.update(dt_ms, &arena, &self.obstacles, opponent) {
                    Ok(outcomes) => {
                        for outcome in outcomes {
                            self.pending.push((i, outcome));
                        }
                    }
                    Err(err) => {
                        let fault = ScrimError::FighterFault {
                            index: i,
                            reason: err.to_string(),
                        };
                        log::warn!("{fault}; skipping this fighter for the frame");
                    }
                }
            }
        }

        // Outcomes produced mid-pass (landing slams) publish this frame
        let landed = std::mem::take(&mut self.pending);
        for (attacker, outcome) in landed {
            self.publish_outcome(attacker, outcome, effects);
        }

        for i in 0..self.fighters.len() {
            if self.fighters[i].is_defeated() && !self.defeated_reported[i] {
                self.defeated_reported[i] = true;
                self.over = true;
                log::info!("fighter {i} defeated");
                self.bus.push(MatchEvent::PlayerDefeated { index: i });
            }
        }
    }

    fn publish_outcome(
        &mut self,
        attacker: usize,
        outcome: CombatOutcome,
        effects: &mut dyn EffectSink,
    ) {
        let defender = (attacker + 1) % self.fighters.len();
        match outcome {
            CombatOutcome::Hit {
                kind,
                damage,
                defender_defeated: _,
                at,
                guarded,
            } => {
                self.bus.push(MatchEvent::PlayerHit {
                    attacker,
                    defender,
                    kind,
                    damage,
                    guarded,
                });
                let spark = if guarded {
                    EffectKind::BlockFlash
                } else {
                    EffectKind::HitSpark
                };
                effects.spawn(at, spark);
                if kind == StrikeKind::GroundSlam {
                    self.bus.push(MatchEvent::GroundSlamImpact { attacker });
                    effects.spawn(at, EffectKind::SlamShockwave);
                }
            }
            CombatOutcome::Parried { .. } => {
                self.bus
                    .push(MatchEvent::ParrySucceeded { attacker, defender });
                let at = self.fighters[defender].position();
                effects.spawn(at, EffectKind::ParryFlash);
            }
        }
    }

    fn opponent_of(&self, index: usize) -> Result<usize> {
        if self.fighters.len() < 2 {
            return Err(ScrimError::FighterNotFound(index + 1));
        }
        Ok((index + 1) % self.fighters.len())
    }

    // --- save / restore ---

    pub fn snapshot(&self) -> MatchSave {
        MatchSave {
            fighters: self.fighters.iter().map(Fighter::snapshot).collect(),
        }
    }

    /// Restore fighters from a save. Fighter count must match; each
    /// fighter resumes on a neutral footing at the saved position.
    pub fn apply_save(&mut self, save: &MatchSave) -> Result<()> {
        if save.fighters.len() != self.fighters.len() {
            return Err(ScrimError::SaveError(format!(
                "save holds {} fighters, session has {}",
                save.fighters.len(),
                self.fighters.len()
            )));
        }
        for (fighter, snap) in self.fighters.iter_mut().zip(&save.fighters) {
            fighter.restore(snap)?;
        }
        for (reported, fighter) in self.defeated_reported.iter_mut().zip(&self.fighters) {
            *reported = fighter.is_defeated();
        }
        self.over = self.defeated_reported.iter().any(|&r| r);
        self.pending.clear();
        Ok(())
    }
}

/// Mutable references to two distinct fighters.
fn pair_mut(fighters: &mut [Fighter], i: usize, j: usize) -> (&mut Fighter, &mut Fighter) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = fighters.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = fighters.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
