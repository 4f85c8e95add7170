//! Match events published on the bus for observers (UI, AI, diagnostics)

use scrim_fighter::StrikeKind;

/// Everything a match can notify observers about. Fighters are
/// identified by their session index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchEvent {
    /// A strike connected and damage was applied.
    PlayerHit {
        attacker: usize,
        defender: usize,
        kind: StrikeKind,
        damage: f32,
        guarded: bool,
    },
    /// A fighter's health reached zero. Emitted once per fighter.
    PlayerDefeated { index: usize },
    /// A defender parried an incoming strike.
    ParrySucceeded { attacker: usize, defender: usize },
    /// A ground slam resolved its landing AOE.
    GroundSlamImpact { attacker: usize },
    /// A same-kind attack chain reached `count` within the combo window.
    ComboPerformed { index: usize, count: u32 },
    /// A fighter picked up a powerup; `heal` is the health restored.
    PowerupCollected { index: usize, heal: f32 },
}
