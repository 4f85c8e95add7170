//! Scrim Fighter - the fighter entity and its combat model
//!
//! A `Fighter` owns its action state machine (attacks, guards, parries,
//! dodges, special moves), its timers, its skeletal rig, and the
//! procedural pose composer that drives it. Hit resolution runs
//! directly against the opponent; the session layer turns the returned
//! outcomes into events and visual effects.

pub mod combat;
pub mod composer;
pub mod fighter;
pub mod rig;

pub use combat::{
    attack_damage, attack_range, knockback, AttackKind, CombatOutcome, ComboState, SpecialKind,
    StrikeKind,
};
pub use composer::{OverrideKind, PoseComposer, Posture};
pub use fighter::{AttackAttempt, Fighter, FighterSnapshot};
pub use rig::{forward_probe_rect, FighterRig, JointPositions, Limb, LimbHitboxes};
