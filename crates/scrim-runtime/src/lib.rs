//! Scrim Runtime - the simulation loop around the fighters
//!
//! A `MatchSession` owns the arena, the obstacle field, and the fighter
//! registry, applies input commands, advances every fighter once per
//! frame, and publishes what happened as `MatchEvent`s and effect spawn
//! requests. `GameClock` gives the host a fixed-timestep accumulator,
//! and `MatchSave` persists the minimal fighter state as TOML.

pub mod clock;
pub mod effects;
pub mod event;
pub mod event_bus;
pub mod save;
pub mod session;

pub use clock::GameClock;
pub use effects::{EffectKind, EffectSink, NullEffects, RecordingEffects};
pub use event::MatchEvent;
pub use event_bus::EventBus;
pub use save::MatchSave;
pub use session::{Command, MatchSession};
