//! Visual-effect spawn points
//!
//! The simulation only decides where and what kind of effect to spawn;
//! rendering them is the host's job. `EffectSink` is the fire-and-forget
//! boundary the session calls through.

use scrim_core::Vec2;

/// Kinds of visual feedback the simulation can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    HitSpark,
    BlockFlash,
    ParryFlash,
    SlamShockwave,
}

/// Receives effect spawn requests. No return value; the core never
/// depends on whether an effect was actually drawn.
pub trait EffectSink {
    fn spawn(&mut self, at: Vec2, kind: EffectKind);
}

/// Discards every effect. For headless simulation and tests that don't
/// care about visuals.
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn spawn(&mut self, _at: Vec2, _kind: EffectKind) {}
}

/// Records every spawn request, for tests and replay capture.
#[derive(Default)]
pub struct RecordingEffects {
    pub spawned: Vec<(Vec2, EffectKind)>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.spawned.iter().filter(|(_, k)| *k == kind).count()
    }
}

impl EffectSink for RecordingEffects {
    fn spawn(&mut self, at: Vec2, kind: EffectKind) {
        self.spawned.push((at, kind));
    }
}
