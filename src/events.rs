use glam::{IVec3, Vec3};
use thiserror::Error;

use crate::world::block::BlockKind;

/// Discrete notifications for the effects boundary (particles, footstep and
/// splash feedback). Fire-and-forget: the core never depends on their
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BlockRemoved { kind: BlockKind, position: IVec3 },
    Footstep { position: Vec3, ground: BlockKind },
    EnteredWater { position: Vec3 },
}

#[derive(Error, Debug)]
pub enum EffectsError {
    #[error("effects sink rejected event: {0}")]
    Rejected(String),
}

/// Seam to the particle/audio collaborators. A failed notification is
/// returned to the caller, which logs and discards it; it must never leak
/// back into world or player state.
pub trait EffectsSink {
    fn notify(&mut self, event: &GameEvent) -> Result<(), EffectsError>;
}

/// Sink that drops every event, for headless and test sessions.
#[derive(Debug, Default)]
pub struct NullEffects;

impl EffectsSink for NullEffects {
    fn notify(&mut self, _event: &GameEvent) -> Result<(), EffectsError> {
        Ok(())
    }
}
