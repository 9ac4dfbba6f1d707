use glam::Vec3;
use log::{info, warn};

use crate::config::GameConfig;
use crate::events::{EffectsSink, GameEvent};
use crate::player::input::{ControlState, LookDelta, LookFilter};
use crate::player::physics::PlayerBody;
use crate::player::targeting;
use crate::world::block::BlockKind;
use crate::world::generator::TerrainGenerator;
use crate::world::store::VoxelWorld;

const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);

/// One play session: the world, the player and the selected block kind,
/// advanced by an external frame loop. Collaborators are injected; nothing
/// is reached through globals.
pub struct Session {
    config: GameConfig,
    world: VoxelWorld,
    player: PlayerBody,
    look_filter: LookFilter,
    effects: Box<dyn EffectsSink>,
    selected: BlockKind,
    running: bool,
    event_buffer: Vec<GameEvent>,
}

impl Session {
    pub fn new(config: GameConfig, effects: Box<dyn EffectsSink>) -> Self {
        let mut world = VoxelWorld::new();
        TerrainGenerator::new(config.worldgen.clone()).generate(&mut world);

        let player = PlayerBody::new(SPAWN_POSITION, &config.gameplay);
        info!("session ready, player spawned at {}", SPAWN_POSITION);

        Self {
            config,
            world,
            player,
            look_filter: LookFilter::default(),
            effects,
            selected: BlockKind::Grass,
            running: true,
            event_buffer: Vec::new(),
        }
    }

    /// Advance one frame: apply look input, integrate physics, forward the
    /// step's notifications. Does nothing while stopped.
    pub fn step(&mut self, controls: &ControlState, look: LookDelta) {
        if !self.running {
            return;
        }

        self.look_filter.push(look);
        self.player.apply_look(self.look_filter.drain());

        self.event_buffer.clear();
        self.player
            .step(controls, &self.world, &mut self.event_buffer);

        for i in 0..self.event_buffer.len() {
            let event = self.event_buffer[i];
            self.notify(&event);
        }
    }

    /// Break the block the player is aiming at. Returns whether a block was
    /// removed.
    pub fn break_block(&mut self) -> bool {
        let removed = targeting::remove_block(
            &mut self.world,
            &self.player,
            self.config.gameplay.max_reach,
        );
        if let Some(block) = removed {
            self.notify(&GameEvent::BlockRemoved {
                kind: block.kind,
                position: block.position,
            });
        }
        removed.is_some()
    }

    /// Place the currently selected block against the targeted face.
    /// Returns whether a block was placed.
    pub fn place_block(&mut self) -> bool {
        targeting::place_block(
            &mut self.world,
            &self.player,
            self.selected,
            self.config.gameplay.max_reach,
        )
    }

    pub fn select_block(&mut self, kind: BlockKind) {
        self.selected = kind;
    }

    /// Read-only export for HUD display.
    pub fn selected_block(&self) -> BlockKind {
        self.selected
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Withhold future steps; the last committed state stays intact.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// A sink failure is logged and discarded; it never aborts a step or
    /// rolls back a mutation.
    fn notify(&mut self, event: &GameEvent) {
        if let Err(err) = self.effects.notify(event) {
            warn!("effects notification dropped: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EffectsError, NullEffects};
    use glam::IVec3;
    use std::cell::RefCell;
    use std::f32::consts::FRAC_PI_2;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<GameEvent>>>,
    }

    impl EffectsSink for Recorder {
        fn notify(&mut self, event: &GameEvent) -> Result<(), EffectsError> {
            self.events.borrow_mut().push(*event);
            Ok(())
        }
    }

    struct FailingSink;

    impl EffectsSink for FailingSink {
        fn notify(&mut self, _event: &GameEvent) -> Result<(), EffectsError> {
            Err(EffectsError::Rejected("sink offline".into()))
        }
    }

    fn test_session(effects: Box<dyn EffectsSink>) -> Session {
        let mut session = Session::new(GameConfig::default(), effects);
        // Deterministic stage: a single block straight below the spawn.
        session.world = VoxelWorld::new();
        session.world.add_block(BlockKind::Grass, IVec3::ZERO);
        session.player.pitch = -(FRAC_PI_2 - 0.1);
        session
    }

    #[test]
    fn test_break_block_emits_removal_event() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = test_session(Box::new(Recorder {
            events: events.clone(),
        }));

        assert!(session.break_block());
        assert!(session.world.is_empty());
        assert!(matches!(
            events.borrow()[0],
            GameEvent::BlockRemoved {
                kind: BlockKind::Grass,
                position,
            } if position == IVec3::ZERO
        ));
    }

    #[test]
    fn test_place_block_uses_selected_kind() {
        let mut session = test_session(Box::new(NullEffects));
        session.select_block(BlockKind::Stone);

        assert!(session.place_block());
        let placed = session.world.block_at_cell(IVec3::new(0, 1, 0)).unwrap();
        assert_eq!(placed.kind, BlockKind::Stone);
    }

    #[test]
    fn test_sink_failure_does_not_abort_mutation() {
        let mut session = test_session(Box::new(FailingSink));

        assert!(session.break_block());
        assert!(session.world.is_empty());
    }

    #[test]
    fn test_stopped_session_withholds_steps() {
        let mut session = test_session(Box::new(NullEffects));
        session.stop();

        let before = session.player.position;
        let walk = ControlState {
            forward: true,
            ..Default::default()
        };
        for _ in 0..10 {
            session.step(&walk, LookDelta::default());
        }
        assert_eq!(session.player.position, before);

        session.start();
        session.step(&walk, LookDelta::default());
        assert_ne!(session.player.position, before);
    }

    #[test]
    fn test_selected_block_defaults_to_grass() {
        let session = test_session(Box::new(NullEffects));
        assert_eq!(session.selected_block(), BlockKind::Grass);
    }

    #[test]
    fn test_walking_forwards_footstep_events_to_sink() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::new(
            GameConfig::default(),
            Box::new(Recorder {
                events: events.clone(),
            }),
        );
        // Deterministic stage: a strip of grass carries the walk.
        session.world = VoxelWorld::new();
        for z in -1..=12 {
            session.world.add_block(BlockKind::Grass, IVec3::new(0, 0, z));
        }

        let idle = ControlState::default();
        for _ in 0..100 {
            session.step(&idle, LookDelta::default());
        }
        assert!(session.player.on_ground);

        let walk = ControlState {
            forward: true,
            ..Default::default()
        };
        for _ in 0..40 {
            session.step(&walk, LookDelta::default());
        }

        assert!(events
            .borrow()
            .iter()
            .any(|e| matches!(e, GameEvent::Footstep { .. })));
    }
}
