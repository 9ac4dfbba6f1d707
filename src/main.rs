use anyhow::Result;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use boxel::{
    config::GameConfig,
    events::{EffectsError, EffectsSink, GameEvent},
    player::input::{ControlState, LookDelta},
    session::Session,
    world::BlockKind,
};

const CONFIG_PATH: &str = "boxel.toml";

/// Sink that reports effects through the logger, standing in for the
/// particle and audio collaborators in this headless demo.
struct LogEffects;

impl EffectsSink for LogEffects {
    fn notify(&mut self, event: &GameEvent) -> Result<(), EffectsError> {
        info!("effect: {:?}", event);
        Ok(())
    }
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = match GameConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            info!("no usable config at {} ({}), using defaults", CONFIG_PATH, err);
            GameConfig::default()
        }
    };

    let mut session = Session::new(config, Box::new(LogEffects));

    // Let the player settle onto the terrain, then take a short run.
    let idle = ControlState::default();
    for _ in 0..60 {
        session.step(&idle, LookDelta::default());
    }

    let run = ControlState {
        forward: true,
        run: true,
        ..Default::default()
    };
    for _ in 0..120 {
        session.step(&run, LookDelta::new(0.005, 0.0));
    }

    // Look down, break whatever is underfoot, cap the hole with stone.
    for _ in 0..40 {
        session.step(&idle, LookDelta::new(0.0, 0.035));
    }
    if session.break_block() {
        session.select_block(BlockKind::Stone);
        if session.place_block() {
            info!("capped the hole with {}", session.selected_block().name());
        }
    }

    let player = session.player();
    info!(
        "demo finished: player at ({:.2}, {:.2}, {:.2}), {} blocks in world",
        player.position.x,
        player.position.y,
        player.position.z,
        session.world().len(),
    );

    session.stop();
    Ok(())
}
