//! Headless frame driver for the bitmask ECS.

use std::error::Error;
use std::io;
use std::rc::Rc;

use bitmask_ecs::World;
use winit::event::VirtualKeyCode;

use components::{Position, Velocity};
use config::Config;
use input::{InputScript, KeyboardState};
use systems::{ConsoleRenderSystem, ControllerSystem, MoverSystem};

mod components;
mod config;
mod input;
mod logger;
mod systems;

/// Entry point of the demo: drives the world for a fixed count of frames.
///
/// The first argument, if any, overrides the count of frames.
/// The second one, if any, limits capacity of every component storage.
///
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let mut args = std::env::args().skip(1);
    let mut config = Config::default();
    if let Some(frames) = args.next() {
        config = config.with_frames(frames.parse()?);
    }
    if let Some(capacity_limit) = args.next() {
        config = config.with_capacity_limit(Some(capacity_limit.parse()?));
    }

    let _handle = logger::init(&config)?;
    log::info!("logger initialized successfully");
    log::info!("starting {} v{}", config.name(), config.version());

    let keyboard = Rc::new(KeyboardState::new());
    let mut world = World::with_config(config.world_config());
    world.register_system(MoverSystem)?;
    world.register_system(ControllerSystem::new(Rc::clone(&keyboard), config.speed()))?;
    world.register_system(ConsoleRenderSystem::new(io::stdout()))?;

    let entity = world.create_entity();
    world.add_default_component::<Position>(entity)?;
    world.add_component(entity, Velocity::default())?;

    let frames = config.frames();
    let script = InputScript::default()
        .hold(VirtualKeyCode::D, frames / 6, frames / 2)
        .hold(VirtualKeyCode::A, frames / 2, frames * 5 / 6);

    for frame in 0..frames {
        script.replay(frame, &keyboard);
        let held = keyboard.held();
        if !held.is_empty() {
            log::debug!("frame {}: held {:?}", frame, held);
        }
        world.process(config.delta_time())?;
    }

    let position = world.component::<Position>(entity)?.0;
    log::info!(
        "finished after {} frames, final position ({:.3}, {:.3}, {:.3})",
        world.tick(),
        position.x,
        position.y,
        position.z,
    );
    Ok(())
}
