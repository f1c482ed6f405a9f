//! Systems of the demo.

use std::io::Write;
use std::rc::Rc;

use bitmask_ecs::{Context, Entity, Result, System};
use ultraviolet::Vec3;
use winit::event::VirtualKeyCode;

use crate::components::{Position, Velocity};
use crate::input::KeyboardState;

/// Moves entities along their velocity.
#[derive(Debug, Default)]
pub struct MoverSystem;

impl MoverSystem {
    /// Advances position by velocity over `delta_time` seconds.
    pub fn update(position: &mut Position, velocity: &Velocity, delta_time: f32) {
        position.0 += velocity.0 * delta_time;
    }
}

impl System for MoverSystem {
    type Signature = (Position, Velocity);

    fn name(&self) -> &str {
        "mover"
    }

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()> {
        let mut position = ctx.component_mut::<Position>(entity)?;
        let velocity = ctx.component::<Velocity>(entity)?;
        Self::update(&mut position, &velocity, ctx.delta_time());
        Ok(())
    }
}

/// Sets horizontal velocity from held keys: `A` moves left, `D` moves right.
pub struct ControllerSystem {
    keyboard: Rc<KeyboardState>,
    speed: f32,
}

impl ControllerSystem {
    pub fn new(keyboard: Rc<KeyboardState>, speed: f32) -> Self {
        Self { keyboard, speed }
    }
}

impl System for ControllerSystem {
    type Signature = (Velocity,);

    fn name(&self) -> &str {
        "controller"
    }

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()> {
        let mut velocity = ctx.component_mut::<Velocity>(entity)?;
        velocity.0 = Vec3::zero();
        if self.keyboard.is_key_down(VirtualKeyCode::A) {
            velocity.0.x = -self.speed;
        }
        if self.keyboard.is_key_down(VirtualKeyCode::D) {
            velocity.0.x = self.speed;
        }
        Ok(())
    }
}

/// Prints position of every entity once per frame.
///
/// Rendering is best effort: a failed write is logged as a warning
/// and skipped, it never aborts the tick.
///
pub struct ConsoleRenderSystem<W>
where
    W: Write + 'static,
{
    output: W,
}

impl<W> ConsoleRenderSystem<W>
where
    W: Write + 'static,
{
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W> System for ConsoleRenderSystem<W>
where
    W: Write + 'static,
{
    type Signature = (Position,);

    fn name(&self) -> &str {
        "console render"
    }

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()> {
        let Position(position) = *ctx.component::<Position>(entity)?;
        let line = format!(
            "{}: position ({:.3}, {:.3}, {:.3})",
            entity, position.x, position.y, position.z,
        );
        if let Err(error) = writeln!(self.output, "{}", line) {
            log::warn!("failed to render {}: {}", entity, error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;

    use bitmask_ecs::World;
    use winit::event::ElementState;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.borrow())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_mover_update() {
        let mut position = Position(Vec3::zero());
        let velocity = Velocity(Vec3::new(5.0, 0.0, 0.0));
        MoverSystem::update(&mut position, &velocity, 0.5);
        assert_eq!(position, Position(Vec3::new(2.5, 0.0, 0.0)));
    }

    #[test]
    fn test_mover_in_world() {
        let mut world = World::new();
        world.register_system(MoverSystem).unwrap();

        let entity = world.create_entity();
        world.add_default_component::<Position>(entity).unwrap();
        world
            .add_component(entity, Velocity(Vec3::new(5.0, 0.0, 0.0)))
            .unwrap();
        world.process(0.5).unwrap();

        assert_eq!(
            *world.component::<Position>(entity).unwrap(),
            Position(Vec3::new(2.5, 0.0, 0.0)),
        );
    }

    #[test]
    fn test_controller() {
        let keyboard = Rc::new(KeyboardState::new());
        let mut world = World::new();
        world
            .register_system(ControllerSystem::new(Rc::clone(&keyboard), 100.0))
            .unwrap();

        let entity = world.create_entity();
        world
            .add_component(entity, Velocity(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        world.process(0.1).unwrap();
        assert_eq!(world.component::<Velocity>(entity).unwrap().0, Vec3::zero());

        keyboard.handle(VirtualKeyCode::A, ElementState::Pressed);
        world.process(0.1).unwrap();
        assert_eq!(world.component::<Velocity>(entity).unwrap().0.x, -100.0);

        keyboard.handle(VirtualKeyCode::A, ElementState::Released);
        keyboard.handle(VirtualKeyCode::D, ElementState::Pressed);
        world.process(0.1).unwrap();
        assert_eq!(world.component::<Velocity>(entity).unwrap().0.x, 100.0);
    }

    #[test]
    fn test_console_render() {
        let buffer = SharedBuffer::default();
        let mut world = World::new();
        world
            .register_system(ConsoleRenderSystem::new(buffer.clone()))
            .unwrap();

        let first = world.create_entity();
        world
            .add_component(first, Position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        let second = world.create_entity();
        world.add_default_component::<Velocity>(second).unwrap();

        world.process(1.0).unwrap();
        world.process(1.0).unwrap();
        assert_eq!(
            buffer.lines(),
            vec![
                "Entity(1): position (1.000, 2.000, 3.000)",
                "Entity(1): position (1.000, 2.000, 3.000)",
            ],
        );
    }

    #[test]
    fn test_console_render_write_failure() {
        let mut world = World::new();
        world.register_system(ConsoleRenderSystem::new(BrokenPipe)).unwrap();
        world.register_system(MoverSystem).unwrap();

        let entity = world.create_entity();
        world.add_default_component::<Position>(entity).unwrap();
        world
            .add_component(entity, Velocity(Vec3::new(2.0, 0.0, 0.0)))
            .unwrap();

        world.process(1.0).unwrap();
        assert_eq!(world.tick(), 1);
        assert_eq!(world.component::<Position>(entity).unwrap().0.x, 2.0);
    }
}
