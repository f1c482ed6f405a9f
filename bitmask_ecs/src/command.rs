//! Deferred structural changes of ECS.
//!
//! Systems cannot add components or create entities while the world iterates over them.
//! Instead they record commands which the world applies at the end of the tick,
//! in the order they were recorded.

use std::collections::VecDeque;
use std::fmt;

use crate::error::Result;
use crate::{Component, Entity, World};

type Command = Box<dyn FnOnce(&mut World) -> Result<()>>;

/// Queue of structural changes to apply at the next tick boundary.
#[derive(Default)]
pub struct Commands {
    queue: VecDeque<Command>,
}

impl Commands {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Records attachment of the component to the entity.
    pub fn add_component<T>(&mut self, entity: Entity, component: T)
    where
        T: Component,
    {
        self.push(move |world| world.add_component(entity, component))
    }

    /// Records creation of new entity, which is then passed to `init`.
    pub fn create_entity_with<F>(&mut self, init: F)
    where
        F: FnOnce(&mut World, Entity) -> Result<()> + 'static,
    {
        self.push(move |world| {
            let entity = world.create_entity();
            init(world, entity)
        })
    }

    /// Records arbitrary change of the world.
    pub fn push<F>(&mut self, command: F)
    where
        F: FnOnce(&mut World) -> Result<()> + 'static,
    {
        self.queue.push_back(Box::new(command))
    }

    /// Count of recorded commands.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Applies every recorded command to the world, stopping at the first error.
    ///
    /// Commands recorded after the failing one are dropped.
    ///
    pub(crate) fn apply(self, world: &mut World) -> Result<()> {
        for command in self.queue {
            command(world)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commands")
            .field("len", &self.queue.len())
            .finish()
    }
}
