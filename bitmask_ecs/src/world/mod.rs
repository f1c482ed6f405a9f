//! Utilities for storage of ECS.

use std::cell::{Ref, RefMut};
use std::mem;

use crate::command::Commands;
use crate::component::{Component, ComponentManager, ComponentMask};
use crate::config::WorldConfig;
use crate::entity::{Entity, EntityRegistry};
use crate::error::{EcsError, Result};
use crate::system::{System, SystemId, SystemProcessor};


/// Storage for entities, components and systems of ECS.
///
/// Every component addition updates mask of the entity
/// and enrolls the entity into each system it now satisfies.
///
#[derive(Default)]
pub struct World {
    /// Storage for all entities with their masks.
    entities: EntityRegistry,
    /// Storages of components and registry of their types.
    components: ComponentManager,
    /// Registered systems in order of execution.
    systems: SystemProcessor,
    /// Structural changes recorded by systems during current tick.
    commands: Commands,
    tick: u64,
}

impl World {
    /// Creates an empty world with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world with given configuration.
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            components: ComponentManager::with_config(config.storage),
            ..Self::default()
        }
    }

    /// Creates new entity without components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        // Systems with empty signature handle every entity.
        self.systems.entity_changed_mask(entity, ComponentMask::empty());
        entity
    }

    /// Attaches component to the entity, replacing previous one of the same type.
    ///
    /// # Errors
    ///
    /// Fails if the entity was not created by this world,
    /// if there is no free mask bit for a new component type
    /// or if storage of the component type is exhausted.
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> Result<()>
    where
        T: Component,
    {
        if !self.entities.contains(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        let (id, _) = self.components.insert(entity, component)?;
        let mask = self.entities.insert_bits(entity, ComponentMask::from(id))?;
        self.systems.entity_changed_mask(entity, mask);
        Ok(())
    }

    /// Attaches default value of component type `T` to the entity.
    pub fn add_default_component<T>(&mut self, entity: Entity) -> Result<()>
    where
        T: Component + Default,
    {
        self.add_component(entity, T::default())
    }

    /// Registers the system which will run after all previously registered ones.
    pub fn register_system<S>(&mut self, system: S) -> Result<SystemId>
    where
        S: System,
    {
        self.systems.register(
            system,
            self.components.registry_mut(),
            self.entities.iter(),
        )
    }

    /// Runs every registered system once with given time step in seconds,
    /// then applies structural changes recorded by the systems.
    ///
    /// # Errors
    ///
    /// If any system fails, the tick is aborted: commands recorded so far are discarded
    /// and the tick counter is not advanced.
    ///
    pub fn process(&mut self, delta_time: f32) -> Result<()> {
        log::trace!("processing tick {} with delta time {}", self.tick, delta_time);
        let processed = self
            .systems
            .process(delta_time, &self.components, &mut self.commands);

        let commands = mem::take(&mut self.commands);
        if let Err(error) = processed {
            if !commands.is_empty() {
                log::warn!(
                    "tick {} aborted, discarding {} deferred commands",
                    self.tick,
                    commands.len(),
                );
            }
            return Err(error);
        }
        if !commands.is_empty() {
            log::trace!("applying {} deferred commands", commands.len());
        }
        commands.apply(self)?;
        self.tick += 1;
        Ok(())
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn component<T>(&self, entity: Entity) -> Result<Ref<'_, T>>
    where
        T: Component,
    {
        self.components.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn component_mut<T>(&self, entity: Entity) -> Result<RefMut<'_, T>>
    where
        T: Component,
    {
        self.components.get_mut(entity)
    }

    /// Current component mask of the entity.
    pub fn mask(&self, entity: Entity) -> Option<ComponentMask> {
        self.entities.mask(entity)
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn components(&self) -> &ComponentManager {
        &self.components
    }

    pub fn systems(&self) -> &SystemProcessor {
        &self.systems
    }

    /// Structural changes waiting for the end of current tick.
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    /// Count of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
