//! Utilities for managing component storages.

use std::any::type_name;
use std::cell::{Ref, RefCell, RefMut};

use anymap2::AnyMap;

use crate::config::StorageConfig;
use crate::error::{EcsError, Result};
use crate::Entity;

use super::{not_found, Component, ComponentId, ComponentRegistry, ComponentStorage, Slot};

/// Manager of all components of ECS.
///
/// Each component type has its own storage. Storages are borrowed independently,
/// so mutable references to components of different types can be held at once.
///
pub struct ComponentManager {
    registry: ComponentRegistry,
    /// Values are `RefCell<ComponentStorage<T>>` keyed by their own type.
    storages: AnyMap,
    config: StorageConfig,
}

impl ComponentManager {
    /// Creates new component manager.
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    /// Creates new component manager which configures every storage it creates with `config`.
    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            storages: AnyMap::new(),
            config,
        }
    }

    /// Inserts component of type `T` and attaches it to the entity.
    /// If component was already attached, it will be replaced by value.
    ///
    /// Returns identifier of component type and slot of the component in its storage.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Result<(ComponentId, Slot)>
    where
        T: Component,
    {
        let id = self.registry.register::<T>()?;
        let config = &self.config;
        let storage = self
            .storages
            .entry::<RefCell<ComponentStorage<T>>>()
            .or_insert_with(|| RefCell::new(ComponentStorage::with_config(config)));
        let slot = storage.get_mut().store(entity, component)?;
        Ok((id, slot))
    }

    /// Returns `true` if component of type `T` was already attached to the entity.
    pub fn attached<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.storage_cell::<T>()
            .and_then(|storage| storage.try_borrow().ok())
            .map(|storage| storage.attached(entity))
            .unwrap_or(false)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Result<Ref<'_, T>>
    where
        T: Component,
    {
        let storage = self
            .storage_cell::<T>()
            .ok_or_else(|| not_found::<T>(entity))?
            .try_borrow()
            .map_err(|_| borrowed::<T>())?;
        Ref::filter_map(storage, |storage| storage.get(entity)).map_err(|_| not_found::<T>(entity))
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    ///
    /// Changes made through the reference are visible to every later lookup.
    ///
    pub fn get_mut<T>(&self, entity: Entity) -> Result<RefMut<'_, T>>
    where
        T: Component,
    {
        let storage = self
            .storage_cell::<T>()
            .ok_or_else(|| not_found::<T>(entity))?
            .try_borrow_mut()
            .map_err(|_| borrowed::<T>())?;
        RefMut::filter_map(storage, |storage| storage.get_mut(entity))
            .map_err(|_| not_found::<T>(entity))
    }

    /// Retrieves storage of component type `T`, if any component of this type was inserted.
    pub fn storage<T>(&self) -> Option<Ref<'_, ComponentStorage<T>>>
    where
        T: Component,
    {
        self.storage_cell::<T>()?.try_borrow().ok()
    }

    /// Registry of component types known to this manager.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    fn storage_cell<T>(&self) -> Option<&RefCell<ComponentStorage<T>>>
    where
        T: Component,
    {
        self.storages.get::<RefCell<ComponentStorage<T>>>()
    }
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new()
    }
}

fn borrowed<T>() -> EcsError
where
    T: Component,
{
    EcsError::ComponentBorrowed {
        component: type_name::<T>(),
    }
}
