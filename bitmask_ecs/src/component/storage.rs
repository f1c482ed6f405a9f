//! Utilities for dense storage of **components** of ECS.

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};

use crate::config::StorageConfig;
use crate::error::{EcsError, Result};
use crate::Entity;

use super::Component;

/// Position of the component inside of its [`ComponentStorage`].
///
/// Slots start at 1, so the first slot of each storage is never issued.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Slot(NonZeroUsize);

impl Slot {
    fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    /// Raw 1-based value of the slot.
    pub fn get(self) -> usize {
        self.0.get()
    }

    fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage for statically typed components of ECS.
pub struct ComponentStorage<T>
where
    T: Component,
{
    /// Components are actually stored here, slot `N` at index `N - 1`.
    components: Vec<T>,
    entity_to_slot: HashMap<Entity, Slot>,
    slot_to_entity: Vec<Entity>,
    capacity_limit: Option<usize>,
}

impl<T> ComponentStorage<T>
where
    T: Component,
{
    /// Creates an empty component storage with default configuration.
    pub fn new() -> Self {
        Self::with_config(&StorageConfig::default())
    }

    /// Creates an empty component storage with given configuration.
    pub fn with_config(config: &StorageConfig) -> Self {
        let capacity = match config.capacity_limit {
            Some(limit) => config.initial_capacity.min(limit),
            None => config.initial_capacity,
        };
        Self {
            components: Vec::with_capacity(capacity),
            entity_to_slot: HashMap::with_capacity(capacity),
            slot_to_entity: Vec::with_capacity(capacity),
            capacity_limit: config.capacity_limit,
        }
    }

    /// Stores component and attaches it to the entity.
    /// If component was already attached, it is replaced by value in its slot.
    ///
    /// Returns slot of the component.
    ///
    /// # Errors
    ///
    /// [`EcsError::StorageExhausted`] is returned if new slot is needed
    /// but capacity limit of the storage was reached.
    ///
    pub fn store(&mut self, entity: Entity, component: T) -> Result<Slot> {
        if let Some(&slot) = self.entity_to_slot.get(&entity) {
            self.components[slot.index()] = component;
            return Ok(slot);
        }

        let index = self.components.len();
        if let Some(capacity) = self.capacity_limit {
            if index >= capacity {
                log::warn!(
                    "storage of `{}` is full, cannot attach component to {}",
                    type_name::<T>(),
                    entity,
                );
                return Err(EcsError::StorageExhausted {
                    component: type_name::<T>(),
                    capacity,
                });
            }
        }
        if index == self.components.capacity() {
            log::trace!(
                "growing storage of `{}` beyond {} components",
                type_name::<T>(),
                index,
            );
        }

        let slot = Slot::from_index(index);
        self.components.push(component);
        self.slot_to_entity.push(entity);
        self.entity_to_slot.insert(entity, slot);
        Ok(slot)
    }

    /// Slot of component attached to the entity.
    pub fn slot_of(&self, entity: Entity) -> Option<Slot> {
        self.entity_to_slot.get(&entity).copied()
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn attached(&self, entity: Entity) -> bool {
        self.entity_to_slot.contains_key(&entity)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let slot = self.slot_of(entity)?;
        self.components.get(slot.index())
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = self.slot_of(entity)?;
        self.components.get_mut(slot.index())
    }

    /// Same as [`get`](Self::get), but fails with [`EcsError::ComponentNotFound`].
    pub fn component(&self, entity: Entity) -> Result<&T> {
        self.get(entity).ok_or_else(|| not_found::<T>(entity))
    }

    /// Same as [`get_mut`](Self::get_mut), but fails with [`EcsError::ComponentNotFound`].
    pub fn component_mut(&mut self, entity: Entity) -> Result<&mut T> {
        self.get_mut(entity).ok_or_else(|| not_found::<T>(entity))
    }

    /// Count of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Count of components which can be stored without reallocation.
    pub fn capacity(&self) -> usize {
        self.components.capacity()
    }

    /// Returns immutable iterator over all components with their entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slot_to_entity.iter().copied().zip(self.components.iter())
    }

    /// Returns mutable iterator over all components with their entities in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.slot_to_entity
            .iter()
            .copied()
            .zip(self.components.iter_mut())
    }

    /// Returns iterator over all entities which have component of this type.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slot_to_entity.iter().copied()
    }
}

impl<T> Default for ComponentStorage<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Entity> for ComponentStorage<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, entity: Entity) -> &Self::Output {
        self.get(entity)
            .expect("there is no component attached to the entity")
    }
}

impl<T> IndexMut<Entity> for ComponentStorage<T>
where
    T: Component,
{
    fn index_mut(&mut self, entity: Entity) -> &mut Self::Output {
        self.get_mut(entity)
            .expect("there is no component attached to the entity")
    }
}

pub(crate) fn not_found<T>(entity: Entity) -> EcsError
where
    T: Component,
{
    EcsError::ComponentNotFound {
        entity,
        component: type_name::<T>(),
    }
}
