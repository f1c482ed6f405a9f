//! Utilities for *entities* in ECS.

use std::fmt;
use std::num::NonZeroU32;

use crate::component::ComponentMask;
use crate::error::{EcsError, Result};

/// Unique identifier of the *entity* of ECS.
///
/// Identifiers start at 1 and are never reused during the lifetime of the world,
/// so zero can be used by callers as "no entity".
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Entity(NonZeroU32);

impl Entity {
    /// Creates entity from raw identifier, if it is not zero.
    pub fn from_id(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Raw identifier of the entity.
    pub fn id(self) -> u32 {
        self.0.get()
    }

    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Storage for all entities of ECS together with their component masks.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    /// Mask of entity with id `N` lives at index `N - 1`.
    masks: Vec<ComponentMask>,
}

impl EntityRegistry {
    /// Creates an empty entity registry.
    pub fn new() -> Self {
        Self { masks: Vec::new() }
    }

    /// Issues fresh entity without any components.
    pub fn create(&mut self) -> Entity {
        self.masks.push(ComponentMask::empty());
        let id = u32::try_from(self.masks.len())
            .ok()
            .and_then(NonZeroU32::new)
            .expect("entity identifier space is exhausted");
        Entity(id)
    }

    /// Returns `true` if the entity was issued by this registry.
    pub fn contains(&self, entity: Entity) -> bool {
        entity.index() < self.masks.len()
    }

    /// Current component mask of the entity.
    pub fn mask(&self, entity: Entity) -> Option<ComponentMask> {
        self.masks.get(entity.index()).copied()
    }

    /// Adds bits of `mask` to the mask of the entity.
    ///
    /// Returns updated mask of the entity.
    ///
    pub fn insert_bits(&mut self, entity: Entity, mask: ComponentMask) -> Result<ComponentMask> {
        let current = self
            .masks
            .get_mut(entity.index())
            .ok_or(EcsError::UnknownEntity(entity))?;
        *current |= mask;
        Ok(*current)
    }

    /// Count of entities issued so far.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Returns `true` if no entity was issued yet.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Returns iterator over all entities with their masks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, ComponentMask)> + '_ {
        self.masks
            .iter()
            .zip(1..)
            .filter_map(|(mask, id)| Some((Entity::from_id(id)?, *mask)))
    }
}
