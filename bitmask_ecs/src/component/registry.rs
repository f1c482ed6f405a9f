//! Utilities for assigning identifiers to component types.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use crate::error::{EcsError, Result};

use super::{Component, ComponentId, ComponentMask};

/// Registry of all component types known to ECS.
///
/// Identifiers are assigned in order of first request, starting from 0,
/// and never change afterwards.
///
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Returns identifier of component type `T`, assigning the next free one
    /// on the first call for this type.
    ///
    /// # Errors
    ///
    /// [`EcsError::MaskOverflow`] is returned if all bits of [`ComponentMask`] are already taken.
    /// No identifier is consumed in that case.
    ///
    pub fn register<T>(&mut self) -> Result<ComponentId>
    where
        T: Component,
    {
        self.register_type(TypeId::of::<T>(), type_name::<T>())
    }

    /// Registers all given types at once and returns mask of them all.
    ///
    /// # Errors
    ///
    /// [`EcsError::MaskOverflow`] is returned if there are not enough free bits
    /// for every new type of the set. No type of the set is registered in that case.
    ///
    pub fn register_all(&mut self, types: &[(TypeId, &'static str)]) -> Result<ComponentMask> {
        let mut missing: Vec<(TypeId, &'static str)> = Vec::new();
        for &(typeid, component) in types {
            if !self.ids.contains_key(&typeid) && !missing.iter().any(|&(id, _)| id == typeid) {
                missing.push((typeid, component));
            }
        }
        if let Some(&(_, component)) = missing.get(ComponentMask::BITS.saturating_sub(self.len())) {
            log::warn!(
                "no free mask bits left for {} new components starting with `{}`",
                missing.len(),
                missing[0].1,
            );
            return Err(EcsError::MaskOverflow {
                component,
                limit: ComponentMask::BITS,
            });
        }

        let mut mask = ComponentMask::empty();
        for &(typeid, component) in types {
            mask |= ComponentMask::from(self.register_type(typeid, component)?);
        }
        Ok(mask)
    }

    fn register_type(&mut self, typeid: TypeId, component: &'static str) -> Result<ComponentId> {
        if let Some(&id) = self.ids.get(&typeid) {
            return Ok(id);
        }

        let index = self.names.len();
        if index >= ComponentMask::BITS {
            log::warn!("no free mask bit left for component `{}`", component);
            return Err(EcsError::MaskOverflow {
                component,
                limit: ComponentMask::BITS,
            });
        }
        let id = ComponentId::new(index as u8);
        self.ids.insert(typeid, id);
        self.names.push(component);
        log::debug!("component `{}` registered with id {}", component, index);
        Ok(id)
    }

    /// Returns single-bit mask of component type `T`, registering it if needed.
    pub fn mask_of<T>(&mut self) -> Result<ComponentMask>
    where
        T: Component,
    {
        self.register::<T>().map(ComponentMask::from)
    }

    /// Returns identifier of component type `T` if it was registered before.
    pub fn id_of<T>(&self) -> Option<ComponentId>
    where
        T: Component,
    {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Name of the component type with given identifier.
    pub fn name_of(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.index()).copied()
    }

    /// Count of registered component types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
