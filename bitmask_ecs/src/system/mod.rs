//! Utilities for *systems* in ECS.

use std::any::type_name;
use std::cell::{Ref, RefMut};
use std::marker::PhantomData;

use crate::command::Commands;
use crate::component::ComponentManager;
use crate::error::Result;
use crate::{Component, Entity};

pub use processor::*;
pub use signature::Signature;

mod processor;
mod signature;

/// Objects of this trait represent *system* of ECS.
///
/// The system is called once per tick for each entity which has
/// every component type of its [`Signature`].
///
pub trait System: 'static {
    /// Component types which are required by this system.
    type Signature: Signature;

    /// Human readable name of the system.
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// Handles one entity which matches signature of the system.
    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()>;
}

/// Object safe part of [`System`] which is stored by [`SystemProcessor`].
pub(crate) trait AnySystem {
    fn name(&self) -> &str;

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()>;
}

impl<S> AnySystem for S
where
    S: System,
{
    fn name(&self) -> &str {
        System::name(self)
    }

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()> {
        System::process_entity(self, ctx, entity)
    }
}

/// Capabilities of the system while it handles an entity.
///
/// Components of any type can be read or mutated in place,
/// structural changes can only be recorded to [`Commands`].
///
pub struct Context<'a> {
    delta_time: f32,
    components: &'a ComponentManager,
    commands: &'a mut Commands,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        delta_time: f32,
        components: &'a ComponentManager,
        commands: &'a mut Commands,
    ) -> Self {
        Self {
            delta_time,
            components,
            commands,
        }
    }

    /// Time in seconds passed since the previous tick, as supplied by the caller.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn component<T>(&self, entity: Entity) -> Result<Ref<'a, T>>
    where
        T: Component,
    {
        self.components.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn component_mut<T>(&self, entity: Entity) -> Result<RefMut<'a, T>>
    where
        T: Component,
    {
        self.components.get_mut(entity)
    }

    /// Queue of structural changes which will be applied after the current tick.
    pub fn commands(&mut self) -> &mut Commands {
        self.commands
    }
}

/// A [`System`] backed by a function or closure.
pub struct FnSystem<S, F>
where
    S: Signature,
    F: FnMut(&mut Context<'_>, Entity) -> Result<()> + 'static,
{
    name: &'static str,
    function: F,
    signature: PhantomData<fn() -> S>,
}

impl<S, F> FnSystem<S, F>
where
    S: Signature,
    F: FnMut(&mut Context<'_>, Entity) -> Result<()> + 'static,
{
    /// Creates new system with given name which calls `function` for each matching entity.
    pub fn new(name: &'static str, function: F) -> Self {
        Self {
            name,
            function,
            signature: PhantomData,
        }
    }
}

impl<S, F> System for FnSystem<S, F>
where
    S: Signature,
    F: FnMut(&mut Context<'_>, Entity) -> Result<()> + 'static,
{
    type Signature = S;

    fn name(&self) -> &str {
        self.name
    }

    fn process_entity(&mut self, ctx: &mut Context<'_>, entity: Entity) -> Result<()> {
        (self.function)(ctx, entity)
    }
}
