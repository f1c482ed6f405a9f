//! Entity Component System (ECS) utilities for game engine.
//!
//! Components of each type live in their own dense storage,
//! every entity carries a bitmask of its component types,
//! and systems are run over exactly those entities whose mask
//! contains every component type the system requires.

pub use command::Commands;
pub use component::{Component, ComponentId, ComponentManager, ComponentMask, ComponentStorage, Slot};
pub use config::{StorageConfig, WorldConfig};
pub use entity::{Entity, EntityRegistry};
pub use error::{EcsError, Result};
pub use system::{Context, FnSystem, ProcessorState, Signature, System, SystemId, SystemProcessor};
pub use world::World;

pub mod command;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod system;
mod world;
