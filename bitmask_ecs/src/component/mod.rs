//! Utilities for *components* in ECS.

use std::any::Any;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

pub use manager::*;
pub use registry::*;
pub use storage::*;

mod manager;
mod registry;
mod storage;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just POD (plain old data).
///
pub trait Component: Any {}

impl<T> Component for T where T: Any {}

/// Unique identifier of the *component type* of ECS.
///
/// Determines which bit of [`ComponentMask`] the type occupies.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ComponentId(u8);

impl ComponentId {
    pub(crate) const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Index of the bit occupied by this component type.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Set of component types, one bit per [`ComponentId`].
///
/// Describes which components an entity has or which components a system requires.
///
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ComponentMask(u64);

impl ComponentMask {
    /// Maximal count of component types which can be represented by the mask.
    pub const BITS: usize = u64::BITS as usize;

    /// Mask without any component types.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if component type is in the mask.
    pub fn contains(self, id: ComponentId) -> bool {
        self.contains_all(Self::from(id))
    }

    /// Returns `true` if every component type of `other` is in this mask.
    pub fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Count of component types in the mask.
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits of the mask.
    pub fn bits(self) -> u64 {
        self.0
    }
}

impl From<ComponentId> for ComponentMask {
    fn from(id: ComponentId) -> Self {
        Self(1 << id.0)
    }
}

impl BitOr for ComponentMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ComponentMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentMask({:#b})", self.0)
    }
}
