//! Utilities for signature of *systems* in ECS.

use std::any::{type_name, TypeId};

use crate::component::{ComponentMask, ComponentRegistry};
use crate::error::Result;
use crate::Component;

/// Signature of the *system* in ECS.
///
/// Describes which component types an entity must have to be handled by the system.
///
pub trait Signature: 'static {
    /// Registers every type of this signature and returns mask of them all.
    ///
    /// Either all types of the signature are registered or none of them.
    ///
    fn register(registry: &mut ComponentRegistry) -> Result<ComponentMask>;

    /// Names of the types in this signature.
    fn type_names() -> Vec<&'static str>;
}

// Generate implementations of Signature for empty tuple (unit type)
// and for tuples up to 8 elements.

impl Signature for () {
    fn register(_: &mut ComponentRegistry) -> Result<ComponentMask> {
        Ok(ComponentMask::empty())
    }

    fn type_names() -> Vec<&'static str> {
        Vec::new()
    }
}

macro_rules! impl_signature {
    ($($name:ident),+) => {
        impl<$($name),+> Signature for ($($name,)+)
        where
            $($name: Component,)+
        {
            fn register(registry: &mut ComponentRegistry) -> Result<ComponentMask> {
                registry.register_all(&[$((TypeId::of::<$name>(), type_name::<$name>())),+])
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(type_name::<$name>()),+]
            }
        }
    };
}

impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);
impl_signature!(A, B, C, D, E, F, G);
impl_signature!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;
    struct Health;

    #[test]
    fn test_mask_of_tuple() {
        let mut registry = ComponentRegistry::new();
        let health = registry.mask_of::<Health>().unwrap();

        let mask = <(Position, Velocity)>::register(&mut registry).unwrap();
        assert_eq!(mask.count(), 2);
        assert!(!mask.contains_all(health));
        assert_eq!(registry.len(), 3);

        let again = <(Velocity, Position)>::register(&mut registry).unwrap();
        assert_eq!(again, mask);
        assert_eq!(<()>::register(&mut registry).unwrap(), ComponentMask::empty());
    }

    #[test]
    fn test_type_names() {
        let names = <(Position, Health)>::type_names();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Position"));
        assert!(names[1].ends_with("Health"));
        assert!(<()>::type_names().is_empty());
    }
}
