//! Components of the demo.

use ultraviolet::Vec3;

/// Location of the entity in world space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position(pub Vec3);

/// Change of position per second.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Velocity(pub Vec3);
