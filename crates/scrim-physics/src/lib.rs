//! Scrim Physics - the minimal physics a stick fighter needs
//!
//! Vertical gravity with explicit Euler integration, a ground line,
//! AABB/circle hitboxes, and a static obstacle registry. Deliberately
//! not a general-purpose physics engine.

pub mod arena;
pub mod hitbox;
pub mod obstacle;

pub use arena::{integrate_motion, resolve_ground, Arena};
pub use hitbox::{segment_aabb, Hitbox};
pub use obstacle::{Obstacle, ObstacleField, ObstacleInfo, ObstacleKind, ObstacleSpec};
