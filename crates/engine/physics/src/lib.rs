//! Reference physics host for wall-walking characters
//!
//! Provides the collaborators a gameplay controller talks to:
//!
//! - [`CollisionQuery`]: synchronous line traces against collision layers,
//!   implemented by the rapier-backed [`PhysicsWorld`]
//! - [`MovementComponent`]: gravity scale, movement mode, velocity and
//!   queued input, implemented by [`CharacterMovement`]
//! - [`Object`]: a character transform, implemented by [`Pose`]

mod collider;
mod movement;
mod object;
mod query;
mod world;

pub use collider::{create_box_collider, create_capsule_collider, spawn_static_box};
pub use movement::{CharacterMovement, MovementComponent, MovementConfig, MovementMode};
pub use object::{Object, Pose};
pub use query::{CollisionLayer, CollisionQuery, RaycastHit};
pub use world::PhysicsWorld;

// Re-export for convenience
pub use glam;
pub use rapier3d;
