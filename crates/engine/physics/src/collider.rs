use glam::Vec3;
use rapier3d::prelude::*;

use crate::query::CollisionLayer;
use crate::world::PhysicsWorld;

/// Helper function to create a simple box collider
///
/// # Arguments
/// * `half_extents` - Half the size in each dimension
/// * `layer` - Collision layer the box lives on
pub fn create_box_collider(half_extents: Vec3, layer: CollisionLayer) -> Collider {
    ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        .collision_groups(layer.collider_groups())
        .build()
}

/// Helper function to create a capsule collider
///
/// The capsule axis is local +Z, matching the character up axis.
///
/// # Arguments
/// * `half_height` - Half the height of the cylindrical part
/// * `radius` - Radius of the capsule
/// * `layer` - Collision layer the capsule lives on
pub fn create_capsule_collider(half_height: f32, radius: f32, layer: CollisionLayer) -> Collider {
    ColliderBuilder::capsule_z(half_height, radius)
        .friction(0.0)
        .restitution(0.0)
        .collision_groups(layer.collider_groups())
        .build()
}

/// Spawn a fixed box on the static world layer
///
/// # Returns
/// Handle of the fixed body carrying the box
pub fn spawn_static_box(world: &mut PhysicsWorld, center: Vec3, half_extents: Vec3) -> RigidBodyHandle {
    let body = RigidBodyBuilder::fixed()
        .translation(vector![center.x, center.y, center.z])
        .build();
    let handle = world.add_rigid_body(body);
    world.add_collider(
        create_box_collider(half_extents, CollisionLayer::WorldStatic),
        handle,
    );
    handle
}
