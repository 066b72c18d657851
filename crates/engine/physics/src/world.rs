use glam::Vec3;
use rapier3d::prelude::*;
use tracing::trace;

use crate::query::{CollisionLayer, CollisionQuery, RaycastHit};

/// Physics simulation world
///
/// Manages all rigid bodies, colliders, and physics simulation state.
/// This is a wrapper around Rapier's physics pipeline plus a query pipeline
/// used for line traces.
pub struct PhysicsWorld {
    pub(crate) rigid_body_set: RigidBodySet,
    pub(crate) collider_set: ColliderSet,
    pub(crate) impulse_joint_set: ImpulseJointSet,
    pub(crate) multibody_joint_set: MultibodyJointSet,
    pub(crate) integration_parameters: IntegrationParameters,
    pub(crate) physics_pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    pub(crate) broad_phase: DefaultBroadPhase,
    pub(crate) narrow_phase: NarrowPhase,
    pub(crate) ccd_solver: CCDSolver,
    pub(crate) query_pipeline: QueryPipeline,
    gravity: Vector<Real>,
}

impl PhysicsWorld {
    /// Create a new physics world with specified gravity
    ///
    /// # Arguments
    /// * `gravity` - Gravity vector (e.g., Vec3::new(0.0, 0.0, -980.0))
    pub fn new(gravity: Vec3) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            gravity: vector![gravity.x, gravity.y, gravity.z],
        }
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// Also refreshes the query pipeline so traces see the new poses.
    ///
    /// # Arguments
    /// * `dt` - Time step in seconds (typically 1/60 = 0.016666...)
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Rebuild the query pipeline from the current collider set
    ///
    /// Needed after adding colliders when no step has run since.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a rigid body to the world
    ///
    /// # Returns
    /// Handle to the added rigid body
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Remove a rigid body from the world
    ///
    /// Also removes all associated colliders automatically.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Add a collider to the world, attached to a rigid body
    ///
    /// # Returns
    /// Handle to the added collider
    pub fn add_collider(&mut self, collider: Collider, parent: RigidBodyHandle) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get the current gravity vector
    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Set the gravity vector
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = vector![gravity.x, gravity.y, gravity.z];
    }
}

impl CollisionQuery for PhysicsWorld {
    type Body = RigidBodyHandle;

    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        layer: CollisionLayer,
        ignore: &[RigidBodyHandle],
    ) -> Option<RaycastHit> {
        let delta = end - start;
        let length = delta.length();

        let dir = delta.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let predicate = |_handle: ColliderHandle, collider: &Collider| {
            collider
                .parent()
                .map_or(true, |parent| !ignore.contains(&parent))
        };
        let filter = QueryFilter::default()
            .groups(layer.query_groups())
            .predicate(&predicate);

        let ray = Ray::new(
            point![start.x, start.y, start.z],
            vector![dir.x, dir.y, dir.z],
        );

        let hit = self
            .query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                length,
                true,
                filter,
            )
            .and_then(|(_collider, intersection)| {
                let p = ray.point_at(intersection.time_of_impact);
                let n = intersection.normal;
                // A ray starting inside a shape reports no usable normal
                let normal = Vec3::new(n.x, n.y, n.z).try_normalize()?;
                Some(RaycastHit {
                    point: Vec3::new(p.x, p.y, p.z),
                    normal,
                    distance: intersection.time_of_impact,
                })
            });

        trace!(?start, ?end, ?layer, hit = hit.is_some(), "line trace");
        hit
    }
}
