use glam::Vec3;
use tracing::debug;

use crate::object::Object;
use crate::query::{CollisionLayer, CollisionQuery};

/// Locomotion mode of a movement component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Glued to the ground, no vertical velocity
    #[default]
    Walking,
    /// Unconstrained; gravity (scaled) applies
    Falling,
}

/// Mutable movement state a gameplay controller can drive.
///
/// Implementors own the actual integration; controllers only tweak these
/// fields and queue movement input.
pub trait MovementComponent {
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);

    fn movement_mode(&self) -> MovementMode;
    fn set_movement_mode(&mut self, mode: MovementMode);

    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);

    /// Speed used for walking and for scaled movement input
    fn max_walk_speed(&self) -> f32;

    /// Queue movement along `direction` scaled by `scale` for the next step
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    /// Overwrite the vertical (world Z) velocity component
    fn set_vertical_velocity(&mut self, vz: f32) {
        let mut velocity = self.velocity();
        velocity.z = vz;
        self.set_velocity(velocity);
    }
}

impl<T: MovementComponent + ?Sized> MovementComponent for &mut T {
    fn gravity_scale(&self) -> f32 {
        (**self).gravity_scale()
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        (**self).set_gravity_scale(scale)
    }

    fn movement_mode(&self) -> MovementMode {
        (**self).movement_mode()
    }

    fn set_movement_mode(&mut self, mode: MovementMode) {
        (**self).set_movement_mode(mode)
    }

    fn velocity(&self) -> Vec3 {
        (**self).velocity()
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        (**self).set_velocity(velocity)
    }

    fn max_walk_speed(&self) -> f32 {
        (**self).max_walk_speed()
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        (**self).add_movement_input(direction, scale)
    }
}

/// Configuration for character movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Walking speed, also the speed of full-scale movement input
    pub max_walk_speed: f32,
    /// Gravity acceleration (positive value, applied along world -Z)
    pub gravity: f32,
    /// Half of the total capsule height
    pub capsule_half_height: f32,
    /// Distance below the capsule still counted as ground
    pub ground_check_distance: f32,
    /// Vertical launch speed of a jump
    pub jump_z_velocity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 600.0,
            gravity: 980.0,
            capsule_half_height: 96.0,
            ground_check_distance: 2.0,
            jump_z_velocity: 600.0,
        }
    }
}

/// Kinematic movement simulation for a character.
///
/// Consumes queued movement input once per step, applies scaled gravity
/// while falling and keeps the character on the ground while walking.
#[derive(Debug, Clone)]
pub struct CharacterMovement {
    config: MovementConfig,
    gravity_scale: f32,
    mode: MovementMode,
    velocity: Vec3,
    pending_input: Vec3,
}

impl CharacterMovement {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            gravity_scale: 1.0,
            mode: MovementMode::Walking,
            velocity: Vec3::ZERO,
            pending_input: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Input queued since the last step
    pub fn pending_input(&self) -> Vec3 {
        self.pending_input
    }

    /// Advance the character by `dt` seconds
    ///
    /// # Arguments
    /// * `world` - Collision service used for ground checks
    /// * `pose` - Character transform, moved in place
    /// * `body` - The character's own body, ignored by traces
    /// * `dt` - Time step in seconds
    pub fn step<Q, P>(&mut self, world: &Q, pose: &mut P, body: Q::Body, dt: f32)
    where
        Q: CollisionQuery,
        P: Object,
    {
        let input = std::mem::take(&mut self.pending_input).clamp_length_max(1.0);
        let speed = self.config.max_walk_speed;

        match self.mode {
            MovementMode::Walking => {
                let planar = Vec3::new(input.x, input.y, 0.0) * speed;
                self.velocity = planar;
            }
            MovementMode::Falling => {
                self.velocity.x = input.x * speed;
                self.velocity.y = input.y * speed;
                if input.z != 0.0 {
                    self.velocity.z = input.z * speed;
                }
                self.velocity.z -= self.config.gravity * self.gravity_scale * dt;
            }
        }

        let mut target = pose.position() + self.velocity * dt;

        // Only gravity-driven movement interacts with the ground below
        if self.gravity_scale > 0.0 {
            let reach = self.config.capsule_half_height + self.config.ground_check_distance;
            let probe_end = target - Vec3::Z * (reach + (-self.velocity.z * dt).max(0.0));
            let start = Vec3::new(target.x, target.y, pose.position().z.max(target.z));
            let ground = world.line_trace(start, probe_end, CollisionLayer::WorldStatic, &[body]);

            match (self.mode, ground) {
                (MovementMode::Walking, Some(hit)) => {
                    target.z = hit.point.z + self.config.capsule_half_height;
                }
                (MovementMode::Walking, None) => {
                    debug!("lost ground, falling");
                    self.mode = MovementMode::Falling;
                }
                (MovementMode::Falling, Some(hit)) => {
                    let min_z = hit.point.z + self.config.capsule_half_height;
                    if self.velocity.z <= 0.0 && target.z <= min_z + self.config.ground_check_distance {
                        debug!(z = min_z, "landed");
                        target.z = min_z;
                        self.velocity.z = 0.0;
                        self.mode = MovementMode::Walking;
                    }
                }
                (MovementMode::Falling, None) => {}
            }
        }

        pose.set_position(target);
    }
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl MovementComponent for CharacterMovement {
    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    fn set_movement_mode(&mut self, mode: MovementMode) {
        self.mode = mode;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn max_walk_speed(&self) -> f32 {
        self.config.max_walk_speed
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::spawn_static_box;
    use crate::object::Pose;
    use crate::world::PhysicsWorld;
    use rapier3d::prelude::RigidBodyHandle;

    fn floor_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        // Top face at z = 0
        spawn_static_box(&mut world, Vec3::new(0.0, 0.0, -10.0), Vec3::new(5000.0, 5000.0, 10.0));
        world.update_query_pipeline();
        world
    }

    #[test]
    fn test_movement_defaults() {
        let movement = CharacterMovement::default();
        assert_eq!(movement.gravity_scale(), 1.0);
        assert_eq!(movement.movement_mode(), MovementMode::Walking);
        assert_eq!(movement.velocity(), Vec3::ZERO);
        assert_eq!(movement.max_walk_speed(), 600.0);
    }

    #[test]
    fn test_character_falls_and_lands() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        movement.set_movement_mode(MovementMode::Falling);
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 500.0));

        for _ in 0..240 {
            movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 1.0 / 60.0);
        }

        assert_eq!(movement.movement_mode(), MovementMode::Walking);
        assert!(
            (pose.position.z - 96.0).abs() < 0.5,
            "Character Z should be ~96, got {:.2}",
            pose.position.z
        );
        assert_eq!(movement.velocity().z, 0.0);
    }

    #[test]
    fn test_zero_gravity_hovers() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        movement.set_movement_mode(MovementMode::Falling);
        movement.set_gravity_scale(0.0);
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 500.0));

        for _ in 0..60 {
            movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 1.0 / 60.0);
        }

        assert!((pose.position.z - 500.0).abs() < 1e-3);
        assert_eq!(movement.movement_mode(), MovementMode::Falling);
    }

    #[test]
    fn test_walking_input_moves_on_ground() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 96.0));

        movement.add_movement_input(Vec3::X, 1.0);
        movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 0.1);

        assert!((pose.position.x - 60.0).abs() < 1e-3);
        assert!((pose.position.z - 96.0).abs() < 1e-3);
        assert_eq!(movement.pending_input(), Vec3::ZERO);
    }

    #[test]
    fn test_input_is_clamped_to_unit_length() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 96.0));

        movement.add_movement_input(Vec3::X, 1.0);
        movement.add_movement_input(Vec3::X, 1.0);
        movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 0.1);

        assert!((pose.position.x - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_input_while_weightless() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        movement.set_movement_mode(MovementMode::Falling);
        movement.set_gravity_scale(0.0);
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 200.0));

        movement.add_movement_input(Vec3::Z, 0.5);
        movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 0.1);

        assert!((pose.position.z - 230.0).abs() < 1e-3);
    }

    #[test]
    fn test_launched_character_lands_back_on_floor() {
        let world = floor_world();
        let mut movement = CharacterMovement::default();
        let mut pose = Pose::at_position(Vec3::new(0.0, 0.0, 96.0));

        let launch = movement.config().jump_z_velocity;
        movement.set_movement_mode(MovementMode::Falling);
        movement.set_vertical_velocity(launch);

        let mut apex: f32 = 0.0;
        for _ in 0..120 {
            movement.step(&world, &mut pose, RigidBodyHandle::invalid(), 1.0 / 60.0);
            apex = apex.max(pose.position.z);
        }

        // v^2 / 2g = 600^2 / 1960 ~ 184 above the standing height
        assert!(apex > 96.0 + 150.0, "apex = {:.2}", apex);
        assert_eq!(movement.movement_mode(), MovementMode::Walking);
        assert!((pose.position.z - 96.0).abs() < 0.5);
    }

    #[test]
    fn test_set_vertical_velocity_keeps_planar() {
        let mut movement = CharacterMovement::default();
        movement.set_velocity(Vec3::new(1.0, 2.0, 3.0));
        movement.set_vertical_velocity(0.0);
        assert_eq!(movement.velocity(), Vec3::new(1.0, 2.0, 0.0));
    }
}
