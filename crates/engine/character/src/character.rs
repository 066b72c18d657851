use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;
use tracing::debug;
use wallwalker_physics::{
    create_capsule_collider, CharacterMovement, CollisionLayer, MovementComponent, MovementConfig,
    MovementMode, Object, PhysicsWorld, Pose,
};

use crate::config::WallWalkConfig;
use crate::controller::WallWalkController;
use crate::input::{
    AxisInput, ControlRotation, JUMP_ACTION, MOVE_FORWARD_AXIS, MOVE_RIGHT_AXIS, WALL_WALK_AXIS,
};
use crate::state::WallWalkEvent;

/// A wall-walking character living in a [`PhysicsWorld`]
///
/// Owns its pose and a kinematic capsule body. Each tick runs the wall-walk
/// controller, integrates movement and pushes the pose into the body.
pub struct WallWalkCharacter {
    pose: Pose,
    body_handle: RigidBodyHandle,
    controller: WallWalkController<CharacterMovement, RigidBodyHandle>,
}

impl WallWalkCharacter {
    /// Spawn a character into the world
    ///
    /// # Arguments
    /// * `world` - Physics world to add the character to
    /// * `position` - Initial capsule centre
    /// * `yaw` - Initial heading in radians around world up
    /// * `config` - Wall-walk tuning; also sizes the capsule
    /// * `movement` - Movement tuning
    pub fn spawn(
        world: &mut PhysicsWorld,
        position: Vec3,
        yaw: f32,
        config: WallWalkConfig,
        movement: MovementConfig,
    ) -> Self {
        let pose = Pose::with_transform(position, Quat::from_rotation_z(yaw));

        let body = RigidBodyBuilder::kinematic_position_based()
            .position(to_isometry(&pose))
            .build();
        let body_handle = world.add_rigid_body(body);

        // Capsule half-height covers the cylinder only, not the end caps
        let cylinder_half = (config.capsule_half_height - config.capsule_radius).max(0.0);
        let collider = create_capsule_collider(cylinder_half, config.capsule_radius, CollisionLayer::Pawn);
        world.add_collider(collider, body_handle);

        let movement = CharacterMovement::new(MovementConfig {
            capsule_half_height: config.capsule_half_height,
            ..movement
        });

        Self {
            pose,
            body_handle,
            controller: WallWalkController::new(config, movement, body_handle),
        }
    }

    /// Run one frame from bound input axes
    ///
    /// Locomotion and jump are only read while a controller is present; the
    /// wall-walk axis is handed to [`WallWalkCharacter::tick`].
    pub fn apply_input(
        &mut self,
        world: &mut PhysicsWorld,
        control: Option<&ControlRotation>,
        input: &AxisInput,
        dt: f32,
    ) -> WallWalkEvent {
        if let Some(control) = control {
            self.move_forward(control, input.value(MOVE_FORWARD_AXIS));
            self.move_right(control, input.value(MOVE_RIGHT_AXIS));
            if input.pressed(JUMP_ACTION) {
                self.jump();
            }
        }
        self.tick(world, control, input.value(WALL_WALK_AXIS), dt)
    }

    /// Queue movement along the view's horizontal forward
    pub fn move_forward(&mut self, control: &ControlRotation, value: f32) {
        if value != 0.0 {
            self.controller
                .movement_mut()
                .add_movement_input(control.yaw_forward(), value);
        }
    }

    /// Queue movement along the view's horizontal right
    pub fn move_right(&mut self, control: &ControlRotation, value: f32) {
        if value != 0.0 {
            self.controller
                .movement_mut()
                .add_movement_input(control.yaw_right(), value);
        }
    }

    /// Launch off the ground
    ///
    /// Ignored while wall-walking or already airborne. Returns whether the
    /// jump started.
    pub fn jump(&mut self) -> bool {
        if self.controller.is_wall_walking() {
            return false;
        }
        let movement = self.controller.movement_mut();
        if movement.movement_mode() != MovementMode::Walking {
            return false;
        }

        let launch = movement.config().jump_z_velocity;
        movement.set_movement_mode(MovementMode::Falling);
        movement.set_vertical_velocity(launch);
        debug!(launch, "jump");
        true
    }

    /// Run one frame
    ///
    /// # Arguments
    /// * `world` - Physics world
    /// * `control` - Controlling input source, `None` when unpossessed
    /// * `wall_walk_axis` - Value of the wall-walk axis this frame
    /// * `dt` - Time step in seconds
    pub fn tick(
        &mut self,
        world: &mut PhysicsWorld,
        control: Option<&ControlRotation>,
        wall_walk_axis: f32,
        dt: f32,
    ) -> WallWalkEvent {
        let event = self
            .controller
            .update_intent(&*world, &mut self.pose, control, wall_walk_axis);

        self.controller
            .movement_mut()
            .step(&*world, &mut self.pose, self.body_handle, dt);

        self.sync_body(world);
        event
    }

    /// Push the pose into the kinematic body for the next physics step
    fn sync_body(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_next_kinematic_position(to_isometry(&self.pose));
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Teleport the character, keeping its wall-walk state
    pub fn set_pose(&mut self, world: &mut PhysicsWorld, pose: Pose) {
        self.pose = pose;
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_position(to_isometry(&self.pose), true);
        }
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position()
    }

    pub fn controller(&self) -> &WallWalkController<CharacterMovement, RigidBodyHandle> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WallWalkController<CharacterMovement, RigidBodyHandle> {
        &mut self.controller
    }

    /// Get the rigid body handle
    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    /// Destroy the character and remove it from the physics world
    pub fn destroy(self, world: &mut PhysicsWorld) {
        world.remove_rigid_body(self.body_handle);
        // Collider is automatically removed with the rigid body
    }
}

fn to_isometry(pose: &Pose) -> Isometry3<f32> {
    let p = pose.position;
    let r = pose.rotation;
    Isometry3::from_parts(
        Translation3::new(p.x, p.y, p.z),
        UnitQuaternion::from_quaternion(Quaternion::new(r.w, r.x, r.y, r.z)),
    )
}
