//! Input seen by the character each frame

use glam::{Quat, Vec3};
use std::collections::HashMap;

// ============================================================================
// Bindings
// ============================================================================

/// Name of the continuous axis that drives wall-walking
pub const WALL_WALK_AXIS: &str = "WallWalk";
/// Walk along the view's yaw-only forward
pub const MOVE_FORWARD_AXIS: &str = "MoveForward";
/// Strafe along the view's yaw-only right
pub const MOVE_RIGHT_AXIS: &str = "MoveRight";
/// Jump while any non-zero value is held
pub const JUMP_ACTION: &str = "Jump";

/// Every name the character reads from an [`AxisInput`]
pub const BOUND_AXES: [&str; 4] = [WALL_WALK_AXIS, MOVE_FORWARD_AXIS, MOVE_RIGHT_AXIS, JUMP_ACTION];

/// Axis values for one frame, keyed by binding name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisInput {
    values: HashMap<String, f32>,
}

impl AxisInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an axis value, replacing any previous one
    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    /// Builder form of [`AxisInput::set`]
    pub fn with(mut self, name: &str, value: f32) -> Self {
        self.set(name, value);
        self
    }

    /// Current value of an axis; unbound axes read 0
    pub fn value(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Whether an action axis is held this frame
    pub fn pressed(&self, name: &str) -> bool {
        self.value(name) != 0.0
    }
}

// ============================================================================
// View
// ============================================================================

/// View rotation of the controlling input source, in radians
///
/// Locomotion only uses the yaw; pitch is carried for camera consumers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// The view rotation with pitch discarded
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw)
    }

    /// Horizontal forward of the view
    pub fn yaw_forward(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::X
    }

    /// Horizontal right of the view
    pub fn yaw_right(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::Y
    }

    /// World-vertical axis of the yaw-only view frame
    pub fn yaw_up(&self) -> Vec3 {
        self.yaw_rotation() * Vec3::Z
    }
}
