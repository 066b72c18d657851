//! Object trait for types with a transform in 3D space
//!
//! Axis convention used throughout the workspace: world up is +Z, and a
//! body's local frame maps forward to +X, right to +Y and up to +Z.

use glam::{Mat3, Quat, Vec3};

/// Base trait for any object with position, rotation and scale in 3D space.
///
/// Implemented by:
/// - `Pose`, the plain transform owned by a character
///
/// The derived axis accessors return unit vectors as long as the stored
/// rotation is normalized. Rotations are stored verbatim, so callers pass
/// unit quaternions and a saved rotation restores bit for bit.
pub trait Object {
    /// Get the current position
    fn position(&self) -> Vec3;

    /// Get the current rotation as a quaternion
    fn rotation(&self) -> Quat;

    /// Get the current scale
    fn scale(&self) -> Vec3;

    /// Set the position
    fn set_position(&mut self, position: Vec3);

    /// Set the rotation
    fn set_rotation(&mut self, rotation: Quat);

    /// Set the scale
    fn set_scale(&mut self, scale: Vec3);

    /// Local +X in world space
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Local +Y in world space
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Local +Z in world space
    fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Set the rotation from an orthonormal basis
    ///
    /// The basis must be right-handed (`forward × right == up`).
    fn set_basis(&mut self, forward: Vec3, right: Vec3, up: Vec3) {
        let rotation = Quat::from_mat3(&Mat3::from_cols(forward, right, up));
        self.set_rotation(rotation.normalize());
    }
}

/// Position, rotation and scale of a character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    /// Create a new pose at the origin
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a new pose at the given position
    pub fn at_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Create a new pose with position and rotation
    pub fn with_transform(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            scale: Vec3::ONE,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for Pose {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}
