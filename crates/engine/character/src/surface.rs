//! Surface classification and surface-aligned frames

use glam::{Quat, Vec3};

/// Which local axis currently points away from the walked surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceDirection {
    /// Surface faced nearly head-on; the character runs up it
    Up,
    /// Side wall on the character's left
    Left,
    /// Side wall on the character's right
    Right,
}

/// Angle in degrees between `forward` and the inward surface direction
///
/// Both inputs are unit vectors. 0° means the surface is faced head-on.
pub fn approach_angle_degrees(forward: Vec3, normal: Vec3) -> f32 {
    forward.dot(-normal).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Classify a surface hit relative to the character's frame
///
/// `threshold` is the approach angle (degrees) under which the surface is
/// treated as something to run up rather than a side wall.
pub fn classify_surface(forward: Vec3, right: Vec3, normal: Vec3, threshold: f32) -> SurfaceDirection {
    if approach_angle_degrees(forward, normal) < threshold {
        SurfaceDirection::Up
    } else if normal.dot(right) < 0.0 {
        SurfaceDirection::Left
    } else {
        SurfaceDirection::Right
    }
}

/// Orthonormal, right-handed frame whose up axis is a surface normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl SurfaceBasis {
    /// Build the frame for standing on a surface with the given normal
    ///
    /// Forward is `right × normal`. When the current right axis is parallel
    /// to the normal that product vanishes, and the current up projected onto
    /// the surface plane is used instead.
    pub fn align(right: Vec3, up: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();

        let mut forward = right.cross(normal);
        if forward.length_squared() < 1e-8 {
            forward = up - normal * up.dot(normal);
        }
        let forward = forward
            .try_normalize()
            .unwrap_or_else(|| normal.any_orthonormal_vector());
        let right = normal.cross(forward).normalize();

        Self {
            forward,
            right,
            up: normal,
        }
    }
}

/// Local pitch rotation; positive raises the nose (forward toward up)
pub fn pitch(degrees: f32) -> Quat {
    Quat::from_rotation_y(-degrees.to_radians())
}

/// Local yaw rotation; positive turns forward toward right
pub fn yaw(degrees: f32) -> Quat {
    Quat::from_rotation_z(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(basis: &SurfaceBasis) {
        for axis in [basis.forward, basis.right, basis.up] {
            assert!((axis.length() - 1.0).abs() < EPS, "axis {axis} not unit");
        }
        assert!(basis.forward.dot(basis.right).abs() < EPS);
        assert!(basis.forward.dot(basis.up).abs() < EPS);
        assert!(basis.right.dot(basis.up).abs() < EPS);
        assert!(basis.forward.cross(basis.right).abs_diff_eq(basis.up, EPS));
    }

    #[test]
    fn test_head_on_angle_is_zero() {
        assert!(approach_angle_degrees(Vec3::X, Vec3::NEG_X).abs() < 1e-3);
    }

    #[test]
    fn test_angle_tolerates_rounding() {
        let forward = Vec3::X * 1.000_000_1;
        let angle = approach_angle_degrees(forward, Vec3::NEG_X);
        assert!(angle.is_finite());
    }

    #[test]
    fn test_classify_head_on_is_up() {
        let dir = classify_surface(Vec3::X, Vec3::Y, Vec3::NEG_X, 30.0);
        assert_eq!(dir, SurfaceDirection::Up);
    }

    #[test]
    fn test_classify_side_walls() {
        let forward = (Vec3::X + Vec3::Y).normalize();
        let right = Vec3::Z.cross(forward);
        // Wall whose normal points back along -Y, i.e. against right's Y part
        let left = classify_surface(forward, right, Vec3::NEG_Y, 30.0);
        // Wall whose normal points along -X
        let other = classify_surface(forward, right, Vec3::NEG_X, 30.0);

        assert_eq!(left, SurfaceDirection::Left);
        assert_eq!(other, SurfaceDirection::Right);
    }

    #[test]
    fn test_classification_threshold_is_exclusive() {
        let forward = Quat::from_rotation_z(30f32.to_radians()) * Vec3::X;
        let right = Quat::from_rotation_z(30f32.to_radians()) * Vec3::Y;
        let dir = classify_surface(forward, right, Vec3::NEG_X, 29.0);
        assert_ne!(dir, SurfaceDirection::Up);
        let dir = classify_surface(forward, right, Vec3::NEG_X, 31.0);
        assert_eq!(dir, SurfaceDirection::Up);
    }

    #[test]
    fn test_basis_is_orthonormal_for_oblique_walls() {
        for yaw_deg in [-80.0f32, -45.0, -31.0, 31.0, 45.0, 80.0] {
            let rot = Quat::from_rotation_z(yaw_deg.to_radians());
            let basis = SurfaceBasis::align(rot * Vec3::Y, rot * Vec3::Z, Vec3::NEG_X);
            assert_orthonormal(&basis);
            assert_eq!(basis.up, Vec3::NEG_X);
        }
    }

    #[test]
    fn test_basis_for_tilted_normal() {
        let normal = Vec3::new(-1.0, 0.3, 0.5).normalize();
        let basis = SurfaceBasis::align(Vec3::Y, Vec3::Z, normal);
        assert_orthonormal(&basis);
    }

    #[test]
    fn test_basis_right_parallel_to_normal_falls_back() {
        let basis = SurfaceBasis::align(Vec3::Y, Vec3::Z, Vec3::NEG_Y);
        assert_orthonormal(&basis);
        assert!(basis.forward.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_basis_applied_to_pose_maps_axes() {
        use wallwalker_physics::{Object, Pose};

        let basis = SurfaceBasis::align(Vec3::Y, Vec3::Z, Vec3::NEG_X);
        let mut pose = Pose::new();
        pose.set_basis(basis.forward, basis.right, basis.up);
        assert!(pose.forward().abs_diff_eq(basis.forward, EPS));
        assert!(pose.right().abs_diff_eq(basis.right, EPS));
        assert!(pose.up().abs_diff_eq(basis.up, EPS));
    }

    #[test]
    fn test_pitch_raises_nose() {
        assert!((pitch(90.0) * Vec3::X).abs_diff_eq(Vec3::Z, EPS));
        assert!((pitch(90.0) * Vec3::Z).abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn test_yaw_turns_toward_right() {
        assert!((yaw(90.0) * Vec3::X).abs_diff_eq(Vec3::Y, EPS));
        assert!((yaw(-90.0) * Vec3::X).abs_diff_eq(Vec3::NEG_Y, EPS));
    }
}
