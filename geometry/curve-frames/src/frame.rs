//! The per-point orthonormal frame.
//!
//! Axis convention: the normal is the local x axis, the binormal the local y
//! axis and the tangent the local z axis. A cross-section drawn in the local
//! xy plane is therefore swept along the curve by [`Frame::local_to_world`].

use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An orthonormal frame at a curve point.
///
/// - `tangent`: direction of travel along the curve
/// - `normal`: perpendicular to the tangent, transported without twist
/// - `binormal`: `tangent × normal`, completing a right-handed basis
///
/// Points that no curve assigns a frame to hold [`Frame::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Unit tangent vector.
    pub tangent: Vector3<f64>,
    /// Unit normal vector.
    pub normal: Vector3<f64>,
    /// Unit binormal vector.
    pub binormal: Vector3<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Frame {
    /// The all-zero frame written to points no curve reaches.
    pub const ZERO: Self = Self {
        tangent: Vector3::new(0.0, 0.0, 0.0),
        normal: Vector3::new(0.0, 0.0, 0.0),
        binormal: Vector3::new(0.0, 0.0, 0.0),
    };

    /// Create a new frame with the given components.
    ///
    /// The vectors are assumed to be orthonormal. Use [`Self::from_tangent_normal`]
    /// to derive the binormal instead.
    #[must_use]
    pub const fn new(tangent: Vector3<f64>, normal: Vector3<f64>, binormal: Vector3<f64>) -> Self {
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Create a frame from a unit tangent and a unit normal orthogonal to it.
    #[must_use]
    pub fn from_tangent_normal(tangent: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Whether every component of the frame is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Check if the frame is orthonormal and right-handed within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let t_len = (self.tangent.norm() - 1.0).abs();
        let n_len = (self.normal.norm() - 1.0).abs();
        let b_len = (self.binormal.norm() - 1.0).abs();
        let tn_dot = self.tangent.dot(&self.normal).abs();
        let tb_dot = self.tangent.dot(&self.binormal).abs();
        let nb_dot = self.normal.dot(&self.binormal).abs();
        let handedness = (self.tangent.cross(&self.normal) - self.binormal).norm();

        t_len < tolerance
            && n_len < tolerance
            && b_len < tolerance
            && tn_dot < tolerance
            && tb_dot < tolerance
            && nb_dot < tolerance
            && handedness < tolerance
    }

    /// Orthonormalize the frame using Gram-Schmidt, keeping the tangent direction.
    #[must_use]
    pub fn orthonormalized(&self) -> Self {
        let tangent = self.tangent.normalize();
        let normal = (self.normal - tangent * tangent.dot(&self.normal)).normalize();
        let binormal = tangent.cross(&normal);

        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Basis matrix with columns `[normal, binormal, tangent]`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.normal, self.binormal, self.tangent])
    }

    /// Rotation taking the world axes onto the frame (x → normal, y → binormal,
    /// z → tangent).
    #[must_use]
    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        let rotation = Rotation3::from_matrix(&self.to_matrix());
        UnitQuaternion::from_rotation_matrix(&rotation)
    }

    /// Transform a local direction to world coordinates.
    #[must_use]
    pub fn local_direction_to_world(&self, local: Vector3<f64>) -> Vector3<f64> {
        self.normal * local.x + self.binormal * local.y + self.tangent * local.z
    }

    /// Transform a local point, relative to `origin`, to world coordinates.
    #[must_use]
    pub fn local_to_world(&self, origin: Point3<f64>, local: Point3<f64>) -> Point3<f64> {
        origin + self.local_direction_to_world(local.coords)
    }

    /// Transform a world point to local coordinates relative to `origin`.
    #[must_use]
    pub fn world_to_local(&self, origin: Point3<f64>, world: Point3<f64>) -> Point3<f64> {
        let v = world - origin;
        Point3::new(
            v.dot(&self.normal),
            v.dot(&self.binormal),
            v.dot(&self.tangent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axis_frame() -> Frame {
        Frame::from_tangent_normal(Vector3::z(), Vector3::x())
    }

    #[test]
    fn test_zero_frame() {
        assert!(Frame::default().is_zero());
        assert!(!Frame::ZERO.is_orthonormal(1e-6));
        assert!(!axis_frame().is_zero());
    }

    #[test]
    fn test_from_tangent_normal() {
        let frame = axis_frame();
        assert_relative_eq!(frame.binormal, Vector3::y(), epsilon = 1e-12);
        assert!(frame.is_orthonormal(1e-12));
    }

    #[test]
    fn test_left_handed_frame_rejected() {
        let frame = Frame::new(Vector3::z(), Vector3::x(), -Vector3::y());
        assert!(!frame.is_orthonormal(1e-6));
    }

    #[test]
    fn test_orthonormalized() {
        let skewed = Frame::new(
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(1.0, 0.0, 0.5),
            Vector3::zeros(),
        );
        let frame = skewed.orthonormalized();
        assert!(frame.is_orthonormal(1e-12));
        assert_relative_eq!(frame.normal, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_local_to_world_axes() {
        let frame = axis_frame();
        let origin = Point3::new(1.0, 2.0, 3.0);

        let world = frame.local_to_world(origin, Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(world, Point3::new(1.0, 2.0, 4.0), epsilon = 1e-12);

        let local = frame.world_to_local(origin, Point3::new(2.0, 2.0, 3.0));
        assert_relative_eq!(local, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quaternion_maps_axes() {
        let tangent = Vector3::new(1.0, 1.0, 0.0).normalize();
        let frame = Frame::from_tangent_normal(tangent, Vector3::z());
        let q = frame.to_quaternion();

        assert_relative_eq!(q * Vector3::x(), frame.normal, epsilon = 1e-10);
        assert_relative_eq!(q * Vector3::y(), frame.binormal, epsilon = 1e-10);
        assert_relative_eq!(q * Vector3::z(), frame.tangent, epsilon = 1e-10);
    }
}
