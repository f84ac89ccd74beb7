//! Carrying a frame from one curve point to the next.
//!
//! A [`FrameTransport`] takes the frame at point *i*, the segment vector
//! `x_{i+1} − x_i` and the unit tangent at point *i+1*, and returns the frame
//! at point *i+1*. Two implementations are provided:
//!
//! - [`DoubleReflection`]: the rotation-minimizing double reflection method of
//!   Wang, Jüttler, Zheng and Liu, "Computation of rotation minimizing frames"
//!   (ACM TOG, 2008). Two reflections compose into a proper rotation with no
//!   twist about the tangent, without computing any angle.
//! - [`RotationTransport`]: rotates the normal about `t_i × t_{i+1}` by the
//!   turning angle (Rodrigues' formula) and re-orthogonalizes it. Equivalent
//!   away from degeneracies, but the rotation axis is ill-defined when
//!   consecutive tangents are parallel.
//!
//! Any closure `Fn(&Frame, Vector3<f64>, Vector3<f64>) -> Frame` is also a
//! transport, which lets callers plug their own rule into the driver.

use nalgebra::{UnitVector3, Vector3};
use tracing::trace;

use crate::{Frame, FrameConfig};

/// A rule for propagating a frame along one polyline segment.
pub trait FrameTransport {
    /// Transport `prev` along `segment` to a point whose unit tangent is `tangent`.
    fn transport(&self, prev: &Frame, segment: Vector3<f64>, tangent: Vector3<f64>) -> Frame;
}

impl<F> FrameTransport for F
where
    F: Fn(&Frame, Vector3<f64>, Vector3<f64>) -> Frame,
{
    fn transport(&self, prev: &Frame, segment: Vector3<f64>, tangent: Vector3<f64>) -> Frame {
        self(prev, segment, tangent)
    }
}

/// Double reflection transport.
///
/// # Example
///
/// ```
/// use curve_frames::{DoubleReflection, Frame, FrameTransport};
/// use nalgebra::Vector3;
///
/// let frame = Frame::from_tangent_normal(Vector3::x(), Vector3::y());
/// let transport = DoubleReflection::new(1e-6);
///
/// // Turn 90° from +x to +y: the normal rotates with the tangent.
/// let next = transport.transport(&frame, Vector3::new(1.0, 1.0, 0.0), Vector3::y());
/// assert!((next.normal + Vector3::x()).norm() < 1e-12);
/// assert!((next.binormal - Vector3::z()).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleReflection {
    /// Vectors not longer than this are treated as zero.
    pub tolerance: f64,
}

impl DoubleReflection {
    /// Create a double reflection transport with the given zero tolerance.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Create a double reflection transport using `config.tolerance`.
    #[must_use]
    pub const fn from_config(config: &FrameConfig) -> Self {
        Self::new(config.tolerance)
    }
}

impl FrameTransport for DoubleReflection {
    fn transport(&self, prev: &Frame, segment: Vector3<f64>, tangent: Vector3<f64>) -> Frame {
        let tolerance_sq = self.tolerance * self.tolerance;

        // Coincident points: mirror through the previous tangent instead, which
        // turns the frame in place by the minimal rotation onto the new tangent.
        let mut v1 = segment;
        let mut c1 = v1.dot(&v1);
        if c1 <= tolerance_sq {
            trace!(length = c1.sqrt(), "zero-length segment");
            v1 = prev.tangent;
            c1 = v1.dot(&v1);
        }

        // First reflection, through the plane perpendicular to the segment.
        let r_l = prev.normal - v1 * (2.0 / c1) * v1.dot(&prev.normal);
        let t_l = prev.tangent - v1 * (2.0 / c1) * v1.dot(&prev.tangent);

        // Second reflection maps the reflected tangent onto the new one.
        let v2 = tangent - t_l;
        let c2 = v2.dot(&v2);
        let normal = if c2 <= tolerance_sq {
            r_l
        } else {
            r_l - v2 * (2.0 / c2) * v2.dot(&r_l)
        }
        .normalize();

        let binormal = tangent.cross(&normal).normalize();

        Frame::new(tangent, normal, binormal)
    }
}

/// Angle-based (Rodrigues) transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransport {
    /// Turning angles whose cosine is within this of 1, and rotation axes not
    /// longer than this, are treated as zero.
    pub tolerance: f64,
}

impl RotationTransport {
    /// Create a rotation transport with the given zero tolerance.
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Create a rotation transport using `config.tolerance`.
    #[must_use]
    pub const fn from_config(config: &FrameConfig) -> Self {
        Self::new(config.tolerance)
    }
}

impl FrameTransport for RotationTransport {
    fn transport(&self, prev: &Frame, _segment: Vector3<f64>, tangent: Vector3<f64>) -> Frame {
        let dot = prev.tangent.dot(&tangent);

        let rotated = if 1.0 - dot < self.tolerance {
            prev.normal
        } else {
            match prev.tangent.cross(&tangent).try_normalize(self.tolerance) {
                Some(axis) => rotate_about_axis(
                    prev.normal,
                    &UnitVector3::new_unchecked(axis),
                    dot.clamp(-1.0, 1.0).acos(),
                ),
                // Tangent reversed: any axis perpendicular to it would do, and
                // the previous normal is already perpendicular to the new tangent.
                None => prev.normal,
            }
        };

        let normal = (rotated - tangent * tangent.dot(&rotated))
            .try_normalize(self.tolerance)
            .or_else(|| prev.binormal.cross(&tangent).try_normalize(self.tolerance))
            .unwrap_or(prev.normal);

        Frame::from_tangent_normal(tangent, normal)
    }
}

/// Rotate `v` about a unit `axis` by `angle` radians (Rodrigues' formula).
#[must_use]
pub fn rotate_about_axis(v: Vector3<f64>, axis: &UnitVector3<f64>, angle: f64) -> Vector3<f64> {
    let k = axis.into_inner();
    let (sin_a, cos_a) = angle.sin_cos();
    v * cos_a + k.cross(&v) * sin_a + k * k.dot(&v) * (1.0 - cos_a)
}
