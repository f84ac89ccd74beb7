//! Seeding the frame at the first point of a curve.

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::{Frame, FrameConfig};

/// Estimate the tangent at the first point of a polyline.
///
/// Walks forward from the first point until the displacement reaches
/// `config.minimum_distance`, so near-duplicate leading points do not decide
/// the direction. If no point gets that far, the displacement to the last
/// point is used, or the longest displacement seen when the curve closes back
/// onto its first point.
///
/// Returns `None` when even the longest displacement is not longer than
/// `config.tolerance` (a single point, or all points coincident).
///
/// # Example
///
/// ```
/// use curve_frames::{FrameConfig, initial_tangent};
/// use nalgebra::{Point3, Vector3};
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 1e-5, 0.0), // near-duplicate, skipped
///     Point3::new(1.0, 0.0, 0.0),
/// ];
///
/// let tangent = initial_tangent(&points, &FrameConfig::default());
/// assert_eq!(tangent, Some(Vector3::x()));
/// ```
#[must_use]
pub fn initial_tangent(points: &[Point3<f64>], config: &FrameConfig) -> Option<Vector3<f64>> {
    let (first, rest) = points.split_first()?;

    let mut displacement = Vector3::zeros();
    let mut longest = Vector3::zeros();
    for point in rest {
        displacement = point - first;
        if displacement.norm() >= config.minimum_distance {
            return displacement.try_normalize(config.tolerance);
        }
        if displacement.norm_squared() > longest.norm_squared() {
            longest = displacement;
        }
    }

    displacement
        .try_normalize(config.tolerance)
        .or_else(|| longest.try_normalize(config.tolerance))
}

/// Build the first frame of a curve from its unit tangent.
///
/// The normal is the preferred initial normal projected orthogonally to the
/// tangent. If the preferred normal is parallel to the tangent, the normal is
/// `preferred_initial_binormal × tangent`. If that vanishes as well (the
/// default preferred binormal is zero), the world axis least aligned with the
/// tangent is used.
///
/// The result is always a right-handed orthonormal frame.
#[must_use]
pub fn initial_frame(tangent: Vector3<f64>, config: &FrameConfig) -> Frame {
    let binormal = tangent.cross(&config.preferred_initial_normal);
    if let Some(binormal) = binormal.try_normalize(config.tolerance) {
        let normal = binormal.cross(&tangent);
        return Frame::new(tangent, normal, binormal);
    }

    debug!(
        ?tangent,
        "preferred initial normal is parallel to the tangent, using preferred binormal"
    );
    let normal = config
        .preferred_initial_binormal
        .cross(&tangent)
        .try_normalize(config.tolerance)
        .unwrap_or_else(|| {
            warn!(
                ?tangent,
                "preferred initial normal and binormal are both unusable, picking an axis"
            );
            least_aligned_perpendicular(tangent)
        });

    Frame::from_tangent_normal(tangent, normal)
}

/// A unit vector perpendicular to `v`, built from the axis least aligned with it.
fn least_aligned_perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let axis = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    // `axis` has at most 1/sqrt(3) of `v` in it, so the rejection is non-zero.
    (axis - v * v.dot(&axis)).normalize()
}
