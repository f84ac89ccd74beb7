//! Frame computation over polylines and curve sets.
//!
//! Each cell is handled on its own: estimate tangents, seed the first frame,
//! then transport it forward one segment at a time. No state is shared
//! between cells, so cells run on the rayon pool when
//! [`FrameConfig::parallel`] is set. Results are written back in cell order
//! either way, so parallel and sequential runs produce identical arrays.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    CurveSet, DoubleReflection, Frame, FrameArrays, FrameConfig, FrameError, FrameResult,
    FrameTransport, RotationTransport, TransportMethod, initial_frame, initial_tangent,
};

/// Unit tangent at every point of a polyline.
///
/// - first point: [`initial_tangent`]
/// - interior point *i*: direction of the segment to point *i+1*; a
///   zero-length segment reuses the tangent of point *i−1*
/// - last point: the tangent of the point before it
///
/// Returns `None` for fewer than two points or when all points coincide.
#[must_use]
pub fn polyline_tangents(
    points: &[Point3<f64>],
    config: &FrameConfig,
) -> Option<Vec<Vector3<f64>>> {
    if points.len() < 2 {
        return None;
    }

    let mut tangents = Vec::with_capacity(points.len());
    tangents.push(initial_tangent(points, config)?);

    for i in 1..points.len() - 1 {
        let prev = tangents[i - 1];
        let tangent = (points[i + 1] - points[i])
            .try_normalize(config.tolerance)
            .unwrap_or(prev);
        tangents.push(tangent);
    }

    let last = *tangents.last()?;
    tangents.push(last);

    Some(tangents)
}

/// Parallel transport frames along a single polyline.
///
/// Returns one frame per point, or an empty vector if the polyline has fewer
/// than two points or all its points coincide. The propagation method is
/// taken from `config.method`; the output array names are not used.
///
/// # Example
///
/// ```
/// use curve_frames::{FrameConfig, polyline_frames};
/// use nalgebra::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 1.0, 0.0),
///     Point3::new(2.0, 2.0, 1.0),
/// ];
///
/// let frames = polyline_frames(&points, &FrameConfig::default());
/// assert_eq!(frames.len(), 4);
/// for frame in &frames {
///     assert!(frame.is_orthonormal(1e-9));
/// }
/// ```
#[must_use]
pub fn polyline_frames(points: &[Point3<f64>], config: &FrameConfig) -> Vec<Frame> {
    match config.method {
        TransportMethod::DoubleReflection => {
            polyline_frames_with(points, config, &DoubleReflection::from_config(config))
        }
        TransportMethod::Rotation => {
            polyline_frames_with(points, config, &RotationTransport::from_config(config))
        }
    }
}

/// Parallel transport frames along a single polyline using a custom transport.
///
/// See [`polyline_frames`].
#[must_use]
pub fn polyline_frames_with<T>(
    points: &[Point3<f64>],
    config: &FrameConfig,
    transport: &T,
) -> Vec<Frame>
where
    T: FrameTransport + ?Sized,
{
    let Some(tangents) = polyline_tangents(points, config) else {
        return Vec::new();
    };

    let mut frames = Vec::with_capacity(points.len());
    let mut frame = initial_frame(tangents[0], config);
    frames.push(frame);

    for (i, segment) in points.windows(2).enumerate() {
        frame = transport.transport(&frame, segment[1] - segment[0], tangents[i + 1]);
        frames.push(frame);
    }

    frames
}

/// Compute frames for every cell of a curve set.
///
/// Returns three arrays with one entry per point of `curves`. Points of
/// cells with fewer than two points, or whose points all coincide, stay zero.
/// A point shared by several cells holds the frame from the last of them.
///
/// # Errors
///
/// Returns a configuration error from [`FrameConfig::validate`] before any
/// cell is processed.
///
/// # Example
///
/// ```
/// use curve_frames::{CurveSet, FrameConfig, compute_frames};
/// use nalgebra::Point3;
///
/// let mut curves = CurveSet::default();
/// curves.add_polyline(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(0.0, 1.0, 2.0),
/// ]);
/// curves.add_polyline(&[Point3::new(5.0, 5.0, 5.0)]); // skipped
///
/// let arrays = compute_frames(&curves, &FrameConfig::default()).unwrap();
/// assert_eq!(arrays.len(), 4);
/// assert!(arrays.frame_at(1).unwrap().is_orthonormal(1e-9));
/// assert!(arrays.frame_at(3).unwrap().is_zero());
/// ```
pub fn compute_frames(curves: &CurveSet, config: &FrameConfig) -> FrameResult<FrameArrays> {
    debug!(method = %config.method, "selected transport");
    match config.method {
        TransportMethod::DoubleReflection => {
            compute_frames_with(curves, config, &DoubleReflection::from_config(config))
        }
        TransportMethod::Rotation => {
            compute_frames_with(curves, config, &RotationTransport::from_config(config))
        }
    }
}

/// Compute frames for every cell of a curve set using a custom transport.
///
/// `config.method` is ignored; everything else behaves as in [`compute_frames`].
///
/// # Errors
///
/// Returns a configuration error from [`FrameConfig::validate`] before any
/// cell is processed.
pub fn compute_frames_with<T>(
    curves: &CurveSet,
    config: &FrameConfig,
    transport: &T,
) -> FrameResult<FrameArrays>
where
    T: FrameTransport + Sync + ?Sized,
{
    config.validate()?;

    info!(
        cells = curves.num_cells(),
        points = curves.num_points(),
        parallel = config.parallel,
        "Computing parallel transport frames"
    );

    let per_cell = |cell: usize| cell_frames(curves, cell, config, transport);
    let results: Vec<Vec<Frame>> = if config.parallel {
        (0..curves.num_cells()).into_par_iter().map(per_cell).collect()
    } else {
        (0..curves.num_cells()).map(per_cell).collect()
    };

    let mut arrays = FrameArrays::zeros(config, curves.num_points());
    let mut skipped = 0usize;
    for (ids, frames) in curves.cells().iter().zip(&results) {
        if frames.is_empty() {
            skipped += 1;
            continue;
        }
        write_frames(&mut arrays, ids, frames);
    }

    debug!(
        cells = curves.num_cells(),
        skipped,
        "parallel transport frames computed"
    );

    Ok(arrays)
}

/// Compute frames for one cell and write them into `arrays`.
///
/// Returns the number of points written, which is zero for a skipped cell.
///
/// # Errors
///
/// - [`FrameError::CellIndexOutOfRange`] if `cell` is not a cell of `curves`.
/// - [`FrameError::ArrayLengthMismatch`] if any of the three arrays in
///   `arrays` does not have one entry per point of `curves`.
pub fn write_cell_frames<T>(
    curves: &CurveSet,
    cell: usize,
    config: &FrameConfig,
    transport: &T,
    arrays: &mut FrameArrays,
) -> FrameResult<usize>
where
    T: FrameTransport + ?Sized,
{
    let ids = curves.cell(cell).ok_or(FrameError::CellIndexOutOfRange {
        cell,
        num_cells: curves.num_cells(),
    })?;
    let expected = curves.num_points();
    for array in [&arrays.tangents, &arrays.normals, &arrays.binormals] {
        if array.len() != expected {
            return Err(FrameError::ArrayLengthMismatch {
                expected,
                actual: array.len(),
            });
        }
    }

    let frames = cell_frames(curves, cell, config, transport);
    write_frames(arrays, ids, &frames);
    Ok(frames.len())
}

fn cell_frames<T>(curves: &CurveSet, cell: usize, config: &FrameConfig, transport: &T) -> Vec<Frame>
where
    T: FrameTransport + ?Sized,
{
    let points = curves.cell_points(cell).unwrap_or_default();
    if points.len() < 2 {
        debug!(cell, points = points.len(), "skipping cell with fewer than two points");
        return Vec::new();
    }

    let frames = polyline_frames_with(&points, config, transport);
    if frames.is_empty() {
        debug!(cell, "skipping cell with coincident points");
    }
    frames
}

fn write_frames(arrays: &mut FrameArrays, ids: &[usize], frames: &[Frame]) {
    for (&id, frame) in ids.iter().zip(frames) {
        arrays.set_frame(id, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bent_line() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_tangents_follow_segments() {
        let tangents =
            polyline_tangents(&bent_line(), &FrameConfig::default()).unwrap_or_default();
        assert_eq!(tangents.len(), 5);
        assert_relative_eq!(tangents[0], Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(tangents[1], Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(tangents[2], Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(tangents[3], Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(tangents[4], Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_two_point_tangents() {
        let points = [Point3::origin(), Point3::new(0.0, 0.0, 4.0)];
        let tangents = polyline_tangents(&points, &FrameConfig::default());
        assert_eq!(tangents, Some(vec![Vector3::z(), Vector3::z()]));
    }

    #[test]
    fn test_zero_segment_reuses_previous_tangent() {
        let points = [
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let tangents = polyline_tangents(&points, &FrameConfig::default()).unwrap_or_default();
        assert_eq!(tangents.len(), 4);
        assert_relative_eq!(tangents[1], Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(tangents[2], Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_planar_polyline_keeps_binormal() {
        for method in [TransportMethod::DoubleReflection, TransportMethod::Rotation] {
            let config = FrameConfig::default()
                .with_preferred_normal(Vector3::y())
                .with_method(method);
            let frames = polyline_frames(&bent_line(), &config);

            assert_eq!(frames.len(), 5);
            for frame in &frames {
                assert!(frame.is_orthonormal(1e-9));
                assert_relative_eq!(frame.binormal, Vector3::z(), epsilon = 1e-9);
            }
            // The normal turns with the curve: +y along x, then -x along y.
            assert_relative_eq!(frames[0].normal, Vector3::y(), epsilon = 1e-9);
            assert_relative_eq!(frames[4].normal, -Vector3::x(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_duplicate_points_stay_finite() {
        let points = [
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        for method in [TransportMethod::DoubleReflection, TransportMethod::Rotation] {
            let config = FrameConfig::default().with_method(method);
            let frames = polyline_frames(&points, &config);
            assert_eq!(frames.len(), 5);
            for frame in &frames {
                assert!(frame.is_orthonormal(1e-9), "{method}: {frame:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_polylines() {
        let config = FrameConfig::default();
        assert!(polyline_frames(&[], &config).is_empty());
        assert!(polyline_frames(&[Point3::origin()], &config).is_empty());
        assert!(polyline_frames(&[Point3::origin(); 3], &config).is_empty());
    }

    #[test]
    fn test_compute_rejects_bad_config() {
        let curves = CurveSet::from_polyline(bent_line());
        let config = FrameConfig::default().with_tangents_array_name("");
        assert_eq!(
            compute_frames(&curves, &config),
            Err(FrameError::missing_array_name("tangents"))
        );
    }

    #[test]
    fn test_compute_leaves_skipped_cells_zero() {
        let mut curves = CurveSet::from_polyline(bent_line());
        curves.add_polyline(&[Point3::new(9.0, 9.0, 9.0)]);
        curves.add_polyline(&[Point3::new(1.0, 1.0, 1.0); 2]);
        curves.add_polyline(&[]);

        let arrays = compute_frames(&curves, &FrameConfig::default()).unwrap_or_else(|err| {
            panic!("frame computation failed: {err}");
        });
        assert_eq!(arrays.len(), 8);
        let frames: Vec<Frame> = arrays.iter_frames().collect();
        assert!(frames[..5].iter().all(|f| f.is_orthonormal(1e-9)));
        assert!(frames[5..].iter().all(Frame::is_zero));
    }

    #[test]
    fn test_compute_with_closure() {
        let curves = CurveSet::from_polyline(bent_line());
        let config = FrameConfig::default().with_parallel(false);
        let frozen = |prev: &Frame, _segment: Vector3<f64>, _tangent: Vector3<f64>| *prev;

        let arrays = compute_frames_with(&curves, &config, &frozen).unwrap_or_else(|err| {
            panic!("frame computation failed: {err}");
        });
        let first = arrays.frame_at(0);
        assert!(arrays.iter_frames().all(|f| Some(f) == first));
    }

    #[test]
    fn test_write_cell_frames() {
        let mut curves = CurveSet::from_polyline(bent_line());
        curves.add_polyline(&[Point3::origin()]);
        let config = FrameConfig::default();
        let transport = DoubleReflection::from_config(&config);

        let mut arrays = FrameArrays::zeros(&config, curves.num_points());
        assert_eq!(
            write_cell_frames(&curves, 0, &config, &transport, &mut arrays),
            Ok(5)
        );
        assert_eq!(
            write_cell_frames(&curves, 1, &config, &transport, &mut arrays),
            Ok(0)
        );
        assert_eq!(
            write_cell_frames(&curves, 2, &config, &transport, &mut arrays),
            Err(FrameError::CellIndexOutOfRange {
                cell: 2,
                num_cells: 2
            })
        );

        let mut short = FrameArrays::zeros(&config, 3);
        assert_eq!(
            write_cell_frames(&curves, 0, &config, &transport, &mut short),
            Err(FrameError::ArrayLengthMismatch {
                expected: 6,
                actual: 3
            })
        );
    }

    #[test]
    fn test_write_cell_frames_checks_every_array() {
        let curves = CurveSet::from_polyline(bent_line());
        let config = FrameConfig::default();
        let transport = DoubleReflection::from_config(&config);

        let mut arrays = FrameArrays::zeros(&config, curves.num_points());
        arrays.normals.values.truncate(1);
        assert_eq!(
            write_cell_frames(&curves, 0, &config, &transport, &mut arrays),
            Err(FrameError::ArrayLengthMismatch {
                expected: 5,
                actual: 1
            })
        );

        let mut arrays = FrameArrays::zeros(&config, curves.num_points());
        arrays.binormals.values.push(Vector3::zeros());
        assert_eq!(
            write_cell_frames(&curves, 0, &config, &transport, &mut arrays),
            Err(FrameError::ArrayLengthMismatch {
                expected: 5,
                actual: 6
            })
        );
        // Nothing is written when the check fails.
        assert!(arrays.iter_frames().all(|f| f.is_zero()));
    }
}
