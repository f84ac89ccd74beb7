//! Polyline cells over a shared point array.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FrameError, FrameResult};

/// A set of polyline curves sharing one point array.
///
/// Each cell is an ordered list of indices into the point array. A point may
/// be referenced by several cells, although typical inputs are disjoint
/// polylines. Every index is checked when the cell is added, so the frame
/// computation never reads out of bounds.
///
/// # Example
///
/// ```
/// use curve_frames::CurveSet;
/// use nalgebra::Point3;
///
/// let mut curves = CurveSet::default();
/// curves.add_polyline(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
/// curves.add_polyline(&[Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 2.0, 0.0)]);
///
/// assert_eq!(curves.num_points(), 4);
/// assert_eq!(curves.num_cells(), 2);
/// assert_eq!(curves.cell(1), Some(&[2, 3][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "CurveSetData")
)]
pub struct CurveSet {
    points: Vec<Point3<f64>>,
    cells: Vec<Vec<usize>>,
}

/// Unchecked wire form of a [`CurveSet`]; deserialization validates it
/// through [`CurveSet::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CurveSetData {
    points: Vec<Point3<f64>>,
    cells: Vec<Vec<usize>>,
}

#[cfg(feature = "serde")]
impl TryFrom<CurveSetData> for CurveSet {
    type Error = FrameError;

    fn try_from(data: CurveSetData) -> FrameResult<Self> {
        Self::new(data.points, data.cells)
    }
}

impl CurveSet {
    /// Create a curve set from a point array and cells referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::PointIndexOutOfRange`] if a cell references a
    /// point that does not exist.
    pub fn new(points: Vec<Point3<f64>>, cells: Vec<Vec<usize>>) -> FrameResult<Self> {
        for (cell, ids) in cells.iter().enumerate() {
            check_indices(cell, ids, points.len())?;
        }
        Ok(Self { points, cells })
    }

    /// Create a curve set holding a single polyline through `points`.
    #[must_use]
    pub fn from_polyline(points: Vec<Point3<f64>>) -> Self {
        let cell = (0..points.len()).collect();
        Self {
            points,
            cells: vec![cell],
        }
    }

    /// Append a polyline with its own points and return the new cell's index.
    pub fn add_polyline(&mut self, points: &[Point3<f64>]) -> usize {
        let first = self.points.len();
        self.points.extend_from_slice(points);
        self.cells.push((first..self.points.len()).collect());
        self.cells.len() - 1
    }

    /// Append a point and return its index.
    pub fn add_point(&mut self, point: Point3<f64>) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Append a cell referencing existing points and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::PointIndexOutOfRange`] if an index is not a
    /// valid point. The curve set is left unchanged in that case.
    pub fn add_cell(&mut self, ids: Vec<usize>) -> FrameResult<usize> {
        check_indices(self.cells.len(), &ids, self.points.len())?;
        self.cells.push(ids);
        Ok(self.cells.len() - 1)
    }

    /// The shared point array.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// All cells, as lists of point indices.
    #[must_use]
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Point indices of one cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    /// Positions of one cell's points, in cell order.
    #[must_use]
    pub fn cell_points(&self, index: usize) -> Option<Vec<Point3<f64>>> {
        self.cell(index)?
            .iter()
            .map(|&id| self.points.get(id).copied())
            .collect()
    }

    /// Number of points in the shared array.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether any point is referenced by more than one cell.
    ///
    /// Frames for such points are written by every cell that visits them;
    /// the last cell in order wins.
    #[must_use]
    pub fn shares_points(&self) -> bool {
        let mut owner: Vec<Option<usize>> = vec![None; self.points.len()];
        for (cell, ids) in self.cells.iter().enumerate() {
            for &id in ids {
                match owner[id] {
                    Some(other) if other != cell => return true,
                    _ => owner[id] = Some(cell),
                }
            }
        }
        false
    }
}

fn check_indices(cell: usize, ids: &[usize], num_points: usize) -> FrameResult<()> {
    match ids.iter().find(|&&id| id >= num_points) {
        Some(&index) => Err(FrameError::PointIndexOutOfRange {
            cell,
            index,
            num_points,
        }),
        None => Ok(()),
    }
}
