//! Named per-point vector arrays holding the computed frames.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Frame, FrameConfig};

/// A named array with one 3-component vector per point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointVectorArray {
    /// Attribute name.
    pub name: String,
    /// One vector per point of the input point array.
    pub values: Vec<Vector3<f64>>,
}

impl PointVectorArray {
    /// Create a zero-filled array with `len` entries.
    #[must_use]
    pub fn zeros(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            values: vec![Vector3::zeros(); len],
        }
    }

    /// Value at a point index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Vector3<f64>> {
        self.values.get(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The three output arrays of a frame computation.
///
/// Every array has one entry per point of the input, zero until a cell
/// writes a frame for that point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameArrays {
    /// Tangent per point.
    pub tangents: PointVectorArray,
    /// Normal per point.
    pub normals: PointVectorArray,
    /// Binormal per point.
    pub binormals: PointVectorArray,
}

impl FrameArrays {
    /// Allocate zero-filled arrays named after `config` for `num_points` points.
    #[must_use]
    pub fn zeros(config: &FrameConfig, num_points: usize) -> Self {
        Self {
            tangents: PointVectorArray::zeros(config.tangents_array_name.clone(), num_points),
            normals: PointVectorArray::zeros(config.normals_array_name.clone(), num_points),
            binormals: PointVectorArray::zeros(config.binormals_array_name.clone(), num_points),
        }
    }

    /// Number of points covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    /// Whether the arrays cover no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    /// Look up an array by name.
    ///
    /// If two arrays share a name, the first of tangents, normals, binormals wins.
    #[must_use]
    pub fn array(&self, name: &str) -> Option<&PointVectorArray> {
        [&self.tangents, &self.normals, &self.binormals]
            .into_iter()
            .find(|array| array.name == name)
    }

    /// The frame stored for a point.
    #[must_use]
    pub fn frame_at(&self, index: usize) -> Option<Frame> {
        Some(Frame::new(
            *self.tangents.get(index)?,
            *self.normals.get(index)?,
            *self.binormals.get(index)?,
        ))
    }

    /// Iterate over the stored frames in point order.
    pub fn iter_frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.tangents
            .values
            .iter()
            .zip(&self.normals.values)
            .zip(&self.binormals.values)
            .map(|((&t, &n), &b)| Frame::new(t, n, b))
    }

    /// Write a frame at a point index.
    pub(crate) fn set_frame(&mut self, index: usize, frame: &Frame) {
        self.tangents.values[index] = frame.tangent;
        self.normals.values[index] = frame.normal;
        self.binormals.values[index] = frame.binormal;
    }

    /// Split into `[tangents, normals, binormals]`.
    #[must_use]
    pub fn into_arrays(self) -> [PointVectorArray; 3] {
        [self.tangents, self.normals, self.binormals]
    }
}
