//! Configuration for frame computation.
//!
//! [`FrameConfig`] holds everything a computation needs besides the curves
//! themselves: output array names, the preferred initial orientation,
//! numerical thresholds and the propagation method.
//!
//! # Example
//!
//! ```
//! use curve_frames::{FrameConfig, TransportMethod};
//! use nalgebra::Vector3;
//!
//! let config = FrameConfig::default()
//!     .with_preferred_normal(Vector3::z())
//!     .with_minimum_distance(0.01)
//!     .with_parallel(false);
//!
//! assert_eq!(config.method, TransportMethod::DoubleReflection);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FrameError, FrameResult};

/// Default name of the tangent output array.
pub const DEFAULT_TANGENTS_ARRAY_NAME: &str = "Tangents";
/// Default name of the normal output array.
pub const DEFAULT_NORMALS_ARRAY_NAME: &str = "Normals";
/// Default name of the binormal output array.
pub const DEFAULT_BINORMALS_ARRAY_NAME: &str = "Binormals";

/// How a frame is carried from one point to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransportMethod {
    /// Double reflection (Wang et al., 2008). Rotation-minimizing and free of
    /// trigonometry, so it stays well-conditioned near zero curvature.
    #[default]
    DoubleReflection,

    /// Rotate the previous normal about `t_prev × t_next` by the turning angle
    /// (Rodrigues' formula), then re-orthogonalize against the new tangent.
    Rotation,
}

impl fmt::Display for TransportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleReflection => f.write_str("double reflection"),
            Self::Rotation => f.write_str("rotation"),
        }
    }
}

/// Configuration for a frame computation.
///
/// The configuration is read-only while a computation runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameConfig {
    /// Name of the per-point tangent array.
    pub tangents_array_name: String,

    /// Name of the per-point normal array.
    pub normals_array_name: String,

    /// Name of the per-point binormal array.
    pub binormals_array_name: String,

    /// Direction the normal should point at the first point of every curve.
    ///
    /// Only "preferred": the normal is this vector projected orthogonally to
    /// the initial tangent. Need not be unit length.
    pub preferred_initial_normal: Vector3<f64>,

    /// Fallback used only when the preferred normal is parallel to the
    /// initial tangent. The normal is then `preferred_initial_binormal × tangent`.
    pub preferred_initial_binormal: Vector3<f64>,

    /// Lengths at or below this value are treated as zero.
    pub tolerance: f64,

    /// Minimum displacement from the first point used to estimate the
    /// initial tangent. Filters out near-duplicate leading points.
    pub minimum_distance: f64,

    /// Propagation method.
    pub method: TransportMethod,

    /// Whether to process cells on the rayon thread pool.
    pub parallel: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tangents_array_name: DEFAULT_TANGENTS_ARRAY_NAME.to_string(),
            normals_array_name: DEFAULT_NORMALS_ARRAY_NAME.to_string(),
            binormals_array_name: DEFAULT_BINORMALS_ARRAY_NAME.to_string(),
            preferred_initial_normal: Vector3::x(),
            preferred_initial_binormal: Vector3::zeros(),
            tolerance: 1e-6,
            minimum_distance: 1e-3,
            method: TransportMethod::DoubleReflection,
            parallel: true,
        }
    }
}

impl FrameConfig {
    /// Configuration using the angle-based propagation path.
    ///
    /// # Example
    ///
    /// ```
    /// use curve_frames::{FrameConfig, TransportMethod};
    ///
    /// let config = FrameConfig::legacy();
    /// assert_eq!(config.method, TransportMethod::Rotation);
    /// ```
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            method: TransportMethod::Rotation,
            ..Self::default()
        }
    }

    /// Set the tangent array name.
    #[must_use]
    pub fn with_tangents_array_name(mut self, name: impl Into<String>) -> Self {
        self.tangents_array_name = name.into();
        self
    }

    /// Set the normal array name.
    #[must_use]
    pub fn with_normals_array_name(mut self, name: impl Into<String>) -> Self {
        self.normals_array_name = name.into();
        self
    }

    /// Set the binormal array name.
    #[must_use]
    pub fn with_binormals_array_name(mut self, name: impl Into<String>) -> Self {
        self.binormals_array_name = name.into();
        self
    }

    /// Set the preferred initial normal direction.
    #[must_use]
    pub fn with_preferred_normal(mut self, normal: Vector3<f64>) -> Self {
        self.preferred_initial_normal = normal;
        self
    }

    /// Set the preferred initial binormal direction.
    #[must_use]
    pub fn with_preferred_binormal(mut self, binormal: Vector3<f64>) -> Self {
        self.preferred_initial_binormal = binormal;
        self
    }

    /// Set the zero-length tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum distance used for the initial tangent.
    #[must_use]
    pub fn with_minimum_distance(mut self, distance: f64) -> Self {
        self.minimum_distance = distance;
        self
    }

    /// Set the propagation method.
    #[must_use]
    pub fn with_method(mut self, method: TransportMethod) -> Self {
        self.method = method;
        self
    }

    /// Select the propagation method from a rotation-minimizing flag.
    ///
    /// `true` selects [`TransportMethod::DoubleReflection`], `false` selects
    /// [`TransportMethod::Rotation`].
    #[must_use]
    pub fn with_rotation_minimizing_frames(mut self, enabled: bool) -> Self {
        self.method = if enabled {
            TransportMethod::DoubleReflection
        } else {
            TransportMethod::Rotation
        };
        self
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether the double reflection method is selected.
    #[must_use]
    pub fn rotation_minimizing_frames(&self) -> bool {
        self.method == TransportMethod::DoubleReflection
    }

    /// Check the configuration before any curve is processed.
    ///
    /// # Errors
    ///
    /// - [`FrameError::MissingArrayName`] if an output array name is empty.
    /// - [`FrameError::InvalidConfig`] if `tolerance` is not a positive finite
    ///   number, `minimum_distance` is negative or not finite, or a preferred
    ///   direction has non-finite components.
    pub fn validate(&self) -> FrameResult<()> {
        if self.tangents_array_name.is_empty() {
            return Err(FrameError::missing_array_name("tangents"));
        }
        if self.normals_array_name.is_empty() {
            return Err(FrameError::missing_array_name("normals"));
        }
        if self.binormals_array_name.is_empty() {
            return Err(FrameError::missing_array_name("binormals"));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FrameError::invalid_config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.minimum_distance.is_finite() && self.minimum_distance >= 0.0) {
            return Err(FrameError::invalid_config(format!(
                "minimum distance must be non-negative and finite, got {}",
                self.minimum_distance
            )));
        }
        if !self.preferred_initial_normal.iter().all(|c| c.is_finite()) {
            return Err(FrameError::invalid_config(
                "preferred initial normal has non-finite components",
            ));
        }
        if !self.preferred_initial_binormal.iter().all(|c| c.is_finite()) {
            return Err(FrameError::invalid_config(
                "preferred initial binormal has non-finite components",
            ));
        }

        Ok(())
    }
}

fn name_or_none(name: &str) -> &str {
    if name.is_empty() { "(none)" } else { name }
}

impl fmt::Display for FrameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = &self.preferred_initial_normal;
        let b = &self.preferred_initial_binormal;
        writeln!(
            f,
            "TangentsArrayName: {}",
            name_or_none(&self.tangents_array_name)
        )?;
        writeln!(
            f,
            "NormalsArrayName: {}",
            name_or_none(&self.normals_array_name)
        )?;
        writeln!(
            f,
            "BinormalsArrayName: {}",
            name_or_none(&self.binormals_array_name)
        )?;
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Parallel: {}", self.parallel)?;
        writeln!(f, "Tolerance: {}", self.tolerance)?;
        writeln!(f, "MinimumDistance: {}", self.minimum_distance)?;
        writeln!(
            f,
            "PreferredInitialNormalVector: ({}, {}, {})",
            n.x, n.y, n.z
        )?;
        write!(
            f,
            "PreferredInitialBinormalVector: ({}, {}, {})",
            b.x, b.y, b.z
        )
    }
}
