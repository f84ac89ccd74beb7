//! Parallel transport frames along polyline curves.
//!
//! This crate computes a smoothly varying orthonormal frame (tangent, normal,
//! binormal) at every point of a set of 3D polylines. Frames are propagated by
//! parallel transport (Bishop frames): each step rotates the frame exactly as
//! much as the curve bends and never twists it about the tangent. Unlike
//! Frenet-Serret frames, the result stays defined on straight pieces and does
//! not flip where the direction of concavity changes.
//!
//! - [`compute_frames`] - Frames for every cell of a [`CurveSet`], written into
//!   three named per-point arrays ([`FrameArrays`])
//! - [`polyline_frames`] - Frames for a single polyline
//! - [`DoubleReflection`] - Rotation-minimizing transport by double reflection
//!   (the default)
//! - [`RotationTransport`] - Angle-based transport (Rodrigues' rotation)
//!
//! # Algorithm
//!
//! 1. The first tangent is the direction from the first point to the first
//!    point at least [`FrameConfig::minimum_distance`] away.
//! 2. The first normal is [`FrameConfig::preferred_initial_normal`] projected
//!    orthogonally to that tangent.
//! 3. The frame is carried from point to point by a [`FrameTransport`].
//!
//! References: R. Bishop, "There is more than one way to frame a curve" (1975);
//! W. Wang et al., "Computation of rotation minimizing frames" (2008).
//!
//! # Example
//!
//! ```
//! use curve_frames::{CurveSet, FrameConfig, compute_frames};
//! use nalgebra::{Point3, Vector3};
//!
//! // A quarter circle in the xy plane.
//! let points: Vec<Point3<f64>> = (0..=32)
//!     .map(|i| {
//!         let a = std::f64::consts::FRAC_PI_2 * f64::from(i) / 32.0;
//!         Point3::new(a.cos(), a.sin(), 0.0)
//!     })
//!     .collect();
//! let curves = CurveSet::from_polyline(points);
//!
//! // Start with the normal pointing at the center.
//! let config = FrameConfig::default().with_preferred_normal(-Vector3::x());
//! let arrays = compute_frames(&curves, &config).unwrap();
//!
//! // A planar curve keeps a constant binormal.
//! for frame in arrays.iter_frames() {
//!     assert!((frame.binormal - Vector3::z()).norm() < 1e-9);
//! }
//! ```
//!
//! # Degenerate input
//!
//! Cells with fewer than two points, or whose points all coincide, are skipped
//! and their points keep zero vectors. Coincident consecutive points inside a
//! cell are handled without producing NaN. Only configuration problems are
//! reported as errors ([`FrameError`]).
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for configuration, frames,
//!   curve sets and output arrays

#![doc(html_root_url = "https://docs.rs/curve-frames/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::needless_range_loop,
    clippy::ptr_arg
)]

mod attributes;
mod compute;
mod config;
mod curves;
mod error;
mod frame;
mod initial;
mod transport;

pub use attributes::{FrameArrays, PointVectorArray};
pub use compute::{
    compute_frames, compute_frames_with, polyline_frames, polyline_frames_with, polyline_tangents,
    write_cell_frames,
};
pub use config::{
    DEFAULT_BINORMALS_ARRAY_NAME, DEFAULT_NORMALS_ARRAY_NAME, DEFAULT_TANGENTS_ARRAY_NAME,
    FrameConfig, TransportMethod,
};
pub use curves::CurveSet;
pub use error::{FrameError, FrameResult};
pub use frame::Frame;
pub use initial::{initial_frame, initial_tangent};
pub use transport::{DoubleReflection, FrameTransport, RotationTransport, rotate_about_axis};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
