//! # FormCheck-Core
//!
//! Core types and the geometric pipeline used to compare a user's pose
//! against a reference pose for an exercise.
//!
//! ## Pipeline
//!
//! ```text
//! reference Pose ──► normalize ──┐
//!                                ├──► deviations ──► DeviationReport
//! user Pose ───────► normalize ──┘
//! ```
//!
//! Both poses are rescaled into their own bounding box so that camera
//! distance and framing drop out, then the interior angle at each vertex of
//! the [`ANGLE_CATALOG`] is compared.

pub mod deviation;
pub mod error;
pub mod geometry;
pub mod types;

pub use deviation::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
