//! Error types for octree construction and queries.
//!
//! Every variant is a recoverable, caller-visible condition. Internal
//! inconsistencies are construction bugs and are debug-asserted instead.

use glam::DVec3;
use thiserror::Error;

/// Errors returned by `build`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
  /// The point source has no points, or none with finite coordinates.
  #[error("cannot build an octree from an empty point set")]
  EmptyInput,

  /// Depth outside the allowed range.
  #[error("invalid octree depth {depth}: must be in 1..={max}")]
  InvalidDepth { depth: u32, max: u32 },

  /// Leaf capacity of zero.
  #[error("invalid max points per leaf {0}: must be at least 1")]
  InvalidMaxPointsPerLeaf(usize),

  /// Bounding margin that is negative, zero or not finite.
  #[error("invalid bounds epsilon {0}: must be finite and positive")]
  InvalidEpsilon(f64),
}

/// Errors returned by `knn` and `neighbors_in_sphere`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
  /// Query issued before a successful `build`.
  #[error("octree has not been built")]
  NotBuilt,

  /// `k` is not smaller than the number of available neighbours.
  #[error("k = {k} must be smaller than the {available} available points")]
  InvalidArgument { k: usize, available: usize },

  /// Negative or NaN search radius.
  #[error("invalid search radius {0}")]
  InvalidRadius(f64),

  /// Query coordinate outside the root cube.
  #[error("query point {0} lies outside the octree bounds")]
  OutOfBounds(DVec3),

  /// Query index past the end of the point source.
  #[error("point index {index} out of range for {len} points")]
  IndexOutOfRange { index: usize, len: usize },

  /// Query coordinate with a NaN or infinite component.
  #[error("query point {0} is not finite")]
  NonFinitePoint(DVec3),
}
