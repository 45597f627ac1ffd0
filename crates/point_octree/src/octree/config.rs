//! OctreeConfig - partition policy and construction limits.

use crate::constants::{BOUNDS_EPSILON, MAX_DEPTH, MAX_KEY_DEPTH, TARGET_POINTS_PER_LEAF};
use crate::error::BuildError;

/// How the partitioner decides where to stop splitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionPolicy {
  /// Every leaf sits at the same level. `depth` counts levels including the
  /// root, so leaves are at level `depth - 1`. `None` picks a depth from the
  /// point count (see [`default_depth`]).
  FixedDepth { depth: Option<u32> },

  /// Split a node while it holds more than this many points, up to the
  /// configured `max_depth`. Empty children are pruned.
  MaxPointsPerLeaf(usize),
}

impl PartitionPolicy {
  /// Fixed depth derived from the point count.
  pub const AUTO: Self = Self::FixedDepth { depth: None };

  /// Fixed depth chosen by the caller.
  pub fn fixed(depth: u32) -> Self {
    Self::FixedDepth { depth: Some(depth) }
  }

  /// Adaptive depth with a leaf capacity.
  pub fn max_points_per_leaf(max_points: usize) -> Self {
    Self::MaxPointsPerLeaf(max_points)
  }
}

impl Default for PartitionPolicy {
  fn default() -> Self {
    Self::AUTO
  }
}

/// Partition policy after validation against a concrete point count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
  /// All leaves at level `depth - 1`.
  Fixed { depth: u32 },
  /// Split while a node holds more than `max_points_per_leaf` points.
  Adaptive { max_points_per_leaf: usize, max_depth: u32 },
}

/// Configuration for octree construction.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeConfig {
  /// Stopping rule for the partitioner.
  pub policy: PartitionPolicy,

  /// Cap on tree levels (root included). Bounds recursion on degenerate
  /// input such as many duplicate points.
  pub max_depth: u32,

  /// Margin added to the largest bounding extent so boundary points are
  /// strictly inside the root cube.
  pub bounds_epsilon: f64,
}

impl OctreeConfig {
  /// Auto fixed depth, `MAX_DEPTH` levels, 1e-4 margin.
  pub const DEFAULT: Self = Self {
    policy: PartitionPolicy::AUTO,
    max_depth: MAX_DEPTH,
    bounds_epsilon: BOUNDS_EPSILON,
  };

  /// Default config with the given policy.
  pub fn with_policy(policy: PartitionPolicy) -> Self {
    Self {
      policy,
      ..Self::DEFAULT
    }
  }

  /// Override the level cap.
  pub fn max_depth(mut self, max_depth: u32) -> Self {
    self.max_depth = max_depth;
    self
  }

  /// Override the bounding margin.
  pub fn bounds_epsilon(mut self, epsilon: f64) -> Self {
    self.bounds_epsilon = epsilon;
    self
  }

  /// Validate the configuration and pick the concrete partition for
  /// `point_count` points.
  pub fn resolve(&self, point_count: usize) -> Result<Partition, BuildError> {
    if self.max_depth < 1 || self.max_depth > MAX_KEY_DEPTH {
      return Err(BuildError::InvalidDepth {
        depth: self.max_depth,
        max: MAX_KEY_DEPTH,
      });
    }
    if !self.bounds_epsilon.is_finite() || self.bounds_epsilon <= 0.0 {
      return Err(BuildError::InvalidEpsilon(self.bounds_epsilon));
    }

    // Fixed depth allocates every node down to the leaf level; a raised
    // max_depth only applies to adaptive trees.
    let fixed_cap = self.max_depth.min(MAX_DEPTH);
    match self.policy {
      PartitionPolicy::FixedDepth { depth: Some(depth) } => {
        if depth < 1 || depth > fixed_cap {
          return Err(BuildError::InvalidDepth {
            depth,
            max: fixed_cap,
          });
        }
        Ok(Partition::Fixed { depth })
      }
      PartitionPolicy::FixedDepth { depth: None } => Ok(Partition::Fixed {
        depth: default_depth(point_count, fixed_cap),
      }),
      PartitionPolicy::MaxPointsPerLeaf(0) => Err(BuildError::InvalidMaxPointsPerLeaf(0)),
      PartitionPolicy::MaxPointsPerLeaf(max_points_per_leaf) => Ok(Partition::Adaptive {
        max_points_per_leaf,
        max_depth: self.max_depth,
      }),
    }
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Default fixed depth for `point_count` points.
///
/// `depth = clamp(ceil(log8((n + 1) / 64)) + 1, 1, max_depth)`: grows by one
/// level per 8x more points, aiming at a few dozen points per leaf. The log
/// is taken by counting powers of 8 in integers so exact powers don't round
/// up a level.
pub fn default_depth(point_count: usize, max_depth: u32) -> u32 {
  let target = (point_count as u128) + 1;
  let mut capacity = TARGET_POINTS_PER_LEAF as u128;
  let mut levels = 1u32;
  while capacity < target && levels < max_depth {
    capacity *= 8;
    levels += 1;
  }
  levels.max(1)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
