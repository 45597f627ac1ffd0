//! OctreeIndex - build-then-query facade over a borrowed point source.
//!
//! Wraps an [`Octree`] together with the point source it was built from so
//! callers don't have to pass the points to every query. The borrow keeps
//! the points immutable for as long as the index lives, and `build` takes
//! `&mut self`, so a rebuild can never be observed half-done by readers.

use glam::DVec3;

use crate::error::{BuildError, QueryError};
use crate::octree::{Octree, OctreeConfig, PartitionPolicy, Query};
use crate::points::PointSource;

/// Built state: the tree plus the points it indexes.
struct Built<'a, P: ?Sized> {
  points: &'a P,
  tree: Octree,
}

/// Spatial index with an explicit not-built / built lifecycle.
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use point_octree::{OctreeIndex, PartitionPolicy};
///
/// let points = vec![
///   DVec3::new(0.0, 0.0, 0.0),
///   DVec3::new(1.0, 0.0, 0.0),
///   DVec3::new(0.0, 2.0, 0.0),
/// ];
///
/// let mut index = OctreeIndex::new();
/// index.build(&points, PartitionPolicy::AUTO).unwrap();
///
/// assert_eq!(index.knn(1, 0usize).unwrap(), vec![1]);
/// assert_eq!(index.neighbors_in_sphere(DVec3::ZERO, 1.5).unwrap(), vec![0, 1]);
/// ```
pub struct OctreeIndex<'a, P: PointSource + ?Sized> {
  config: OctreeConfig,
  built: Option<Built<'a, P>>,
}

impl<'a, P: PointSource + ?Sized> OctreeIndex<'a, P> {
  /// Create an unbuilt index with the default configuration.
  pub fn new() -> Self {
    Self::with_config(OctreeConfig::default())
  }

  /// Create an unbuilt index. `config.policy` is the policy used by
  /// [`OctreeIndex::build_default`].
  pub fn with_config(config: OctreeConfig) -> Self {
    Self {
      config,
      built: None,
    }
  }

  /// Configuration used for builds.
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Build (or rebuild) the index over `points` with the given partition
  /// policy.
  ///
  /// On success the previous tree is discarded entirely. On error the index
  /// is left exactly as it was.
  pub fn build(&mut self, points: &'a P, policy: PartitionPolicy) -> Result<(), BuildError> {
    let config = OctreeConfig {
      policy,
      ..self.config.clone()
    };
    let tree = Octree::build(points, &config)?;
    self.config = config;
    self.built = Some(Built { points, tree });
    Ok(())
  }

  /// Build with the configured policy.
  pub fn build_default(&mut self, points: &'a P) -> Result<(), BuildError> {
    let policy = self.config.policy;
    self.build(points, policy)
  }

  /// Drop the built tree, returning to the not-built state.
  pub fn clear(&mut self) {
    self.built = None;
  }

  /// Check if a build has succeeded.
  pub fn is_built(&self) -> bool {
    self.built.is_some()
  }

  /// The built tree.
  pub fn octree(&self) -> Result<&Octree, QueryError> {
    self.built().map(|b| &b.tree)
  }

  /// The indexed points.
  pub fn points(&self) -> Result<&'a P, QueryError> {
    self.built().map(|b| b.points)
  }

  fn built(&self) -> Result<&Built<'a, P>, QueryError> {
    self.built.as_ref().ok_or(QueryError::NotBuilt)
  }

  /// See [`Octree::knn`].
  pub fn knn(&self, k: usize, query: impl Into<Query>) -> Result<Vec<usize>, QueryError> {
    let built = self.built()?;
    built.tree.knn(built.points, k, query)
  }

  /// See [`Octree::knn_with_distances`].
  pub fn knn_with_distances(
    &self,
    k: usize,
    query: impl Into<Query>,
  ) -> Result<Vec<(usize, f64)>, QueryError> {
    let built = self.built()?;
    built.tree.knn_with_distances(built.points, k, query)
  }

  /// See [`Octree::neighbors_in_sphere`].
  pub fn neighbors_in_sphere(&self, center: DVec3, radius: f64) -> Result<Vec<usize>, QueryError> {
    let built = self.built()?;
    built.tree.neighbors_in_sphere(built.points, center, radius)
  }

  /// See [`Octree::neighbors_in_sphere_with_distances`].
  pub fn neighbors_in_sphere_with_distances(
    &self,
    center: DVec3,
    radius: f64,
  ) -> Result<Vec<(usize, f64)>, QueryError> {
    let built = self.built()?;
    built
      .tree
      .neighbors_in_sphere_with_distances(built.points, center, radius)
  }
}

impl<P: PointSource + ?Sized> Default for OctreeIndex<'_, P> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
