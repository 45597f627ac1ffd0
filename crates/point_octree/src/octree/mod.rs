//! Octree spatial index over a point source.
//!
//! The tree is an arena of [`OctreeNode`]s built once by [`Octree::build`]
//! and immutable afterwards. Every node is addressed by a [`NodeKey`] (its
//! octant path packed 3 bits per level), and leaves are also reachable
//! through a [`LeafRegistry`] so neighbour queries can jump straight to a
//! same-level neighbour without walking the tree.
//!
//! # Module Structure
//!
//! - [`bounds`]: `BoundingCube` - root volume, child cubes, box/sphere tests
//! - [`key`]: `NodeKey` and the path codec / 26-neighbour adjacency
//! - [`node`]: `OctreeNode` - arena entry, internal or leaf
//! - [`config`]: `OctreeConfig` / `PartitionPolicy`
//! - [`leaves`]: `LeafRegistry` - key to leaf lookup
//! - `build`: recursive partitioner (fixed depth and adaptive)
//! - `cells`: resolution of neighbour keys to terminal cells
//! - `knn`: k-nearest-neighbour search
//! - `sphere`: fixed-radius search
//! - [`stats`]: `OctreeStats`

use glam::DVec3;

pub mod bounds;
mod build;
mod cells;
pub mod config;
pub mod key;
mod knn;
pub mod leaves;
pub mod node;
mod sphere;
pub mod stats;

// Re-exports
pub use bounds::BoundingCube;
pub use config::{default_depth, OctreeConfig, Partition, PartitionPolicy};
pub use key::{adjacent26, coordinates_to_key, decode, encode, NodeKey};
pub use knn::Query;
pub use leaves::LeafRegistry;
pub use node::{NodeId, NodeKind, OctreeNode};
pub use stats::OctreeStats;

/// Arena index of the root node.
const ROOT: NodeId = 0;

/// Immutable octree over a point source.
///
/// Holds point indices only. Queries take the same point source that was
/// passed to [`Octree::build`].
#[derive(Clone, Debug)]
pub struct Octree {
  nodes: Vec<OctreeNode>,
  leaves: LeafRegistry,
  partition: Partition,
  point_count: usize,
  stats: OctreeStats,
}

impl Octree {
  /// Cube covering all indexed points.
  #[inline]
  pub fn root_cube(&self) -> BoundingCube {
    self.nodes[ROOT].cube
  }

  /// Root node.
  #[inline]
  pub fn root(&self) -> &OctreeNode {
    &self.nodes[ROOT]
  }

  /// Node by arena index.
  #[inline]
  pub fn node(&self, id: NodeId) -> &OctreeNode {
    &self.nodes[id]
  }

  /// All nodes, root first.
  pub fn nodes(&self) -> &[OctreeNode] {
    &self.nodes
  }

  /// Leaf lookup table.
  pub fn leaves(&self) -> &LeafRegistry {
    &self.leaves
  }

  /// Registered leaf by key.
  pub fn leaf(&self, key: &NodeKey) -> Option<&OctreeNode> {
    self.leaves.get(key).map(|id| &self.nodes[id])
  }

  /// Number of levels, root included.
  pub fn depth(&self) -> u32 {
    self.stats.leaf_level_max + 1
  }

  /// Partition the tree was built with.
  pub fn partition(&self) -> Partition {
    self.partition
  }

  /// Number of points indexed.
  pub fn point_count(&self) -> usize {
    self.point_count
  }

  /// Build statistics.
  pub fn stats(&self) -> &OctreeStats {
    &self.stats
  }

  /// Registered leaf whose cube contains `point`.
  ///
  /// `None` outside the root cube, or inside a pruned empty region.
  pub fn leaf_containing(&self, point: DVec3) -> Option<&OctreeNode> {
    if !self.root_cube().contains_point(point) {
      return None;
    }
    self
      .locate_cell(point)
      .leaf
      .map(|id| &self.nodes[id])
      .filter(|node| self.leaves.contains(&node.key))
  }

  /// Registered same-level leaves adjacent to `key`.
  ///
  /// Keys without a registered leaf (pruned, or covered by a coarser or finer
  /// leaf in adaptive mode) are left out.
  pub fn adjacent_leaves(&self, key: &NodeKey) -> Vec<NodeKey> {
    key
      .adjacent26()
      .into_iter()
      .filter(|neighbor| self.leaves.contains(neighbor))
      .collect()
  }
}

#[cfg(test)]
pub(crate) mod test_utils;
