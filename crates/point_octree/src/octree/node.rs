//! OctreeNode - one cube of space at one recursion level.
//!
//! Nodes live in a flat arena owned by the [`Octree`](super::Octree). The
//! existing children of an internal node are stored next to each other in
//! octant order, so a node only keeps the index of its first child and a
//! bitmask of which octants are present. A node is either internal or a
//! leaf, never both.

use glam::DVec3;

use super::{BoundingCube, NodeKey};

/// Index of a node in the octree arena.
pub type NodeId = usize;

/// Internal/leaf payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
  /// Children stored contiguously from `first_child`, one per set bit of
  /// `mask` (bit `i` = octant `i`). A clear bit is a pruned empty child.
  Internal { first_child: NodeId, mask: u8 },
  /// Indices into the point source of the points inside this cube.
  Leaf { points: Vec<usize> },
}

/// Octree node - arena entry.
#[derive(Clone, Debug)]
pub struct OctreeNode {
  /// Octant path from the root.
  pub key: NodeKey,
  /// Cube covered by this node.
  pub cube: BoundingCube,
  /// Children or point indices.
  pub kind: NodeKind,
}

impl OctreeNode {
  /// Create an empty leaf.
  pub fn new_leaf(key: NodeKey, cube: BoundingCube) -> Self {
    Self {
      key,
      cube,
      kind: NodeKind::Leaf { points: Vec::new() },
    }
  }

  /// Create an internal node whose present children start at `first_child`.
  pub fn new_internal(key: NodeKey, cube: BoundingCube, first_child: NodeId, mask: u8) -> Self {
    Self {
      key,
      cube,
      kind: NodeKind::Internal { first_child, mask },
    }
  }

  /// Recursion depth, 0 at the root.
  #[inline]
  pub fn depth(&self) -> u32 {
    self.key.level
  }

  /// Cube center.
  #[inline]
  pub fn center(&self) -> DVec3 {
    self.cube.center
  }

  /// Cube half-extent (same on all axes).
  #[inline]
  pub fn half_extent(&self) -> f64 {
    self.cube.half_extent
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf { .. })
  }

  /// Point indices of a leaf; empty for internal nodes.
  #[inline]
  pub fn point_indices(&self) -> &[usize] {
    match &self.kind {
      NodeKind::Leaf { points } => points.as_slice(),
      NodeKind::Internal { .. } => &[],
    }
  }

  /// Child in the given octant, if this node is internal and the child exists.
  #[inline]
  pub fn child(&self, octant: u8) -> Option<NodeId> {
    match self.kind {
      NodeKind::Internal { first_child, mask } => {
        let bit = 1u8 << octant;
        if mask & bit == 0 {
          return None;
        }
        Some(first_child + (mask & (bit - 1)).count_ones() as usize)
      }
      NodeKind::Leaf { .. } => None,
    }
  }

  /// Existing children of an internal node, in octant order.
  pub fn children(&self) -> impl Iterator<Item = (u8, NodeId)> + '_ {
    (0u8..8).filter_map(move |octant| self.child(octant).map(|id| (octant, id)))
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
