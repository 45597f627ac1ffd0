//! Terminal cells and neighbour resolution.
//!
//! A terminal cell is a piece of the root cube that is not subdivided
//! further: either a leaf, or a vacant child slot pruned in adaptive mode.
//! Terminal cells tile the root cube, so walking them by adjacency reaches
//! every region of space, including across empty gaps.
//!
//! Neighbour keys from [`NodeKey::adjacent26`] are same-level; resolving one
//! yields:
//! - the registered leaf with that key (fast path through the registry),
//! - the coarser leaf or vacant slot covering it, or
//! - every terminal cell below it, if that node was split further.

use std::collections::{HashSet, VecDeque};

use glam::DVec3;
use smallvec::SmallVec;

use super::node::NodeKind;
use super::{BoundingCube, NodeId, NodeKey, Octree, ROOT};
use crate::points::PointSource;

/// A terminal cell of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
  pub key: NodeKey,
  pub cube: BoundingCube,
  /// Arena index if this cell is a leaf; `None` for a vacant slot.
  pub leaf: Option<NodeId>,
}

pub(crate) type CellBuf = SmallVec<[Cell; 32]>;

impl Octree {
  fn leaf_cell(&self, id: NodeId) -> Cell {
    let node = &self.nodes[id];
    Cell {
      key: node.key,
      cube: node.cube,
      leaf: Some(id),
    }
  }

  /// Terminal cell containing `point` (which must be inside the root cube).
  pub(crate) fn locate_cell(&self, point: DVec3) -> Cell {
    let mut id = ROOT;
    loop {
      let node = &self.nodes[id];
      match &node.kind {
        NodeKind::Leaf { .. } => return self.leaf_cell(id),
        NodeKind::Internal { .. } => {
          let octant = node.cube.octant_of(point);
          match node.child(octant) {
            Some(child) => id = child,
            None => {
              return Cell {
                key: node.key.child(octant),
                cube: node.cube.child(octant),
                leaf: None,
              }
            }
          }
        }
      }
    }
  }

  /// Push the terminal cells covering the node slot `key` into `out`.
  pub(crate) fn resolve_cells(&self, key: NodeKey, out: &mut CellBuf) {
    if let Some(id) = self.leaves.get(&key) {
      out.push(self.leaf_cell(id));
      return;
    }

    let mut id = ROOT;
    for level in 1..=key.level {
      let node = &self.nodes[id];
      match &node.kind {
        // Covered by a coarser leaf
        NodeKind::Leaf { .. } => {
          out.push(self.leaf_cell(id));
          return;
        }
        NodeKind::Internal { .. } => {
          let octant = key.octant_at(level);
          match node.child(octant) {
            Some(child) => id = child,
            None => {
              out.push(Cell {
                key: node.key.child(octant),
                cube: node.cube.child(octant),
                leaf: None,
              });
              return;
            }
          }
        }
      }
    }

    self.collect_terminal(id, out);
  }

  /// Push every terminal cell in the subtree rooted at `id`.
  fn collect_terminal(&self, id: NodeId, out: &mut CellBuf) {
    let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
    stack.push(id);
    while let Some(id) = stack.pop() {
      let node = &self.nodes[id];
      match &node.kind {
        NodeKind::Leaf { .. } => out.push(self.leaf_cell(id)),
        NodeKind::Internal { .. } => {
          for octant in 0u8..8 {
            match node.child(octant) {
              Some(child) => stack.push(child),
              None => out.push(Cell {
                key: node.key.child(octant),
                cube: node.cube.child(octant),
                leaf: None,
              }),
            }
          }
        }
      }
    }
  }

  /// Push every terminal cell touching `cell` into `out`.
  ///
  /// May contain duplicates and a few non-touching cells below a split
  /// neighbour; callers deduplicate by key and filter geometrically.
  pub(crate) fn neighbor_cells(&self, cell: &Cell, out: &mut CellBuf) {
    for neighbor in cell.key.adjacent26() {
      self.resolve_cells(neighbor, out);
    }
  }

  /// Points stored in a cell.
  #[inline]
  pub(crate) fn cell_points(&self, cell: &Cell) -> &[usize] {
    match cell.leaf {
      Some(id) => self.nodes[id].point_indices(),
      None => &[],
    }
  }

  /// Breadth-first walk over all terminal cells whose cube intersects the
  /// closed ball (`center`, `radius_sq.sqrt()`), starting from `start`, which
  /// must contain `center`.
  ///
  /// Stops immediately when `start` strictly contains the ball.
  pub(crate) fn visit_sphere_cells(
    &self,
    start: Cell,
    center: DVec3,
    radius_sq: f64,
    mut visit: impl FnMut(&Cell),
  ) {
    visit(&start);

    let clearance = start.cube.clearance(center);
    if clearance > 0.0 && clearance * clearance > radius_sq {
      return;
    }

    let mut seen: HashSet<NodeKey> = HashSet::new();
    seen.insert(start.key);
    let mut frontier = VecDeque::from([start]);
    let mut scratch = CellBuf::new();

    while let Some(cell) = frontier.pop_front() {
      self.neighbor_cells(&cell, &mut scratch);
      for neighbor in scratch.drain(..) {
        if !seen.insert(neighbor.key) {
          continue;
        }
        if neighbor.cube.distance_squared_to(center) <= radius_sq {
          visit(&neighbor);
          frontier.push_back(neighbor);
        }
      }
    }
  }

  #[inline]
  pub(crate) fn debug_check_source<P: PointSource + ?Sized>(&self, points: &P) {
    debug_assert_eq!(
      points.len(),
      self.point_count,
      "Point source changed since the octree was built"
    );
  }
}

#[cfg(test)]
#[path = "cells_test.rs"]
mod cells_test;
