//! k-nearest-neighbour search.
//!
//! # Algorithm
//!
//! 1. **Locate**: descend from the root to the terminal cell holding the
//!    query point.
//! 2. **Ring expansion**: take that cell and its neighbours, then keep adding
//!    the neighbours of the newest ring until at least `k` candidate points
//!    are collected.
//! 3. **Bound**: the k-th smallest candidate distance `r` is an upper bound
//!    on the true k-th neighbour distance.
//! 4. **Refine**: walk every cell intersecting the ball of radius `r` and
//!    keep the k closest points in a bounded max-heap.
//!
//! Step 4 makes the result exact even when the ring from step 2 is lopsided
//! (query near a leaf face, sparse leaves next to dense ones).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use glam::DVec3;

use super::cells::{Cell, CellBuf};
use super::{NodeKey, Octree};
use crate::error::QueryError;
use crate::points::PointSource;

/// Query target for [`Octree::knn`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Query {
  /// Arbitrary coordinate. Must lie inside the root cube.
  Point(DVec3),
  /// A point of the indexed set. The point itself is excluded from results.
  Index(usize),
}

impl From<DVec3> for Query {
  fn from(point: DVec3) -> Self {
    Query::Point(point)
  }
}

impl From<usize> for Query {
  fn from(index: usize) -> Self {
    Query::Index(index)
  }
}

/// Heap entry. Max-heap on (distance, index): the top is the worst kept
/// candidate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
  pub distance_sq: f64,
  pub index: usize,
}

impl PartialEq for Candidate {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Candidate {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .distance_sq
      .total_cmp(&other.distance_sq)
      .then(self.index.cmp(&other.index))
  }
}

/// Fixed-capacity selection of the k smallest candidates.
struct BoundedHeap {
  heap: BinaryHeap<Candidate>,
  k: usize,
}

impl BoundedHeap {
  fn new(k: usize) -> Self {
    Self {
      heap: BinaryHeap::with_capacity(k + 1),
      k,
    }
  }

  #[inline]
  fn offer(&mut self, candidate: Candidate) {
    if self.heap.len() < self.k {
      self.heap.push(candidate);
    } else if let Some(mut worst) = self.heap.peek_mut() {
      if candidate < *worst {
        *worst = candidate;
      }
    }
  }

  /// Largest kept distance once full.
  fn bound(&self) -> Option<f64> {
    if self.heap.len() < self.k {
      return None;
    }
    self.heap.peek().map(|worst| worst.distance_sq)
  }

  fn into_sorted(self) -> Vec<Candidate> {
    self.heap.into_sorted_vec()
  }
}

impl Octree {
  /// Indices of the `k` points nearest to `query`, nearest first.
  ///
  /// Ties are broken by ascending index.
  ///
  /// # Errors
  /// - [`QueryError::InvalidArgument`] if `k` is not smaller than the number
  ///   of points (number of points minus one for [`Query::Index`]).
  /// - [`QueryError::OutOfBounds`] for a coordinate outside the root cube.
  /// - [`QueryError::IndexOutOfRange`] / [`QueryError::NonFinitePoint`] for a
  ///   bad query.
  pub fn knn<P: PointSource + ?Sized>(
    &self,
    points: &P,
    k: usize,
    query: impl Into<Query>,
  ) -> Result<Vec<usize>, QueryError> {
    Ok(
      self
        .knn_with_distances(points, k, query)?
        .into_iter()
        .map(|(index, _)| index)
        .collect(),
    )
  }

  /// Like [`Octree::knn`], with the Euclidean distance of each neighbour.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::knn"))]
  pub fn knn_with_distances<P: PointSource + ?Sized>(
    &self,
    points: &P,
    k: usize,
    query: impl Into<Query>,
  ) -> Result<Vec<(usize, f64)>, QueryError> {
    self.debug_check_source(points);

    let (center, exclude) = match query.into() {
      Query::Point(p) => {
        if !p.is_finite() {
          return Err(QueryError::NonFinitePoint(p));
        }
        if !self.root_cube().contains_point(p) {
          return Err(QueryError::OutOfBounds(p));
        }
        (p, None)
      }
      Query::Index(index) => {
        if index >= points.len() {
          return Err(QueryError::IndexOutOfRange {
            index,
            len: points.len(),
          });
        }
        let p = points.point(index);
        if !p.is_finite() {
          return Err(QueryError::NonFinitePoint(p));
        }
        (p, Some(index))
      }
    };

    let available = self.point_count - usize::from(exclude.is_some());
    if k >= available {
      return Err(QueryError::InvalidArgument { k, available });
    }
    if k == 0 {
      return Ok(Vec::new());
    }

    let start = self.locate_cell(center);

    let mut ring = BoundedHeap::new(k);
    for cell in self.expand_rings(start, k + usize::from(exclude.is_some())) {
      self.offer_cell(&mut ring, points, &cell, center, exclude);
    }
    let Some(radius_sq) = ring.bound() else {
      debug_assert!(false, "Ring expansion ended with fewer than k candidates");
      return Ok(Vec::new());
    };

    let mut best = BoundedHeap::new(k);
    self.visit_sphere_cells(start, center, radius_sq, |cell| {
      self.offer_cell(&mut best, points, cell, center, exclude);
    });

    Ok(
      best
        .into_sorted()
        .into_iter()
        .map(|c| (c.index, c.distance_sq.sqrt()))
        .collect(),
    )
  }

  /// Grow adjacency rings around `start` until they hold at least `needed`
  /// points or every terminal cell has been reached.
  fn expand_rings(&self, start: Cell, needed: usize) -> Vec<Cell> {
    let mut seen: HashSet<NodeKey> = HashSet::new();
    seen.insert(start.key);
    let mut population = self.cell_points(&start).len();
    let mut visited = vec![start];
    let mut ring = vec![start];
    let mut scratch = CellBuf::new();

    // The first ring is always taken, even if the start cell alone suffices.
    let mut first = true;
    while (first || population < needed) && !ring.is_empty() {
      first = false;
      let mut next = Vec::new();
      for cell in &ring {
        self.neighbor_cells(cell, &mut scratch);
        for neighbor in scratch.drain(..) {
          if seen.insert(neighbor.key) {
            population += self.cell_points(&neighbor).len();
            next.push(neighbor);
          }
        }
      }
      visited.extend_from_slice(&next);
      ring = next;
    }

    visited
  }

  #[inline]
  fn offer_cell<P: PointSource + ?Sized>(
    &self,
    heap: &mut BoundedHeap,
    points: &P,
    cell: &Cell,
    center: DVec3,
    exclude: Option<usize>,
  ) {
    for &index in self.cell_points(cell) {
      if Some(index) == exclude {
        continue;
      }
      let distance_sq = points.point(index).distance_squared(center);
      // Non-finite points rank after every finite one.
      let distance_sq = if distance_sq.is_nan() { f64::INFINITY } else { distance_sq };
      heap.offer(Candidate { distance_sq, index });
    }
  }
}

#[cfg(test)]
#[path = "knn_test.rs"]
mod knn_test;
