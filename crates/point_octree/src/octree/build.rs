//! Recursive partitioner.
//!
//! Two policies share one arena layout:
//!
//! 1. **Fixed depth**: the full tree down to the leaf level is allocated
//!    first (empty leaves included, so same-level adjacency lookups always
//!    hit), then each point is dropped down from the root.
//! 2. **Adaptive**: a node is split only when it holds more points than the
//!    leaf capacity; its points are bucketed by octant against the node
//!    center and empty buckets are pruned.

use web_time::Instant;

use super::config::{OctreeConfig, Partition};
use super::node::NodeKind;
use super::stats::OctreeStats;
use super::{BoundingCube, LeafRegistry, NodeId, NodeKey, Octree, OctreeNode, ROOT};
use crate::error::BuildError;
use crate::points::PointSource;

impl Octree {
  /// Build an octree over `points`.
  ///
  /// # Errors
  /// - [`BuildError::EmptyInput`] if there are no points with finite
  ///   coordinates.
  /// - [`BuildError::InvalidDepth`], [`BuildError::InvalidMaxPointsPerLeaf`]
  ///   or [`BuildError::InvalidEpsilon`] for an invalid `config`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::build"))]
  pub fn build<P: PointSource + ?Sized>(points: &P, config: &OctreeConfig) -> Result<Self, BuildError> {
    let started = Instant::now();

    if points.is_empty() {
      return Err(BuildError::EmptyInput);
    }
    let partition = config.resolve(points.len())?;
    let root_cube =
      BoundingCube::from_points(points, config.bounds_epsilon).ok_or(BuildError::EmptyInput)?;

    let mut builder = Builder::default();
    builder.push(OctreeNode::new_leaf(NodeKey::ROOT, root_cube));
    match partition {
      Partition::Fixed { depth } => {
        {
          #[cfg(feature = "tracing")]
          let _span = tracing::info_span!("allocate_fixed").entered();
          builder.allocate_fixed(ROOT, depth - 1);
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("distribute_points").entered();
        builder.distribute(points);
      }
      Partition::Adaptive {
        max_points_per_leaf,
        max_depth,
      } => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("split_adaptive").entered();
        let all: Vec<usize> = (0..points.len()).collect();
        let limits = AdaptiveLimits {
          max_points_per_leaf,
          leaf_level_cap: max_depth - 1,
        };
        builder.split_adaptive(points, ROOT, all, limits);
      }
    }

    let Builder { nodes, leaves } = builder;
    let stats = OctreeStats::collect(
      &nodes,
      &leaves,
      points.len(),
      started.elapsed().as_micros() as u64,
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(
      points = stats.point_count,
      nodes = stats.node_count,
      leaves = stats.leaf_count,
      empty_leaves = stats.empty_leaf_count,
      depth = stats.leaf_level_max + 1,
      max_points_per_leaf = stats.max_points_per_leaf,
      build_time_us = stats.build_time_us,
      "octree built"
    );

    Ok(Self {
      nodes,
      leaves,
      partition,
      point_count: points.len(),
      stats,
    })
  }
}

#[derive(Clone, Copy)]
struct AdaptiveLimits {
  max_points_per_leaf: usize,
  leaf_level_cap: u32,
}

/// Arena under construction.
#[derive(Default)]
struct Builder {
  nodes: Vec<OctreeNode>,
  leaves: LeafRegistry,
}

impl Builder {
  fn push(&mut self, node: OctreeNode) -> NodeId {
    self.nodes.push(node);
    self.nodes.len() - 1
  }

  /// Push one placeholder leaf per octant in `mask`, packed in octant order,
  /// and turn `parent` into an internal node over them. Returns the first
  /// child's index.
  fn split(&mut self, parent: NodeId, mask: u8) -> NodeId {
    let (key, cube) = (self.nodes[parent].key, self.nodes[parent].cube);
    let first_child = self.nodes.len();
    for octant in (0u8..8).filter(|&octant| mask & (1u8 << octant) != 0) {
      self.push(OctreeNode::new_leaf(key.child(octant), cube.child(octant)));
    }
    self.nodes[parent] = OctreeNode::new_internal(key, cube, first_child, mask);
    first_child
  }

  /// Allocate the complete subtree under `id` down to `leaf_level`.
  fn allocate_fixed(&mut self, id: NodeId, leaf_level: u32) {
    let key = self.nodes[id].key;
    if key.level >= leaf_level {
      self.leaves.insert(key, id);
      return;
    }

    let first_child = self.split(id, 0xFF);
    for child in first_child..first_child + 8 {
      self.allocate_fixed(child, leaf_level);
    }
  }

  /// Drop every point from the root into its leaf.
  fn distribute<P: PointSource + ?Sized>(&mut self, points: &P) {
    for index in 0..points.len() {
      let p = points.point(index);
      let mut id = ROOT;
      loop {
        let node = &mut self.nodes[id];
        if let NodeKind::Leaf { points: members } = &mut node.kind {
          members.push(index);
          break;
        }
        match node.child(node.cube.octant_of(p)) {
          Some(child) => id = child,
          None => {
            debug_assert!(false, "Fixed-depth tree is missing a child");
            break;
          }
        }
      }
    }
  }

  /// Build the subtree for `indices` under the placeholder leaf `id`,
  /// splitting while over capacity.
  fn split_adaptive<P: PointSource + ?Sized>(
    &mut self,
    points: &P,
    id: NodeId,
    indices: Vec<usize>,
    limits: AdaptiveLimits,
  ) {
    let (key, cube) = (self.nodes[id].key, self.nodes[id].cube);
    if indices.len() <= limits.max_points_per_leaf || key.level >= limits.leaf_level_cap {
      debug_assert!(!indices.is_empty(), "Empty children are pruned, not stored");
      self.nodes[id].kind = NodeKind::Leaf { points: indices };
      self.leaves.insert(key, id);
      return;
    }

    let mut buckets: [Vec<usize>; 8] = Default::default();
    for index in indices {
      let octant = cube.octant_of(points.point(index));
      buckets[octant as usize].push(index);
    }

    let mask = buckets
      .iter()
      .enumerate()
      .filter(|(_, bucket)| !bucket.is_empty())
      .fold(0u8, |mask, (octant, _)| mask | (1u8 << octant));
    let mut child = self.split(id, mask);
    for bucket in buckets.into_iter().filter(|bucket| !bucket.is_empty()) {
      self.split_adaptive(points, child, bucket, limits);
      child += 1;
    }
  }
}
