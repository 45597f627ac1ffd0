//! Statistics gathered while building an octree.

use super::{LeafRegistry, OctreeNode};

/// Shape of a built octree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
	/// Number of points indexed.
	pub point_count: usize,
	/// Arena size (internal nodes + all leaves, pruned children excluded).
	pub node_count: usize,
	/// Registered leaves.
	pub leaf_count: usize,
	/// Registered leaves holding no points (fixed-depth mode only).
	pub empty_leaf_count: usize,
	/// Deepest leaf level (root = 0).
	pub leaf_level_max: u32,
	/// Largest leaf population.
	pub max_points_per_leaf: usize,
	/// Wall-clock build time in microseconds.
	pub build_time_us: u64,
}

impl OctreeStats {
	pub(crate) fn collect(
		nodes: &[OctreeNode],
		leaves: &LeafRegistry,
		point_count: usize,
		build_time_us: u64,
	) -> Self {
		let mut stats = Self {
			point_count,
			node_count: nodes.len(),
			leaf_count: leaves.len(),
			build_time_us,
			..Default::default()
		};

		for (_, &id) in leaves.iter() {
			let leaf = &nodes[id];
			let population = leaf.point_indices().len();
			if population == 0 {
				stats.empty_leaf_count += 1;
			}
			stats.max_points_per_leaf = stats.max_points_per_leaf.max(population);
			stats.leaf_level_max = stats.leaf_level_max.max(leaf.depth());
		}

		stats
	}

	/// Mean population of the non-empty leaves.
	#[inline]
	pub fn average_points_per_leaf(&self) -> f64 {
		let occupied = self.leaf_count - self.empty_leaf_count;
		if occupied == 0 {
			0.0
		} else {
			self.point_count as f64 / occupied as f64
		}
	}

	/// Number of internal (split) nodes.
	#[inline]
	pub fn internal_node_count(&self) -> usize {
		self.node_count - self.leaf_count
	}
}
