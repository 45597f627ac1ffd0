//! Shared fixtures and brute-force references for octree tests.

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{OctreeConfig, PartitionPolicy};

/// Uniform random points in `[-extent, extent)^3`.
pub fn random_cloud(seed: u64, count: usize, extent: f64) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      DVec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
      )
    })
    .collect()
}

/// Tight clusters separated by empty space (exercises pruned regions).
pub fn clustered_cloud(seed: u64, clusters: usize, per_cluster: usize) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut points = Vec::with_capacity(clusters * per_cluster);
  for _ in 0..clusters {
    let center = DVec3::new(
      rng.random_range(-10.0..10.0),
      rng.random_range(-10.0..10.0),
      rng.random_range(-10.0..10.0),
    );
    for _ in 0..per_cluster {
      points.push(
        center
          + DVec3::new(
            rng.random_range(-0.3..0.3),
            rng.random_range(-0.3..0.3),
            rng.random_range(-0.3..0.3),
          ),
      );
    }
  }
  points
}

/// One point per octant of a unit cube centered at the origin.
///
/// Point `i` sits in octant `i`. The x offsets are small, so the nearest
/// neighbour of point `i` is always its mirror across x, point `i ^ 4`.
pub fn octant_cloud() -> Vec<DVec3> {
  (0u8..8)
    .map(|octant| {
      let sign = |bit: u8| if octant & bit != 0 { 1.0 } else { -1.0 };
      DVec3::new(sign(4) * 0.1, sign(2) * 0.5, sign(1) * 0.5)
    })
    .collect()
}

/// Configurations covering both policies and sparse/dense leaves.
pub fn all_configs() -> Vec<OctreeConfig> {
  vec![
    OctreeConfig::default(),
    OctreeConfig::with_policy(PartitionPolicy::fixed(2)),
    OctreeConfig::with_policy(PartitionPolicy::fixed(5)),
    OctreeConfig::with_policy(PartitionPolicy::max_points_per_leaf(1)),
    OctreeConfig::with_policy(PartitionPolicy::max_points_per_leaf(4)),
    OctreeConfig::with_policy(PartitionPolicy::max_points_per_leaf(32)),
  ]
}

/// k nearest by exhaustive scan, ordered by (distance, index).
pub fn brute_force_knn(
  points: &[DVec3],
  query: DVec3,
  k: usize,
  exclude: Option<usize>,
) -> Vec<usize> {
  let mut all: Vec<(f64, usize)> = points
    .iter()
    .enumerate()
    .filter(|(i, _)| Some(*i) != exclude)
    .map(|(i, p)| (p.distance_squared(query), i))
    .collect();
  all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
  all.into_iter().take(k).map(|(_, i)| i).collect()
}

/// Points within `radius` by exhaustive scan, ordered by (distance, index).
pub fn brute_force_sphere(points: &[DVec3], center: DVec3, radius: f64) -> Vec<usize> {
  let radius_sq = radius * radius;
  let mut all: Vec<(f64, usize)> = points
    .iter()
    .enumerate()
    .map(|(i, p)| (p.distance_squared(center), i))
    .filter(|(d, _)| *d <= radius_sq)
    .collect();
  all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
  all.into_iter().map(|(_, i)| i).collect()
}
