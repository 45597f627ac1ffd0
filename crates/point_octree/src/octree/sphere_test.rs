use glam::DVec3;

use super::*;
use crate::octree::test_utils::{
  all_configs, brute_force_sphere, clustered_cloud, octant_cloud, random_cloud,
};
use crate::octree::{OctreeConfig, PartitionPolicy};

// =========================================================================
// Correctness against brute force
// =========================================================================

/// Exactly the points within the radius, for every policy and radius.
#[test]
fn test_sphere_matches_brute_force() {
  let points = random_cloud(50, 500, 1.0);
  for config in all_configs() {
    let tree = Octree::build(&points, &config).unwrap();
    for radius in [0.0, 0.05, 0.2, 0.5, 3.0] {
      for i in (0..points.len()).step_by(23) {
        let center = points[i];
        let got = tree.neighbors_in_sphere(&points, center, radius).unwrap();
        let expected = brute_force_sphere(&points, center, radius);
        assert_eq!(got, expected, "r = {}, i = {}, {:?}", radius, i, config.policy);
      }
    }
  }
}

/// Centers away from any point, including near the root faces.
#[test]
fn test_sphere_arbitrary_centers() {
  let points = random_cloud(51, 300, 2.0);
  for config in all_configs() {
    let tree = Octree::build(&points, &config).unwrap();
    let cube = tree.root_cube();
    let centers = [
      cube.center,
      cube.min(),
      cube.max(),
      cube.center + DVec3::new(cube.half_extent * 0.9, 0.0, -cube.half_extent * 0.3),
    ];
    for center in centers {
      for radius in [0.1, 0.7, 1.5] {
        let got = tree.neighbors_in_sphere(&points, center, radius).unwrap();
        assert_eq!(got, brute_force_sphere(&points, center, radius));
      }
    }
  }
}

/// Clustered data with a ball spanning the gap between two clusters.
#[test]
fn test_sphere_bridges_pruned_space() {
  let points = clustered_cloud(52, 4, 40);
  for config in all_configs() {
    let tree = Octree::build(&points, &config).unwrap();
    let mid = (points[0] + points[40]) * 0.5;
    let radius = points[0].distance(points[40]) * 0.5 + 0.5;
    let got = tree.neighbors_in_sphere(&points, mid, radius).unwrap();
    assert_eq!(got, brute_force_sphere(&points, mid, radius), "{:?}", config.policy);
    assert!(got.contains(&0) && got.contains(&40));
  }
}

// =========================================================================
// Result shape
// =========================================================================

/// Every result is within the radius and distances ascend.
#[test]
fn test_sphere_sound_and_sorted() {
  let points = random_cloud(53, 400, 1.0);
  let tree = Octree::build(&points, &OctreeConfig::default()).unwrap();
  let center = points[7];
  let result = tree
    .neighbors_in_sphere_with_distances(&points, center, 0.4)
    .unwrap();
  assert!(!result.is_empty());
  for &(i, d) in &result {
    assert!(d <= 0.4);
    assert!((points[i].distance(center) - d).abs() < 1e-12);
  }
  for pair in result.windows(2) {
    assert!(pair[0].1 <= pair[1].1);
  }
}

/// A zero radius at an indexed point returns that point (and its duplicates).
#[test]
fn test_sphere_zero_radius() {
  let mut points = random_cloud(54, 100, 1.0);
  points.push(points[3]);
  let tree = Octree::build(&points, &OctreeConfig::default()).unwrap();
  assert_eq!(
    tree.neighbors_in_sphere(&points, points[3], 0.0).unwrap(),
    vec![3, 100]
  );
}

/// A tiny ball around each point finds only that point.
#[test]
fn test_sphere_contained_in_start_cell() {
  let points = octant_cloud();
  let config = OctreeConfig::with_policy(PartitionPolicy::fixed(2));
  let tree = Octree::build(&points, &config).unwrap();
  for i in 0..points.len() {
    assert_eq!(
      tree.neighbors_in_sphere(&points, points[i], 0.01).unwrap(),
      vec![i]
    );
  }
}

/// A ball covering the whole cube returns everything.
#[test]
fn test_sphere_covers_everything() {
  let points = octant_cloud();
  for config in all_configs() {
    let tree = Octree::build(&points, &config).unwrap();
    for radius in [10.0, f64::INFINITY] {
      let mut got = tree.neighbors_in_sphere(&points, DVec3::ZERO, radius).unwrap();
      got.sort_unstable();
      assert_eq!(got, (0..8).collect::<Vec<_>>());
    }
  }
}

/// Ordering among equidistant points follows index.
#[test]
fn test_sphere_ties_by_index() {
  let points = octant_cloud();
  let tree = Octree::build(&points, &OctreeConfig::default()).unwrap();
  // every point is at the same distance from the origin
  let got = tree.neighbors_in_sphere(&points, DVec3::ZERO, 1.0).unwrap();
  assert_eq!(got, (0..8).collect::<Vec<_>>());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_sphere_invalid_radius() {
  let points = random_cloud(55, 50, 1.0);
  let tree = Octree::build(&points, &OctreeConfig::default()).unwrap();

  assert_eq!(
    tree.neighbors_in_sphere(&points, points[0], -0.5),
    Err(QueryError::InvalidRadius(-0.5))
  );
  assert!(matches!(
    tree.neighbors_in_sphere(&points, points[0], f64::NAN),
    Err(QueryError::InvalidRadius(r)) if r.is_nan()
  ));
}

#[test]
fn test_sphere_bad_center() {
  let points = random_cloud(56, 50, 1.0);
  let tree = Octree::build(&points, &OctreeConfig::default()).unwrap();

  let outside = DVec3::new(0.0, -9.0, 0.0);
  assert_eq!(
    tree.neighbors_in_sphere(&points, outside, 1.0),
    Err(QueryError::OutOfBounds(outside))
  );
  assert!(matches!(
    tree.neighbors_in_sphere(&points, DVec3::new(0.0, f64::INFINITY, 0.0), 1.0),
    Err(QueryError::NonFinitePoint(_))
  ));
}
