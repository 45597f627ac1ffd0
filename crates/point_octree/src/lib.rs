//! point_octree - octree spatial index for unordered 3D point clouds
//!
//! This crate answers the two neighbour queries every point-cloud algorithm
//! is built on (normal estimation, resampling, downsampling, skeleton
//! extraction): k-nearest-neighbour and fixed-radius search.
//!
//! # Features
//!
//! - **Two partition policies**: fixed depth (all leaves at one level, depth
//!   from the point count by default) or adaptive max-points-per-leaf
//! - **Bit-packed node keys**: 3 bits per level, decoded to grid coordinates
//!   for 26-neighbour adjacency without tree traversal
//! - **Exact queries**: k-NN and sphere results match a brute-force scan,
//!   with box/sphere pruning keeping the scanned region local
//! - **No copies**: the tree stores point indices; coordinates are read from
//!   any [`PointSource`]
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use point_octree::{Octree, OctreeConfig, PartitionPolicy};
//!
//! let points: Vec<DVec3> = (0..100)
//!   .map(|i| DVec3::new(i as f64, (i % 7) as f64, (i % 3) as f64))
//!   .collect();
//!
//! let config = OctreeConfig::with_policy(PartitionPolicy::max_points_per_leaf(8));
//! let tree = Octree::build(&points, &config).unwrap();
//!
//! let nearest = tree.knn(&points, 4, 50usize).unwrap();
//! assert_eq!(nearest.len(), 4);
//!
//! let close = tree.neighbors_in_sphere(&points, points[50], 1.5).unwrap();
//! assert_eq!(close[0], 50);
//! ```
//!
//! # Concurrency
//!
//! A built [`Octree`] is immutable: any number of threads may query it at
//! once as long as the point source is not mutated. Construction is
//! single-threaded.

pub mod constants;
pub mod error;
pub mod points;

// Re-export commonly used items
pub use constants::{BOUNDS_EPSILON, MAX_DEPTH, MAX_KEY_DEPTH};
pub use error::{BuildError, QueryError};
pub use points::PointSource;

// Octree module: partitioning, key codec and neighbour searches
pub mod octree;
pub use octree::{
  BoundingCube, NodeKey, Octree, OctreeConfig, OctreeNode, OctreeStats, PartitionPolicy, Query,
};

// Stateful build/query facade
pub mod index;
pub use index::OctreeIndex;
