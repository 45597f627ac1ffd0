//! Build and query throughput for both partition policies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::DVec3;
use point_octree::{Octree, OctreeConfig, PartitionPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const QUERY_COUNT: usize = 256;

fn cloud(count: usize) -> Vec<DVec3> {
  let mut rng = StdRng::seed_from_u64(0xC0FFEE);
  (0..count)
    .map(|_| {
      DVec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
      )
    })
    .collect()
}

fn policies() -> [(&'static str, PartitionPolicy); 3] {
  [
    ("auto", PartitionPolicy::AUTO),
    ("fixed_6", PartitionPolicy::fixed(6)),
    ("adaptive_16", PartitionPolicy::max_points_per_leaf(16)),
  ]
}

fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build");
  for count in [10_000usize, 100_000] {
    let points = cloud(count);
    group.throughput(Throughput::Elements(count as u64));
    for (name, policy) in policies() {
      let config = OctreeConfig::with_policy(policy);
      group.bench_with_input(BenchmarkId::new(name, count), &points, |b, points| {
        b.iter(|| Octree::build(black_box(points.as_slice()), &config))
      });
    }
  }
  group.finish();
}

fn bench_knn(c: &mut Criterion) {
  let points = cloud(100_000);
  let mut group = c.benchmark_group("knn");
  group.throughput(Throughput::Elements(QUERY_COUNT as u64));
  for (name, policy) in policies() {
    let tree = Octree::build(&points, &OctreeConfig::with_policy(policy)).unwrap();
    for k in [1usize, 10, 50] {
      group.bench_with_input(BenchmarkId::new(name, k), &k, |b, &k| {
        b.iter(|| {
          for i in 0..QUERY_COUNT {
            black_box(tree.knn(&points, k, i * 97).unwrap());
          }
        })
      });
    }
  }
  group.finish();
}

fn bench_sphere(c: &mut Criterion) {
  let points = cloud(100_000);
  let mut group = c.benchmark_group("neighbors_in_sphere");
  group.throughput(Throughput::Elements(QUERY_COUNT as u64));
  for (name, policy) in policies() {
    let tree = Octree::build(&points, &OctreeConfig::with_policy(policy)).unwrap();
    for radius in [0.02, 0.1] {
      group.bench_with_input(BenchmarkId::new(name, radius), &radius, |b, &radius| {
        b.iter(|| {
          for i in 0..QUERY_COUNT {
            black_box(tree.neighbors_in_sphere(&points, points[i * 97], radius).unwrap());
          }
        })
      });
    }
  }
  group.finish();
}

criterion_group!(benches, bench_build, bench_knn, bench_sphere);
criterion_main!(benches);
