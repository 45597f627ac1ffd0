//! Axis-aligned bounding cube with double precision.

use glam::DVec3;

use crate::constants::{OCTANT_X, OCTANT_Y, OCTANT_Z};
use crate::points::PointSource;

/// Isotropic axis-aligned cube: same half-extent on all three axes.
///
/// Used for the root volume of an octree and for every node below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingCube {
	/// Cube center.
	pub center: DVec3,
	/// Half of the edge length.
	pub half_extent: f64,
}

impl BoundingCube {
	/// Create a new cube from center and half-extent.
	///
	/// # Panics
	/// Debug-asserts that `half_extent >= 0`.
	pub fn new(center: DVec3, half_extent: f64) -> Self {
		debug_assert!(half_extent >= 0.0, "Cube half-extent must be >= 0");
		Self { center, half_extent }
	}

	/// Minimal cube enclosing all finite points of `points`.
	///
	/// The edge length is the largest per-axis extent plus `epsilon`, and the
	/// cube is centered on the midpoint of the min/max box (not the centroid),
	/// so every finite point is strictly inside.
	///
	/// Returns `None` if there is no finite point.
	pub fn from_points<P: PointSource + ?Sized>(points: &P, epsilon: f64) -> Option<Self> {
		let mut min = DVec3::splat(f64::INFINITY);
		let mut max = DVec3::splat(f64::NEG_INFINITY);
		let mut any = false;

		for i in 0..points.len() {
			let p = points.point(i);
			if !p.is_finite() {
				continue;
			}
			min = min.min(p);
			max = max.max(p);
			any = true;
		}

		if !any {
			return None;
		}

		let max_extent = (max - min).max_element() + epsilon;
		Some(Self::new((min + max) * 0.5, max_extent * 0.5))
	}

	/// Minimum corner.
	#[inline]
	pub fn min(&self) -> DVec3 {
		self.center - DVec3::splat(self.half_extent)
	}

	/// Maximum corner.
	#[inline]
	pub fn max(&self) -> DVec3 {
		self.center + DVec3::splat(self.half_extent)
	}

	/// Edge length.
	#[inline]
	pub fn size(&self) -> f64 {
		self.half_extent * 2.0
	}

	/// Check if the cube contains a point (boundary inclusive).
	///
	/// NaN coordinates are never contained.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		let d = (point - self.center).abs();
		d.x <= self.half_extent && d.y <= self.half_extent && d.z <= self.half_extent
	}

	/// Octant of `point` relative to the cube center.
	///
	/// A coordinate exactly on the midpoint goes to the upper (`>=`) side.
	/// NaN compares false and goes to the lower side.
	#[inline]
	pub fn octant_of(&self, point: DVec3) -> u8 {
		let mut octant = 0;
		if point.x >= self.center.x {
			octant |= OCTANT_X;
		}
		if point.y >= self.center.y {
			octant |= OCTANT_Y;
		}
		if point.z >= self.center.z {
			octant |= OCTANT_Z;
		}
		octant
	}

	/// Child cube for the given octant (0-7).
	#[inline]
	pub fn child(&self, octant: u8) -> Self {
		let quarter = self.half_extent * 0.5;
		let sign = |bit: u8| if octant & bit != 0 { quarter } else { -quarter };
		Self {
			center: self.center + DVec3::new(sign(OCTANT_X), sign(OCTANT_Y), sign(OCTANT_Z)),
			half_extent: quarter,
		}
	}

	/// Squared distance from `point` to the closest point of the cube.
	///
	/// Zero when the point is inside.
	#[inline]
	pub fn distance_squared_to(&self, point: DVec3) -> f64 {
		let clamped = ((point - self.center).abs() - DVec3::splat(self.half_extent)).max(DVec3::ZERO);
		clamped.length_squared()
	}

	/// Check if the cube and the closed ball (`center`, `radius`) intersect.
	#[inline]
	pub fn intersects_sphere(&self, center: DVec3, radius: f64) -> bool {
		self.distance_squared_to(center) <= radius * radius
	}

	/// Distance from `point` to the nearest face, measured inward.
	///
	/// Negative when the point is outside.
	#[inline]
	pub fn clearance(&self, point: DVec3) -> f64 {
		self.half_extent - (point - self.center).abs().max_element()
	}

	/// Check if the ball lies strictly inside the cube.
	///
	/// Strict so that a point sitting on a shared face at exactly `radius`
	/// (owned by the neighbouring cube) is never missed.
	#[inline]
	pub fn contains_sphere(&self, center: DVec3, radius: f64) -> bool {
		self.clearance(center) > radius
	}
}
