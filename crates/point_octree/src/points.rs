//! Point sources - the read-only point buffers an octree indexes.
//!
//! The octree never copies coordinates. It stores point indices and reads
//! positions back through a [`PointSource`] handle passed to every query.

use glam::{DVec3, Vec3};

/// A finite, indexable sequence of 3D coordinates.
///
/// Must be stable (same length, same coordinates) for the lifetime of any
/// octree built from it.
pub trait PointSource {
  /// Number of points.
  fn len(&self) -> usize;

  /// Position of the point at `index`.
  ///
  /// # Panics
  /// May panic if `index >= self.len()`.
  fn point(&self, index: usize) -> DVec3;

  /// Check if there are no points.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl PointSource for [DVec3] {
  #[inline]
  fn len(&self) -> usize {
    <[DVec3]>::len(self)
  }

  #[inline]
  fn point(&self, index: usize) -> DVec3 {
    self[index]
  }
}

impl PointSource for [Vec3] {
  #[inline]
  fn len(&self) -> usize {
    <[Vec3]>::len(self)
  }

  #[inline]
  fn point(&self, index: usize) -> DVec3 {
    self[index].as_dvec3()
  }
}

impl PointSource for [[f64; 3]] {
  #[inline]
  fn len(&self) -> usize {
    <[[f64; 3]]>::len(self)
  }

  #[inline]
  fn point(&self, index: usize) -> DVec3 {
    DVec3::from_array(self[index])
  }
}

impl<T> PointSource for Vec<T>
where
  [T]: PointSource,
{
  #[inline]
  fn len(&self) -> usize {
    self.as_slice().len()
  }

  #[inline]
  fn point(&self, index: usize) -> DVec3 {
    self.as_slice().point(index)
  }
}

impl<S: PointSource + ?Sized> PointSource for &S {
  #[inline]
  fn len(&self) -> usize {
    (**self).len()
  }

  #[inline]
  fn point(&self, index: usize) -> DVec3 {
    (**self).point(index)
  }
}
