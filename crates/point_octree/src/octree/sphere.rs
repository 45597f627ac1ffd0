//! Fixed-radius (sphere) neighbour search.
//!
//! Cells are pruned with box/sphere tests before any point distance is
//! computed: the walk starts in the cell holding the center, stops at once if
//! that cell strictly contains the ball, and otherwise spreads through
//! adjacency only into cells whose cube intersects the ball.

use glam::DVec3;

use super::Octree;
use crate::error::QueryError;
use crate::points::PointSource;

impl Octree {
  /// Indices of all points within `radius` of `center` (inclusive), nearest
  /// first, ties by ascending index.
  ///
  /// # Errors
  /// - [`QueryError::InvalidRadius`] for a negative or NaN radius.
  /// - [`QueryError::NonFinitePoint`] / [`QueryError::OutOfBounds`] if
  ///   `center` is not finite or lies outside the root cube.
  pub fn neighbors_in_sphere<P: PointSource + ?Sized>(
    &self,
    points: &P,
    center: DVec3,
    radius: f64,
  ) -> Result<Vec<usize>, QueryError> {
    Ok(
      self
        .neighbors_in_sphere_with_distances(points, center, radius)?
        .into_iter()
        .map(|(index, _)| index)
        .collect(),
    )
  }

  /// Like [`Octree::neighbors_in_sphere`], with the distance of each point.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::neighbors_in_sphere"))]
  pub fn neighbors_in_sphere_with_distances<P: PointSource + ?Sized>(
    &self,
    points: &P,
    center: DVec3,
    radius: f64,
  ) -> Result<Vec<(usize, f64)>, QueryError> {
    self.debug_check_source(points);

    if radius.is_nan() || radius < 0.0 {
      return Err(QueryError::InvalidRadius(radius));
    }
    if !center.is_finite() {
      return Err(QueryError::NonFinitePoint(center));
    }
    if !self.root_cube().contains_point(center) {
      return Err(QueryError::OutOfBounds(center));
    }

    let radius_sq = radius * radius;
    let start = self.locate_cell(center);

    let mut found: Vec<(usize, f64)> = Vec::new();
    self.visit_sphere_cells(start, center, radius_sq, |cell| {
      for &index in self.cell_points(cell) {
        let distance_sq = points.point(index).distance_squared(center);
        if distance_sq <= radius_sq {
          found.push((index, distance_sq));
        }
      }
    });

    found.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    for entry in &mut found {
      entry.1 = entry.1.sqrt();
    }
    Ok(found)
  }
}

#[cfg(test)]
#[path = "sphere_test.rs"]
mod sphere_test;
