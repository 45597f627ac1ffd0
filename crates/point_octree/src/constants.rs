//! Octree layout constants.
//!
//! # Key Layout
//!
//! Every node key packs the octant path from the root, 3 bits per level,
//! most significant group = first step below the root:
//!
//! ```text
//! level:        1     2     3   ...   L
//! key bits:  [xyz] [xyz] [xyz] ... [xyz]
//!             ^^^                    ^^^
//!          high bits              low bits
//! ```
//!
//! Octant bits: X = 4, Y = 2, Z = 1, so the octant of a point is
//!
//! ```text
//! octant = 4 * (x >= mid) + 2 * (y >= mid) + (z >= mid)
//! ```
//!
//! A 64-bit key holds at most 21 groups, so a tree may have at most
//! [`MAX_KEY_DEPTH`] levels. In practice depth is capped much lower
//! ([`MAX_DEPTH`]) to bound memory and query cost.

/// Bits consumed by one octree level in a node key.
pub const BITS_PER_LEVEL: u32 = 3;

/// Mask for one level's octant bits.
pub const OCTANT_MASK: u64 = 0b111;

/// Default and recommended cap on the number of tree levels.
pub const MAX_DEPTH: u32 = 10;

/// Hard cap on tree levels imposed by the 64-bit key.
pub const MAX_KEY_DEPTH: u32 = 21;

/// Margin added to the bounding cube so boundary points are strictly inside.
pub const BOUNDS_EPSILON: f64 = 1e-4;

/// Target leaf population used by the default fixed-depth formula.
pub const TARGET_POINTS_PER_LEAF: usize = 64;

/// Octant bit for the X axis.
pub const OCTANT_X: u8 = 0b100;
/// Octant bit for the Y axis.
pub const OCTANT_Y: u8 = 0b010;
/// Octant bit for the Z axis.
pub const OCTANT_Z: u8 = 0b001;

/// The 26 offsets of the face/edge/vertex neighbourhood, `{-1,0,1}^3 \ {0}`.
///
/// Ordered x-major, then y, then z.
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = {
  let mut offsets = [(0, 0, 0); 26];
  let mut i = 0;
  let mut dx = -1;
  while dx <= 1 {
    let mut dy = -1;
    while dy <= 1 {
      let mut dz = -1;
      while dz <= 1 {
        if !(dx == 0 && dy == 0 && dz == 0) {
          offsets[i] = (dx, dy, dz);
          i += 1;
        }
        dz += 1;
      }
      dy += 1;
    }
    dx += 1;
  }
  offsets
};

/// Split an octant index into its (x, y, z) bits.
#[inline(always)]
pub const fn octant_bits(octant: u8) -> (u32, u32, u32) {
  (
    ((octant & OCTANT_X) >> 2) as u32,
    ((octant & OCTANT_Y) >> 1) as u32,
    (octant & OCTANT_Z) as u32,
  )
}

/// Combine (x, y, z) bits into an octant index.
#[inline(always)]
pub const fn octant_from_bits(x: u32, y: u32, z: u32) -> u8 {
  (((x & 1) << 2) | ((y & 1) << 1) | (z & 1)) as u8
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
