//! Node key codec - bit-packed octant paths.
//!
//! A node's code is its root-to-node octant path folded left to right,
//! `code = (code << 3) | octant`, so the root is 0 and every level appends
//! 3 low bits. The code alone doesn't identify a node (`[0]`, `[0, 0]` and the
//! root all fold to 0), so [`NodeKey`] pairs it with the node's level.
//!
//! Decoding a code gives the node's integer grid position at its own level,
//! which is how same-level adjacency is computed without touching the tree.

use smallvec::SmallVec;

use crate::constants::{octant_bits, octant_from_bits, BITS_PER_LEVEL, NEIGHBOR_OFFSETS, OCTANT_MASK};

/// Node identity: packed octant path plus recursion level (root = 0).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeKey {
  /// Packed octant path, 3 bits per level.
  pub code: u64,
  /// Recursion level, 0 at the root.
  pub level: u32,
}

impl NodeKey {
  /// The root node.
  pub const ROOT: Self = Self { code: 0, level: 0 };

  /// Create a key from a packed code and level.
  #[inline]
  pub fn new(code: u64, level: u32) -> Self {
    Self { code, level }
  }

  /// Key from grid coordinates at `level`.
  #[inline]
  pub fn from_coordinates(x: u32, y: u32, z: u32, level: u32) -> Self {
    Self::new(coordinates_to_key(x, y, z, level), level)
  }

  /// Child key one level down.
  #[inline]
  pub fn child(&self, octant: u8) -> Self {
    Self {
      code: (self.code << BITS_PER_LEVEL) | octant as u64,
      level: self.level + 1,
    }
  }

  /// Parent key, or `None` for the root.
  #[inline]
  pub fn parent(&self) -> Option<Self> {
    if self.level == 0 {
      return None;
    }
    Some(Self {
      code: self.code >> BITS_PER_LEVEL,
      level: self.level - 1,
    })
  }

  /// Octant taken when stepping from `level - 1` to `level` on this key's path.
  ///
  /// `level` must be in `1..=self.level`.
  #[inline]
  pub fn octant_at(&self, level: u32) -> u8 {
    debug_assert!(level >= 1 && level <= self.level);
    ((self.code >> ((self.level - level) * BITS_PER_LEVEL)) & OCTANT_MASK) as u8
  }

  /// Ancestor at `level` (self if `level == self.level`).
  #[inline]
  pub fn ancestor(&self, level: u32) -> Self {
    debug_assert!(level <= self.level);
    Self {
      code: self.code >> ((self.level - level) * BITS_PER_LEVEL),
      level,
    }
  }

  /// Grid coordinates at this key's level.
  #[inline]
  pub fn coordinates(&self) -> (u32, u32, u32) {
    decode(self.code, self.level)
  }

  /// Same-level face/edge/vertex neighbours, clipped at the tree boundary.
  pub fn adjacent26(&self) -> SmallVec<[NodeKey; 26]> {
    adjacent26(self.code, self.level)
      .into_iter()
      .map(|code| Self::new(code, self.level))
      .collect()
  }
}

/// Fold an octant path (root first) into a code.
pub fn encode(octant_path: &[u8]) -> u64 {
  octant_path.iter().fold(0u64, |code, &octant| {
    debug_assert!(octant < 8, "Octant must be 0-7");
    (code << BITS_PER_LEVEL) | (octant as u64 & OCTANT_MASK)
  })
}

/// Decode a code at `level` into grid coordinates, each in `[0, 2^level)`.
///
/// The 3-bit group for the last step holds the least significant coordinate
/// bits; the group for the first step below the root holds the most
/// significant ones.
pub fn decode(code: u64, level: u32) -> (u32, u32, u32) {
  let (mut x, mut y, mut z) = (0u32, 0u32, 0u32);
  for bit in (0..level).rev() {
    let octant = ((code >> (bit * BITS_PER_LEVEL)) & OCTANT_MASK) as u8;
    let (bx, by, bz) = octant_bits(octant);
    x |= bx << bit;
    y |= by << bit;
    z |= bz << bit;
  }
  (x, y, z)
}

/// Encode grid coordinates at `level` into a code. Inverse of [`decode`].
pub fn coordinates_to_key(x: u32, y: u32, z: u32, level: u32) -> u64 {
  let mut code = 0u64;
  for bit in (0..level).rev() {
    let octant = octant_from_bits(x >> bit, y >> bit, z >> bit);
    code = (code << BITS_PER_LEVEL) | octant as u64;
  }
  code
}

/// Codes of the (up to) 26 same-level neighbours of `code`.
///
/// Offsets that leave `[0, 2^level)` on any axis are dropped, so boundary
/// and corner nodes get fewer neighbours. Whether the neighbours exist in a
/// particular tree is up to the caller.
pub fn adjacent26(code: u64, level: u32) -> SmallVec<[u64; 26]> {
  let mut out = SmallVec::new();
  if level == 0 {
    return out;
  }

  let (x, y, z) = decode(code, level);
  let extent = 1i64 << level;
  let in_range = |v: i64| (0..extent).contains(&v);

  for (dx, dy, dz) in NEIGHBOR_OFFSETS {
    let nx = x as i64 + dx as i64;
    let ny = y as i64 + dy as i64;
    let nz = z as i64 + dz as i64;
    if in_range(nx) && in_range(ny) && in_range(nz) {
      out.push(coordinates_to_key(nx as u32, ny as u32, nz as u32, level));
    }
  }
  out
}

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;
