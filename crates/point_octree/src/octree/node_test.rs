use super::*;

fn unit_cube() -> BoundingCube {
  BoundingCube::new(DVec3::ZERO, 1.0)
}

/// A fresh leaf holds no points and reports no children.
#[test]
fn test_new_leaf() {
  let node = OctreeNode::new_leaf(NodeKey::ROOT, unit_cube());

  assert!(node.is_leaf());
  assert!(node.point_indices().is_empty());
  assert_eq!(node.children().count(), 0);
  assert_eq!(node.depth(), 0);
  assert_eq!(node.center(), DVec3::ZERO);
  assert_eq!(node.half_extent(), 1.0);
}

/// Internal nodes never expose point indices.
#[test]
fn test_internal_has_no_points() {
  let node = OctreeNode::new_internal(NodeKey::ROOT, unit_cube(), 10, 0b1000_1000);
  assert!(!node.is_leaf());
  assert!(node.point_indices().is_empty());

  assert_eq!(node.child(3), Some(10));
  assert_eq!(node.child(7), Some(11));
  assert_eq!(node.child(0), None);
  let listed: Vec<_> = node.children().collect();
  assert_eq!(listed, vec![(3, 10), (7, 11)]);
}

/// Present children are packed in octant order after `first_child`.
#[test]
fn test_child_slots_are_packed() {
  let full = OctreeNode::new_internal(NodeKey::ROOT, unit_cube(), 1, 0xFF);
  for octant in 0u8..8 {
    assert_eq!(full.child(octant), Some(1 + octant as usize));
  }

  let sparse = OctreeNode::new_internal(NodeKey::ROOT, unit_cube(), 40, 0b0110_0001);
  let listed: Vec<_> = sparse.children().collect();
  assert_eq!(listed, vec![(0, 40), (5, 41), (6, 42)]);
}

/// Node stays small enough for a full fixed-depth arena.
#[test]
fn test_node_kind_is_compact() {
  assert!(std::mem::size_of::<NodeKind>() <= 32);
}

/// Leaf children lookups are always None.
#[test]
fn test_leaf_child_is_none() {
  let mut node = OctreeNode::new_leaf(NodeKey::ROOT.child(2), unit_cube().child(2));
  if let NodeKind::Leaf { points } = &mut node.kind {
    points.extend([4, 5, 6]);
  }

  assert_eq!(node.depth(), 1);
  assert_eq!(node.point_indices(), &[4, 5, 6]);
  for octant in 0u8..8 {
    assert!(node.child(octant).is_none());
  }
}
