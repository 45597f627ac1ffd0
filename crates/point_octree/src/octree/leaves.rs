//! LeafRegistry - key to leaf lookup for adjacency and neighbour queries.
//!
//! Populated once while the tree is built and read-only afterwards. In
//! adaptive mode pruned empty children never appear here.

use std::collections::HashMap;

use super::{NodeId, NodeKey};

/// Leaf lookup table: node key -> arena index.
#[derive(Clone, Debug, Default)]
pub struct LeafRegistry {
  leaves: HashMap<NodeKey, NodeId>,
}

impl LeafRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self {
      leaves: HashMap::new(),
    }
  }

  /// Number of registered leaves.
  pub fn len(&self) -> usize {
    self.leaves.len()
  }

  /// Check if empty.
  pub fn is_empty(&self) -> bool {
    self.leaves.is_empty()
  }

  /// Check if a key belongs to a registered leaf.
  pub fn contains(&self, key: &NodeKey) -> bool {
    self.leaves.contains_key(key)
  }

  /// Arena index of the leaf with this key.
  pub fn get(&self, key: &NodeKey) -> Option<NodeId> {
    self.leaves.get(key).copied()
  }

  /// Register a leaf. Only called by the partitioner.
  pub(crate) fn insert(&mut self, key: NodeKey, id: NodeId) {
    let previous = self.leaves.insert(key, id);
    debug_assert!(previous.is_none(), "Leaf {:?} registered twice", key);
  }

  /// Iterate over (key, arena index) pairs in arbitrary order.
  pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &NodeId)> {
    self.leaves.iter()
  }

  /// Iterate over registered keys in arbitrary order.
  pub fn keys(&self) -> impl Iterator<Item = &NodeKey> {
    self.leaves.keys()
  }
}

#[cfg(test)]
#[path = "leaves_test.rs"]
mod leaves_test;
