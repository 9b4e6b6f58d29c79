use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::BuildHasher;

use crate::node::NodeId;
use crate::quorum::node_set::NodeSet;

impl NodeSet for BTreeSet<NodeId> {
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.contains(node_id)
    }
}

impl<S> NodeSet for HashSet<NodeId, S>
where S: BuildHasher
{
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.contains(node_id)
    }
}

/// A map is treated as the set of its keys, e.g., the latest statement of
/// every node.
impl<T> NodeSet for BTreeMap<NodeId, T> {
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.contains_key(node_id)
    }
}

impl<T, S> NodeSet for HashMap<NodeId, T, S>
where S: BuildHasher
{
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.contains_key(node_id)
    }
}

/// Membership in a slice is a linear scan, use a set for large inputs.
impl NodeSet for [NodeId] {
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.contains(node_id)
    }
}

impl NodeSet for Vec<NodeId> {
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.as_slice().contains_node(node_id)
    }
}

impl<T> NodeSet for &T
where T: NodeSet + ?Sized
{
    fn contains_node(&self, node_id: &NodeId) -> bool {
        (**self).contains_node(node_id)
    }
}
