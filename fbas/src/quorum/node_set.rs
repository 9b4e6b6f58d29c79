use std::collections::BTreeMap;

use crate::node::NodeId;

/// A set of nodes a quorum set is evaluated against.
///
/// The predicates only need membership tests, so any collection keyed by
/// [`NodeId`] can be passed in as is, without building a set first.
pub trait NodeSet {
    fn contains_node(&self, node_id: &NodeId) -> bool;
}

/// The nodes of a statement map whose statement satisfies a predicate.
///
/// It is a view: the statements are filtered lazily on every membership test.
pub struct FilteredNodes<'a, T, P>
where P: Fn(&T) -> bool
{
    statements: &'a BTreeMap<NodeId, T>,
    predicate: P,
}

impl<'a, T, P> FilteredNodes<'a, T, P>
where P: Fn(&T) -> bool
{
    pub fn new(statements: &'a BTreeMap<NodeId, T>, predicate: P) -> Self {
        Self {
            statements,
            predicate,
        }
    }

    /// The ids of the nodes in this view, in key order.
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = &'a NodeId> + '_ {
        self.statements
            .iter()
            .filter(|(_, st)| (self.predicate)(st))
            .map(|(node_id, _)| node_id)
    }
}

impl<'a, T, P> NodeSet for FilteredNodes<'a, T, P>
where P: Fn(&T) -> bool
{
    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.statements.get(node_id).map_or(false, |st| (self.predicate)(st))
    }
}
