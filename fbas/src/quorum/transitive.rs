use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::debug;
use tracing::trace;

use crate::node::NodeId;
use crate::quorum::predicates::is_quorum_slice_internal;
use crate::quorum::QuorumSet;

/// Returns `true` if the authors of the statements satisfying `predicate`
/// contain a quorum that also slices `quorum_set`.
///
/// A quorum is a node set that slices the quorum set of every one of its
/// members. Starting from all nodes whose statement satisfies `predicate`,
/// every pass removes the nodes whose own quorum set is not sliced by the
/// remaining nodes, until a pass removes nothing. What remains is the largest
/// quorum among the candidates.
///
/// `quorum_set_of` resolves the quorum set a node declared in its statement.
/// A node whose quorum set can not be resolved is never a candidate.
/// It is called at most once per node.
///
/// At most `candidates` passes remove a node; one more pass confirms that
/// nothing is left to remove.
pub fn is_quorum<T, Q, F, P>(
    quorum_set: &QuorumSet,
    statements: &BTreeMap<NodeId, T>,
    quorum_set_of: F,
    predicate: P,
) -> bool
where
    Q: Borrow<QuorumSet>,
    F: Fn(&T) -> Option<Q>,
    P: Fn(&T) -> bool,
{
    let found = largest_quorum(statements, quorum_set_of, predicate);

    let res = is_quorum_slice_internal(quorum_set, &found.nodes);

    debug!(
        "is_quorum: {} with {} candidates: {} after {} removing passes",
        quorum_set, found.candidates, res, found.removing_passes
    );

    res
}

/// The largest quorum among a set of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LargestQuorum {
    /// Number of nodes satisfying the predicate with a resolved quorum set.
    pub(crate) candidates: usize,

    /// Number of passes that removed at least one node.
    pub(crate) removing_passes: usize,

    pub(crate) nodes: BTreeSet<NodeId>,
}

pub(crate) fn largest_quorum<T, Q, F, P>(
    statements: &BTreeMap<NodeId, T>,
    quorum_set_of: F,
    predicate: P,
) -> LargestQuorum
where
    Q: Borrow<QuorumSet>,
    F: Fn(&T) -> Option<Q>,
    P: Fn(&T) -> bool,
{
    let mut quorum_sets: BTreeMap<&NodeId, Q> = BTreeMap::new();

    for (node_id, st) in statements.iter() {
        if !predicate(st) {
            continue;
        }

        match quorum_set_of(st) {
            Some(q) => {
                quorum_sets.insert(node_id, q);
            }
            None => {
                trace!("is_quorum: quorum set of {} is unknown", node_id);
            }
        }
    }

    let mut nodes: BTreeSet<NodeId> =
        quorum_sets.keys().map(|n| (*n).clone()).collect();

    let mut removing_passes = 0;

    loop {
        let survivors: BTreeSet<NodeId> = nodes
            .iter()
            .filter(|node_id| {
                quorum_sets.get(node_id).map_or(false, |q| {
                    is_quorum_slice_internal(q.borrow(), &nodes)
                })
            })
            .cloned()
            .collect();

        trace!(
            "is_quorum: pass {}: {} -> {} nodes",
            removing_passes + 1,
            nodes.len(),
            survivors.len()
        );

        if survivors.len() == nodes.len() {
            break;
        }

        removing_passes += 1;
        nodes = survivors;
    }

    LargestQuorum {
        candidates: quorum_sets.len(),
        removing_passes,
        nodes,
    }
}
