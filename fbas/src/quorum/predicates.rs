use std::collections::BTreeMap;

use tracing::trace;

use crate::node::NodeId;
use crate::quorum::FilteredNodes;
use crate::quorum::NodeSet;
use crate::quorum::QuorumSet;

/// Returns `true` if `nodes` satisfies `quorum_set`.
///
/// A validator entry is satisfied if it is in `nodes`, an inner set entry is
/// satisfied if `nodes` recursively satisfies it. `nodes` satisfies the
/// quorum set if at least `threshold` of its entries are satisfied.
///
/// A threshold of 0 is satisfied by any node set, including the empty one.
pub fn is_quorum_slice<S>(quorum_set: &QuorumSet, nodes: &S) -> bool
where S: NodeSet + ?Sized {
    let res = is_quorum_slice_internal(quorum_set, nodes);
    trace!("is_quorum_slice: {} -> {}", quorum_set, res);
    res
}

pub(crate) fn is_quorum_slice_internal<S>(
    quorum_set: &QuorumSet,
    nodes: &S,
) -> bool
where
    S: NodeSet + ?Sized,
{
    let mut threshold_left = quorum_set.threshold as usize;
    if threshold_left == 0 {
        return true;
    }

    for validator in quorum_set.validators.iter() {
        if nodes.contains_node(validator) {
            threshold_left -= 1;
            if threshold_left == 0 {
                return true;
            }
        }
    }

    for inner in quorum_set.inner_sets.iter() {
        if is_quorum_slice_internal(inner, nodes) {
            threshold_left -= 1;
            if threshold_left == 0 {
                return true;
            }
        }
    }

    false
}

/// Returns `true` if `nodes` is a v-blocking set of `quorum_set`, i.e., it
/// intersects every slice of it.
///
/// Equivalently, the nodes outside of `nodes` can never satisfy
/// `quorum_set` on their own: at least `total_entries - threshold + 1`
/// entries are blocked, where a validator is blocked if it is in `nodes` and
/// an inner set is blocked if it is recursively v-blocked by `nodes`.
///
/// A quorum set with a threshold of 0 has no v-blocking set. A quorum set with
/// a threshold above its number of entries has no slice at all, thus any set
/// is v-blocking.
pub fn is_v_blocking<S>(quorum_set: &QuorumSet, nodes: &S) -> bool
where S: NodeSet + ?Sized {
    let res = is_v_blocking_internal(quorum_set, nodes);
    trace!("is_v_blocking: {} -> {}", quorum_set, res);
    res
}

fn is_v_blocking_internal<S>(quorum_set: &QuorumSet, nodes: &S) -> bool
where S: NodeSet + ?Sized {
    if quorum_set.threshold == 0 {
        return false;
    }

    let mut left_till_block = (1 + quorum_set.total_entries())
        .saturating_sub(quorum_set.threshold as usize);
    if left_till_block == 0 {
        return true;
    }

    for validator in quorum_set.validators.iter() {
        if nodes.contains_node(validator) {
            left_till_block -= 1;
            if left_till_block == 0 {
                return true;
            }
        }
    }

    for inner in quorum_set.inner_sets.iter() {
        if is_v_blocking_internal(inner, nodes) {
            left_till_block -= 1;
            if left_till_block == 0 {
                return true;
            }
        }
    }

    false
}

/// Returns `true` if the nodes whose latest statement satisfies `predicate`
/// form a v-blocking set of `quorum_set`.
///
/// `statements` maps every node to the latest statement received from it.
pub fn is_v_blocking_filtered<T, P>(
    quorum_set: &QuorumSet,
    statements: &BTreeMap<NodeId, T>,
    predicate: P,
) -> bool
where
    P: Fn(&T) -> bool,
{
    is_v_blocking(quorum_set, &FilteredNodes::new(statements, predicate))
}
