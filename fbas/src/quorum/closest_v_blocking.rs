use std::collections::BTreeMap;

use tracing::debug;

use crate::base::display_ext::DisplayOptionExt;
use crate::base::display_ext::DisplaySliceExt;
use crate::node::NodeId;
use crate::quorum::FilteredNodes;
use crate::quorum::NodeSet;
use crate::quorum::QuorumSet;

/// Returns the smallest set of nodes that would have to be added to the nodes
/// outside of `agreeing` to form a v-blocking set of `quorum_set`.
///
/// Every node not in `agreeing` is assumed to be already blocking. The
/// returned nodes are all taken from `agreeing`: if they changed their mind,
/// the local node would be v-blocked. An empty result means the non-agreeing
/// nodes already block `quorum_set`.
///
/// `excluded`, if given, is ignored as if it were not in `quorum_set` at all,
/// usually it is the local node itself.
///
/// At each level direct validators are preferred over inner sets, and smaller
/// inner completions are preferred over bigger ones. The result is greedy, it
/// is not guaranteed to be the global minimum.
pub fn find_closest_v_blocking<S>(
    quorum_set: &QuorumSet,
    agreeing: &S,
    excluded: Option<&NodeId>,
) -> Vec<NodeId>
where
    S: NodeSet + ?Sized,
{
    let res = closest_v_blocking(quorum_set, agreeing, excluded);
    debug!(
        "find_closest_v_blocking: {} excluded: {} -> {}",
        quorum_set,
        excluded.display(),
        res.display_n::<16>()
    );
    res
}

/// Same as [`find_closest_v_blocking`], with `agreeing` being the nodes whose
/// latest statement satisfies `predicate`.
pub fn find_closest_v_blocking_filtered<T, P>(
    quorum_set: &QuorumSet,
    statements: &BTreeMap<NodeId, T>,
    predicate: P,
    excluded: Option<&NodeId>,
) -> Vec<NodeId>
where
    P: Fn(&T) -> bool,
{
    let agreeing = FilteredNodes::new(statements, predicate);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let ids: Vec<&NodeId> = agreeing.node_ids().collect();
        debug!(
            "find_closest_v_blocking_filtered: {} of {} agreeing: {}",
            ids.len(),
            statements.len(),
            ids.display_n::<16>()
        );
    }

    find_closest_v_blocking(quorum_set, &agreeing, excluded)
}

fn closest_v_blocking<S>(
    quorum_set: &QuorumSet,
    agreeing: &S,
    excluded: Option<&NodeId>,
) -> Vec<NodeId>
where
    S: NodeSet + ?Sized,
{
    let mut left_till_block = (1 + quorum_set.total_entries())
        .saturating_sub(quorum_set.threshold as usize);

    // No slice exists: blocked by anything.
    if left_till_block == 0 {
        return vec![];
    }

    let mut res = vec![];

    for validator in quorum_set.validators.iter() {
        if Some(validator) == excluded {
            continue;
        }

        if agreeing.contains_node(validator) {
            res.push(validator.clone());
        } else {
            left_till_block -= 1;
            if left_till_block == 0 {
                return vec![];
            }
        }
    }

    let mut inner_completions = vec![];

    for inner in quorum_set.inner_sets.iter() {
        let completion = closest_v_blocking(inner, agreeing, excluded);
        if completion.is_empty() {
            left_till_block -= 1;
            if left_till_block == 0 {
                return vec![];
            }
        } else {
            inner_completions.push(completion);
        }
    }

    // Stable: among completions of equal size, the earlier inner set wins.
    inner_completions.sort_by_key(|c| c.len());

    res.truncate(left_till_block);
    left_till_block -= res.len();

    for completion in inner_completions.into_iter().take(left_till_block) {
        res.extend(completion);
    }

    res
}
