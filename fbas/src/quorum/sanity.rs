use std::collections::BTreeSet;

use tracing::debug;

use crate::errors::InsaneQuorumSet;
use crate::node::NodeId;
use crate::quorum::QuorumSet;
use crate::quorum::MAXIMUM_QUORUM_NESTING_LEVEL;
use crate::quorum::MAXIMUM_QUORUM_NODES;

/// Check that a quorum set is structurally valid:
///
/// - Inner sets are nested at most [`MAXIMUM_QUORUM_NESTING_LEVEL`] levels
///   below the root.
/// - The threshold of every level is in `[1, validators + inner_sets]`.
/// - No node appears twice, neither in one level nor across levels.
/// - The total number of validators is in `[1, MAXIMUM_QUORUM_NODES]`.
///
/// With `extra_checks`, the threshold of every level must also be at least the
/// size of a v-blocking set of that level, i.e., a simple majority.
///
/// Returns the first defect found.
pub fn check_quorum_set_sanity(
    quorum_set: &QuorumSet,
    extra_checks: bool,
) -> Result<(), InsaneQuorumSet> {
    let mut checker = SanityChecker {
        extra_checks,
        known_nodes: BTreeSet::new(),
        count: 0,
    };

    checker.check(quorum_set, 0)?;

    if checker.count < 1 || checker.count > MAXIMUM_QUORUM_NODES {
        return Err(InsaneQuorumSet::ValidatorCount {
            count: checker.count,
            max: MAXIMUM_QUORUM_NODES,
        });
    }

    Ok(())
}

/// Returns `true` if `quorum_set` passes [`check_quorum_set_sanity`].
pub fn is_quorum_set_sane(quorum_set: &QuorumSet, extra_checks: bool) -> bool {
    match check_quorum_set_sanity(quorum_set, extra_checks) {
        Ok(()) => true,
        Err(e) => {
            debug!("insane quorum set {}: {}", quorum_set, e);
            false
        }
    }
}

/// Accumulates the state of one sanity check across the whole tree.
///
/// Duplicates in sibling subtrees are only caught if the known nodes are
/// shared by the entire walk.
struct SanityChecker<'a> {
    extra_checks: bool,
    known_nodes: BTreeSet<&'a NodeId>,
    count: usize,
}

impl<'a> SanityChecker<'a> {
    fn check(
        &mut self,
        quorum_set: &'a QuorumSet,
        depth: u32,
    ) -> Result<(), InsaneQuorumSet> {
        if depth > MAXIMUM_QUORUM_NESTING_LEVEL {
            return Err(InsaneQuorumSet::NestingTooDeep {
                depth,
                max: MAXIMUM_QUORUM_NESTING_LEVEL,
            });
        }

        let threshold = quorum_set.threshold;
        let total_entries = quorum_set.total_entries();

        if threshold < 1 || threshold as usize > total_entries {
            return Err(InsaneQuorumSet::ThresholdOutOfRange {
                depth,
                threshold,
                total_entries,
            });
        }

        let v_blocking_size = total_entries - threshold as usize + 1;
        if self.extra_checks && (threshold as usize) < v_blocking_size {
            return Err(InsaneQuorumSet::ThresholdBelowVBlocking {
                depth,
                threshold,
                v_blocking_size,
            });
        }

        self.count += quorum_set.validators.len();
        if self.count > MAXIMUM_QUORUM_NODES {
            return Err(InsaneQuorumSet::ValidatorCount {
                count: self.count,
                max: MAXIMUM_QUORUM_NODES,
            });
        }

        for node_id in quorum_set.validators.iter() {
            if !self.known_nodes.insert(node_id) {
                return Err(InsaneQuorumSet::DuplicateNode {
                    node_id: node_id.clone(),
                });
            }
        }

        for inner in quorum_set.inner_sets.iter() {
            self.check(inner, depth + 1)?;
        }

        Ok(())
    }
}
