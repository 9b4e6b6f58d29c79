use tracing::warn;

use crate::node::NodeId;
use crate::quorum::QuorumSet;

/// Rounding direction of [`big_divide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Compute `a * b / c` with a 128 bit intermediate product.
///
/// Returns `None` if `c` is 0 or the quotient does not fit in a `u64`.
pub fn big_divide(a: u64, b: u64, c: u64, rounding: Rounding) -> Option<u64> {
    if c == 0 {
        return None;
    }

    let x = u128::from(a) * u128::from(b);
    let c = u128::from(c);

    // `x <= (2^64-1)^2`, adding `c - 1 < 2^64` does not overflow.
    let q = match rounding {
        Rounding::Down => x / c,
        Rounding::Up => (x + (c - 1)) / c,
    };

    u64::try_from(q).ok()
}

/// Returns the weight of `node_id` within `quorum_set`, as a fraction of
/// `u64::MAX`.
///
/// At every level the weight is multiplied by `threshold / total_entries` of
/// that level and rounded down, e.g. in `{t:2, [a,b,c]}` every node weighs
/// `2/3 * u64::MAX`; in `{t:1, [a], {t:1, [b,c]}}`, `b` weighs
/// `1/2 * 1/2 * u64::MAX`.
///
/// Returns 0 if the node is not in the quorum set. If a node appears more than
/// once, only the first occurrence in a top-down walk counts: validators of a
/// level before its inner sets.
///
/// `quorum_set` must be sane, see
/// [`check_quorum_set_sanity`](crate::quorum::check_quorum_set_sanity). A
/// level whose threshold exceeds its number of entries has no slice, a node
/// under it is given no weight.
pub fn node_weight(node_id: &NodeId, quorum_set: &QuorumSet) -> u64 {
    let n = u64::from(quorum_set.threshold);
    let d = quorum_set.total_entries() as u64;

    if quorum_set.validators.iter().any(|v| v == node_id) {
        return scale(u64::MAX, n, d);
    }

    for inner in quorum_set.inner_sets.iter() {
        let leaf_weight = node_weight(node_id, inner);
        if leaf_weight != 0 {
            return scale(leaf_weight, n, d);
        }
    }

    0
}

/// Scale a weight by `threshold / total_entries` of one level.
///
/// A level with `threshold > total_entries` is insane and has no slice: 0.
fn scale(weight: u64, threshold: u64, total_entries: u64) -> u64 {
    if threshold > total_entries {
        warn!(
            "insane quorum set level: threshold({}) > total entries({}), weight is 0",
            threshold, total_entries
        );
        return 0;
    }

    // The factor is at most 1, the result fits in a u64.
    big_divide(weight, threshold, total_entries, Rounding::Down).unwrap_or(0)
}
