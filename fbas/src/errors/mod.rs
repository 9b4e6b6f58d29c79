//! Error types exposed by this crate.

use std::fmt;

use anyerror::AnyError;
use tracing::error;

use crate::node::NodeId;

pub(crate) fn to_any_error<E: fmt::Display + 'static>(e: E) -> AnyError {
    error!("error: {}", e);
    AnyError::error(e)
}

/// The first structural defect found in a quorum set.
///
/// A quorum set carrying any of these defects must be rejected before it is
/// used by the predicates: they assume a bounded depth and a threshold within
/// range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum InsaneQuorumSet {
    #[error("nesting depth {depth} exceeds the maximum of {max}")]
    NestingTooDeep { depth: u32, max: u32 },

    #[error("threshold {threshold} at depth {depth} is not in [1, {total_entries}]")]
    ThresholdOutOfRange {
        depth: u32,
        threshold: u32,
        total_entries: usize,
    },

    /// Only reported when extra checks are enabled.
    #[error("threshold {threshold} at depth {depth} is smaller than the v-blocking size {v_blocking_size}")]
    ThresholdBelowVBlocking {
        depth: u32,
        threshold: u32,
        v_blocking_size: usize,
    },

    #[error("node {node_id} appears more than once")]
    DuplicateNode { node_id: NodeId },

    #[error("total number of validators {count} is not in [1, {max}]")]
    ValidatorCount { count: usize, max: usize },
}

/// Errors that may take place when building or updating a
/// [`LocalNode`](crate::LocalNode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::TryInto)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum LocalNodeError {
    #[error("local quorum set is insane: {0}")]
    Insane(#[from] InsaneQuorumSet),

    /// The quorum set could not be encoded for hashing.
    #[error(transparent)]
    Encode(#[from] AnyError),
}
