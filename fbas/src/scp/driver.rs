use std::sync::Arc;
use std::time::Duration;

use sha2::Digest;
use sha2::Sha256;

use crate::config::Config;
use crate::hash::Hash;
use crate::node::NodeId;
use crate::quorum::QuorumSet;
use crate::scp::statement::Envelope;
use crate::scp::statement::SlotIndex;
use crate::scp::statement::Value;

/// Number of leading chars of a node id shown by
/// [`Driver::to_short_string`].
const NODE_ID_ABBREV: usize = 6;

/// Tags that make the same input hash differently for a neighborhood check,
/// a priority check and a value hash.
const HASH_N: u32 = 1;
const HASH_P: u32 = 2;
const HASH_K: u32 = 3;

/// The application side of federated agreement.
///
/// The application implements this trait to provide what this crate does not
/// own: envelope signatures and the storage of the quorum sets referred to by
/// hash in statements.
///
/// Typically, the driver will be hidden behind an `Arc<T>` and this interface
/// implemented on the `Arc<T>`.
pub trait Driver: Send + Sync + 'static {
    /// Returns `true` if the envelope is correctly signed by the author of its
    /// statement.
    fn verify_envelope(&self, envelope: &Envelope) -> bool;

    /// Look up a quorum set by its hash.
    ///
    /// Returns `None` if the quorum set is not known yet.
    fn get_quorum_set(&self, hash: &Hash) -> Option<Arc<QuorumSet>>;

    /// Render a value for logging.
    ///
    /// The default is an abbreviated hash of the value.
    fn get_value_string(&self, value: &Value) -> String {
        Hash::sha256(value).abbrev()
    }

    /// Render a node id for logging.
    ///
    /// The default is the first few chars of the id. An application may
    /// return a human readable name instead.
    fn to_short_string(&self, node_id: &NodeId) -> String {
        node_id.chars().take(NODE_ID_ABBREV).collect()
    }

    /// Compute the hash of a node for a nomination round, used to select the
    /// round leaders.
    ///
    /// `is_priority` selects the priority hash, otherwise the neighborhood
    /// hash is computed.
    fn compute_hash_node(
        &self,
        slot_index: SlotIndex,
        prev: &Value,
        is_priority: bool,
        round: u32,
        node_id: &NodeId,
    ) -> u64 {
        let tag = if is_priority { HASH_P } else { HASH_N };
        hash_helper(slot_index, prev, tag, round, node_id.as_bytes())
    }

    /// Compute the hash of a value for a nomination round, used to pick the
    /// value to vote for among those of a leader.
    fn compute_value_hash(
        &self,
        slot_index: SlotIndex,
        prev: &Value,
        round: u32,
        value: &Value,
    ) -> u64 {
        hash_helper(slot_index, prev, HASH_K, round, value)
    }

    /// Compute the timeout of a round.
    ///
    /// It has to be large enough for the nodes of a quorum to exchange a few
    /// messages. The default is linear in `round`, see
    /// [`Config::round_timeout`].
    fn compute_timeout(&self, config: &Config, round: u32) -> Duration {
        config.round_timeout(round)
    }
}

/// SHA-256 over the length prefixed fields, the first 8 bytes in big endian.
fn hash_helper(
    slot_index: SlotIndex,
    prev: &[u8],
    tag: u32,
    round: u32,
    extra: &[u8],
) -> u64 {
    let mut hasher = Sha256::new();

    hasher.update(slot_index.to_be_bytes());
    hasher.update((prev.len() as u64).to_be_bytes());
    hasher.update(prev);
    hasher.update(tag.to_be_bytes());
    hasher.update(round.to_be_bytes());
    hasher.update((extra.len() as u64).to_be_bytes());
    hasher.update(extra);

    let digest = hasher.finalize();

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(buf)
}
