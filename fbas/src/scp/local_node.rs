use std::sync::Arc;

use tracing::info;

use crate::errors::LocalNodeError;
use crate::hash::hash_quorum_set;
use crate::hash::Hash;
use crate::node::NodeId;
use crate::quorum::check_quorum_set_sanity;
use crate::quorum::QuorumSet;

/// The identity of the local node: who it is and whom it trusts.
///
/// The quorum set is always kept normalized, so that its hash is the one
/// every other node computes for the same trust configuration.
#[derive(Debug, Clone)]
pub struct LocalNode {
    node_id: NodeId,
    is_validator: bool,

    quorum_set: Arc<QuorumSet>,
    quorum_set_hash: Hash,

    /// `{t:1, [node_id]}`, the quorum set of this node once it externalized.
    singleton_quorum_set: Arc<QuorumSet>,
    singleton_quorum_set_hash: Hash,
}

impl LocalNode {
    /// Create a local node with the given quorum set.
    ///
    /// The quorum set must pass the basic sanity check, or
    /// [`LocalNodeError::Insane`] is returned. It is stored normalized.
    pub fn new(
        node_id: NodeId,
        is_validator: bool,
        quorum_set: QuorumSet,
    ) -> Result<Self, LocalNodeError> {
        check_quorum_set_sanity(&quorum_set, false)?;

        let quorum_set = quorum_set.normalized();
        let quorum_set_hash = hash_quorum_set(&quorum_set)?;

        let singleton = QuorumSet::singleton(node_id.clone());
        let singleton_hash = hash_quorum_set(&singleton)?;

        info!(
            "LocalNode {} validator:{} qset:{} {}",
            node_id,
            is_validator,
            quorum_set_hash.abbrev(),
            quorum_set
        );

        Ok(Self {
            node_id,
            is_validator,
            quorum_set: Arc::new(quorum_set),
            quorum_set_hash,
            singleton_quorum_set: Arc::new(singleton),
            singleton_quorum_set_hash: singleton_hash,
        })
    }

    /// Replace the quorum set of this node and re-derive its hash.
    ///
    /// On error this node is left unchanged.
    pub fn update_quorum_set(
        &mut self,
        quorum_set: QuorumSet,
    ) -> Result<(), LocalNodeError> {
        check_quorum_set_sanity(&quorum_set, false)?;

        let quorum_set = quorum_set.normalized();
        let quorum_set_hash = hash_quorum_set(&quorum_set)?;

        info!(
            "LocalNode {} update qset: {} -> {} {}",
            self.node_id,
            self.quorum_set_hash.abbrev(),
            quorum_set_hash.abbrev(),
            quorum_set
        );

        self.quorum_set = Arc::new(quorum_set);
        self.quorum_set_hash = quorum_set_hash;

        Ok(())
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Whether this node votes, or only watches.
    pub fn is_validator(&self) -> bool {
        self.is_validator
    }

    /// The normalized quorum set of this node.
    pub fn quorum_set(&self) -> &Arc<QuorumSet> {
        &self.quorum_set
    }

    pub fn quorum_set_hash(&self) -> Hash {
        self.quorum_set_hash
    }

    pub fn singleton_quorum_set(&self) -> &Arc<QuorumSet> {
        &self.singleton_quorum_set
    }

    pub fn singleton_quorum_set_hash(&self) -> Hash {
        self.singleton_quorum_set_hash
    }
}
