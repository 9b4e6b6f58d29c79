//! The consumers of the quorum set algebra: a local node, the statements it
//! receives and the slots that keep them.
//!
//! Nomination and ballot state machines are not implemented here: [`Scp`]
//! only accepts envelopes and answers quorum questions about a slot.

pub mod driver;
pub mod local_node;
pub mod slot;
pub mod statement;


use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::config::Config;
use crate::errors::LocalNodeError;
use crate::node::NodeId;
use crate::quorum;
use crate::quorum::QuorumSet;
use crate::scp::driver::Driver;
use crate::scp::local_node::LocalNode;
use crate::scp::slot::Slot;
use crate::scp::statement::Envelope;
use crate::scp::statement::SlotIndex;
use crate::scp::statement::Statement;

/// Whether a received envelope is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EnvelopeState {
    Invalid,
    Valid,
}

/// The entry point of a node: it owns the local identity and the state of
/// every slot, and answers quorum questions about a slot with the local
/// quorum set.
pub struct Scp<D>
where D: Driver
{
    driver: D,
    local_node: LocalNode,
    config: Arc<Config>,
    slots: BTreeMap<SlotIndex, Slot>,
}

impl<D> Scp<D>
where D: Driver
{
    /// Create a node identified by `node_id` that trusts `quorum_set`.
    ///
    /// Whether the node votes is decided by [`Config::is_validator`].
    pub fn new(
        driver: D,
        node_id: NodeId,
        quorum_set: QuorumSet,
        config: Arc<Config>,
    ) -> Result<Self, LocalNodeError> {
        let local_node =
            LocalNode::new(node_id, config.is_validator, quorum_set)?;

        Ok(Self {
            driver,
            local_node,
            config,
            slots: BTreeMap::new(),
        })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn local_node(&self) -> &LocalNode {
        &self.local_node
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Process an envelope received from the network.
    ///
    /// The envelope is rejected if its signature does not verify, if the
    /// quorum set its statement refers to is unknown, or if that quorum set
    /// is insane. Otherwise the statement becomes the latest statement of its
    /// author in its slot.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn receive_envelope(&mut self, envelope: Envelope) -> EnvelopeState {
        debug!("receive_envelope: {}", envelope);

        if !self.driver.verify_envelope(&envelope) {
            warn!("invalid signature: {}", envelope);
            return EnvelopeState::Invalid;
        }

        let statement = envelope.statement;

        let Some(quorum_set) = Slot::quorum_set_of(&statement, &self.driver)
        else {
            warn!(
                "unknown quorum set {} of {}",
                statement.quorum_set_hash().abbrev(),
                statement
            );
            return EnvelopeState::Invalid;
        };

        if let Err(e) = quorum::check_quorum_set_sanity(
            &quorum_set,
            self.config.extra_sanity_checks,
        ) {
            warn!("insane quorum set {} of {}: {}", quorum_set, statement, e);
            return EnvelopeState::Invalid;
        }

        let fully_validated = self.local_node.is_validator();

        self.slots
            .entry(statement.slot_index)
            .or_insert_with(|| Slot::new(statement.slot_index, fully_validated))
            .record_statement(statement);

        EnvelopeState::Valid
    }

    /// Replace the quorum set of the local node.
    pub fn update_local_quorum_set(
        &mut self,
        quorum_set: QuorumSet,
    ) -> Result<(), LocalNodeError> {
        self.local_node.update_quorum_set(quorum_set)
    }

    pub fn get_slot(&self, slot_index: SlotIndex) -> Option<&Slot> {
        self.slots.get(&slot_index)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop the state of every slot below `max_slot_index`.
    pub fn purge_slots(&mut self, max_slot_index: SlotIndex) {
        let kept = self.slots.split_off(&max_slot_index);
        let purged = std::mem::replace(&mut self.slots, kept);

        debug!(
            "purge_slots below {}: {} purged, {} kept",
            max_slot_index,
            purged.len(),
            self.slots.len()
        );
    }

    /// Returns `true` if the authors of the latest statements in the slot that
    /// satisfy `predicate` contain a quorum for the local node.
    pub fn is_quorum<P>(&self, slot_index: SlotIndex, predicate: P) -> bool
    where P: Fn(&Statement) -> bool {
        let empty = BTreeMap::new();
        let statements = self.latest_statements(slot_index).unwrap_or(&empty);

        quorum::is_quorum(
            self.local_node.quorum_set(),
            statements,
            |st| Slot::quorum_set_of(st, &self.driver),
            predicate,
        )
    }

    /// Returns `true` if the authors of the latest statements in the slot that
    /// satisfy `predicate` are v-blocking for the local node.
    pub fn is_v_blocking<P>(&self, slot_index: SlotIndex, predicate: P) -> bool
    where P: Fn(&Statement) -> bool {
        let empty = BTreeMap::new();
        let statements = self.latest_statements(slot_index).unwrap_or(&empty);

        quorum::is_v_blocking_filtered(
            self.local_node.quorum_set(),
            statements,
            predicate,
        )
    }

    /// Returns the nodes among the authors of statements satisfying
    /// `predicate` that, if they changed their mind, would make the local
    /// node v-blocked. The local node itself is never part of the result.
    pub fn find_closest_v_blocking<P>(
        &self,
        slot_index: SlotIndex,
        predicate: P,
    ) -> Vec<NodeId>
    where
        P: Fn(&Statement) -> bool,
    {
        let empty = BTreeMap::new();
        let statements = self.latest_statements(slot_index).unwrap_or(&empty);

        quorum::find_closest_v_blocking_filtered(
            self.local_node.quorum_set(),
            statements,
            predicate,
            Some(self.local_node.node_id()),
        )
    }

    fn latest_statements(
        &self,
        slot_index: SlotIndex,
    ) -> Option<&BTreeMap<NodeId, Statement>> {
        self.slots.get(&slot_index).map(|s| s.latest_statements())
    }
}
