use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use tracing::debug;

use crate::node::NodeId;
use crate::quorum::QuorumSet;
use crate::scp::driver::Driver;
use crate::scp::statement::SlotIndex;
use crate::scp::statement::Statement;
use crate::scp::statement::StatementPayload;

/// A statement as it was seen by a slot, kept for diagnosis.
#[derive(Debug, Clone)]
pub struct HistoricalStatement {
    pub when: DateTime<Utc>,
    pub statement: Statement,
    pub validated: bool,
}

/// The state of one consensus slot: the latest statement of every node that
/// spoke about it.
#[derive(Debug, Clone)]
pub struct Slot {
    slot_index: SlotIndex,

    /// Latest statement of every node.
    latest: BTreeMap<NodeId, Statement>,

    /// Every statement recorded, in arrival order.
    history: Vec<HistoricalStatement>,

    /// Whether the values of this slot are fully validated by the local node.
    /// A node that does not vote never fully validates a slot.
    fully_validated: bool,
}

impl Slot {
    pub fn new(slot_index: SlotIndex, fully_validated: bool) -> Self {
        Self {
            slot_index,
            latest: BTreeMap::new(),
            history: vec![],
            fully_validated,
        }
    }

    pub fn slot_index(&self) -> SlotIndex {
        self.slot_index
    }

    pub fn is_fully_validated(&self) -> bool {
        self.fully_validated
    }

    /// Resolve the quorum set the author of `statement` declared with it.
    ///
    /// A node that externalized only trusts itself for this slot, its quorum
    /// set is `{t:1, [author]}`. For every other statement the quorum set is
    /// looked up by hash from the driver.
    pub fn quorum_set_of<D>(
        statement: &Statement,
        driver: &D,
    ) -> Option<Arc<QuorumSet>>
    where
        D: Driver + ?Sized,
    {
        match &statement.payload {
            StatementPayload::Externalize { .. } => Some(Arc::new(
                QuorumSet::singleton(statement.node_id.clone()),
            )),
            _ => driver.get_quorum_set(&statement.quorum_set_hash()),
        }
    }

    /// Record `statement` as the latest statement of its author.
    pub(crate) fn record_statement(&mut self, statement: Statement) {
        debug!(
            "slot {}: record statement: {}",
            self.slot_index, statement
        );

        self.history.push(HistoricalStatement {
            when: Utc::now(),
            statement: statement.clone(),
            validated: self.fully_validated,
        });

        self.latest.insert(statement.node_id.clone(), statement);
    }

    /// The latest statement of every node, keyed by author.
    pub fn latest_statements(&self) -> &BTreeMap<NodeId, Statement> {
        &self.latest
    }

    pub fn latest_statement(&self, node_id: &NodeId) -> Option<&Statement> {
        self.latest.get(node_id)
    }

    pub fn history(&self) -> &[HistoricalStatement] {
        &self.history
    }
}
