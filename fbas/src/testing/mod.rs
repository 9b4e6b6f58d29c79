//! Testing utilities for fbas.

#[cfg(test)]
mod ut_tracing;

#[cfg(test)]
pub(crate) use ut_tracing::init_ut_tracing;

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::Mutex;

use crate::hash::hash_quorum_set;
use crate::hash::Hash;
use crate::node::NodeId;
use crate::quorum::QuorumSet;
use crate::scp::driver::Driver;
use crate::scp::statement::Ballot;
use crate::scp::statement::Envelope;
use crate::scp::statement::SlotIndex;
use crate::scp::statement::Statement;
use crate::scp::statement::StatementPayload;

/// Build a node id from anything displayable, for testing purposes.
pub fn nid(x: impl Display) -> NodeId {
    format!("{}", x)
}

/// Build a flat quorum set `{t:threshold, [validators]}`.
pub fn qs<I, T>(threshold: u32, validators: I) -> QuorumSet
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    qs_inner(threshold, validators, vec![])
}

/// Build a quorum set with inner sets.
pub fn qs_inner<I, T>(
    threshold: u32,
    validators: I,
    inner_sets: Vec<QuorumSet>,
) -> QuorumSet
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    QuorumSet::new(
        threshold,
        validators.into_iter().map(|x| nid(x)).collect(),
        inner_sets,
    )
}

/// Build a `Prepare` statement of ballot `<counter, value>`, for testing
/// purposes.
pub fn prepare(
    node_id: impl Display,
    slot_index: SlotIndex,
    quorum_set_hash: Hash,
    counter: u32,
) -> Statement {
    Statement::new(nid(node_id), slot_index, StatementPayload::Prepare {
        quorum_set_hash,
        ballot: Ballot::new(counter, b"value".to_vec()),
        prepared: None,
        prepared_prime: None,
        n_c: 0,
        n_h: 0,
    })
}

/// Build a `Confirm` statement, for testing purposes.
pub fn confirm(
    node_id: impl Display,
    slot_index: SlotIndex,
    quorum_set_hash: Hash,
    counter: u32,
) -> Statement {
    Statement::new(nid(node_id), slot_index, StatementPayload::Confirm {
        ballot: Ballot::new(counter, b"value".to_vec()),
        n_prepared: counter,
        n_commit: counter,
        n_h: counter,
        quorum_set_hash,
    })
}

/// Build an `Externalize` statement, for testing purposes.
pub fn externalize(
    node_id: impl Display,
    slot_index: SlotIndex,
    commit_quorum_set_hash: Hash,
) -> Statement {
    Statement::new(nid(node_id), slot_index, StatementPayload::Externalize {
        commit: Ballot::new(1, b"value".to_vec()),
        n_h: 1,
        commit_quorum_set_hash,
    })
}

/// Wrap a statement in an envelope with a valid signature.
pub fn envelope(statement: Statement) -> Envelope {
    Envelope::new(statement, b"sig".to_vec())
}

/// An in-memory [`Driver`] for testing.
///
/// It knows the quorum sets registered with [`MemDriver::add_quorum_set`] and
/// accepts every signature except those registered with
/// [`MemDriver::reject_signature`].
#[derive(Debug, Default)]
pub struct MemDriver {
    quorum_sets: Mutex<BTreeMap<Hash, Arc<QuorumSet>>>,
    rejected_signatures: Mutex<BTreeSet<Vec<u8>>>,
}

impl MemDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quorum set and return its hash.
    ///
    /// The quorum set is stored as is, the hash is over its normalized form.
    pub fn add_quorum_set(&self, quorum_set: QuorumSet) -> Hash {
        let hash = hash_quorum_set(&quorum_set.normalized())
            .unwrap_or_else(|e| panic!("hash {}: {}", quorum_set, e));

        self.quorum_sets
            .lock()
            .unwrap()
            .insert(hash, Arc::new(quorum_set));

        hash
    }

    /// Envelopes carrying this signature are rejected.
    pub fn reject_signature(&self, signature: impl Into<Vec<u8>>) {
        self.rejected_signatures.lock().unwrap().insert(signature.into());
    }
}

impl Driver for MemDriver {
    fn verify_envelope(&self, envelope: &Envelope) -> bool {
        !self.rejected_signatures.lock().unwrap().contains(&envelope.signature)
    }

    fn get_quorum_set(&self, hash: &Hash) -> Option<Arc<QuorumSet>> {
        self.quorum_sets.lock().unwrap().get(hash).cloned()
    }
}
