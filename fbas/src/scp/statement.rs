use std::fmt;

use crate::base::display_ext::DisplayOptionExt;
use crate::hash::Hash;
use crate::node::NodeId;

/// Index of the consensus slot a statement is about, e.g. a ledger sequence.
pub type SlotIndex = u64;

/// An opaque value nodes agree on. It is never interpreted by this crate.
pub type Value = Vec<u8>;

/// A ballot `<counter, value>` of the ballot protocol.
#[derive(Debug, Clone, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Ballot {
    pub counter: u32,
    pub value: Value,
}

impl fmt::Display for Ballot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}>",
            self.counter,
            Hash::sha256(&self.value).abbrev()
        )
    }
}

impl Ballot {
    pub fn new(counter: u32, value: impl Into<Value>) -> Self {
        Self {
            counter,
            value: value.into(),
        }
    }
}

/// The kind of a statement, without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StatementKind {
    Prepare,
    Confirm,
    Externalize,
    Nominate,
}

/// The content of a statement, one variant per protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum StatementPayload {
    Prepare {
        quorum_set_hash: Hash,
        ballot: Ballot,
        prepared: Option<Ballot>,
        prepared_prime: Option<Ballot>,
        n_c: u32,
        n_h: u32,
    },
    Confirm {
        ballot: Ballot,
        n_prepared: u32,
        n_commit: u32,
        n_h: u32,
        quorum_set_hash: Hash,
    },
    Externalize {
        commit: Ballot,
        n_h: u32,
        /// The quorum set used before externalizing.
        commit_quorum_set_hash: Hash,
    },
    Nominate {
        quorum_set_hash: Hash,
        votes: Vec<Value>,
        accepted: Vec<Value>,
    },
}

/// A statement a node makes about a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Statement {
    pub node_id: NodeId,
    pub slot_index: SlotIndex,
    pub payload: StatementPayload,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} from {}, qset:{}",
            self.kind(),
            self.slot_index,
            self.node_id,
            self.quorum_set_hash().abbrev()
        )?;

        match &self.payload {
            StatementPayload::Prepare {
                ballot,
                prepared,
                prepared_prime,
                n_c,
                n_h,
                ..
            } => {
                write!(
                    f,
                    ", b:{} p:{} p':{} c.n:{} h.n:{}",
                    ballot,
                    prepared.display(),
                    prepared_prime.display(),
                    n_c,
                    n_h
                )
            }
            StatementPayload::Confirm {
                ballot,
                n_prepared,
                n_commit,
                n_h,
                ..
            } => {
                write!(
                    f,
                    ", b:{} p.n:{} c.n:{} h.n:{}",
                    ballot, n_prepared, n_commit, n_h
                )
            }
            StatementPayload::Externalize { commit, n_h, .. } => {
                write!(f, ", c:{} h.n:{}", commit, n_h)
            }
            StatementPayload::Nominate {
                votes, accepted, ..
            } => {
                write!(f, ", X:{} Y:{}", votes.len(), accepted.len())
            }
        }
    }
}

impl Statement {
    pub fn new(
        node_id: NodeId,
        slot_index: SlotIndex,
        payload: StatementPayload,
    ) -> Self {
        Self {
            node_id,
            slot_index,
            payload,
        }
    }

    pub fn kind(&self) -> StatementKind {
        match &self.payload {
            StatementPayload::Prepare { .. } => StatementKind::Prepare,
            StatementPayload::Confirm { .. } => StatementKind::Confirm,
            StatementPayload::Externalize { .. } => StatementKind::Externalize,
            StatementPayload::Nominate { .. } => StatementKind::Nominate,
        }
    }

    /// The hash of the quorum set the author declared with this statement.
    ///
    /// For an `Externalize` statement it is the quorum set the author used
    /// before it externalized.
    pub fn quorum_set_hash(&self) -> Hash {
        match &self.payload {
            StatementPayload::Prepare {
                quorum_set_hash, ..
            } => *quorum_set_hash,
            StatementPayload::Confirm {
                quorum_set_hash, ..
            } => *quorum_set_hash,
            StatementPayload::Externalize {
                commit_quorum_set_hash,
                ..
            } => *commit_quorum_set_hash,
            StatementPayload::Nominate {
                quorum_set_hash, ..
            } => *quorum_set_hash,
        }
    }
}

/// A signed statement, as it is received from the network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Envelope {
    pub statement: Statement,
    pub signature: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Envelope{{{}}}", self.statement)
    }
}

impl Envelope {
    pub fn new(statement: Statement, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            statement,
            signature: signature.into(),
        }
    }
}
