//! Identity of a participant.

/// `NodeId` uniquely identifies a participant of the federated network.
///
/// In practice it is the strkey encoding of a node's public key. The algebra
/// only needs it to be totally ordered and comparable, it is used as a map and
/// set key and nothing else.
pub type NodeId = String;
