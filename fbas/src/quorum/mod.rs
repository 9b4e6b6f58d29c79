//! A quorum set is the unit of trust of a node in a federated Byzantine
//! agreement system. Unlike a majority quorum, which is the same for every
//! member of a cluster, every node declares its own quorum set: a threshold
//! over validators and nested inner sets, e.g. `{t:2, [a,b], {t:1, [c,d]}}`
//! is satisfied by `{a,b}`, `{a,c}`, `{b,d}`, etc.
//!
//! A node set **slices** a quorum set if it satisfies the threshold, it is
//! **v-blocking** if it intersects every slice, and it is a **quorum** if it
//! slices the quorum set of every one of its members.

mod closest_v_blocking;
mod node_set;
mod node_set_impl;
mod normalize;
mod predicates;
mod quorum_set;
mod sanity;
mod transitive;
mod weight;


pub use closest_v_blocking::find_closest_v_blocking;
pub use closest_v_blocking::find_closest_v_blocking_filtered;
pub use node_set::FilteredNodes;
pub use node_set::NodeSet;
pub use normalize::normalize;
pub use predicates::is_quorum_slice;
pub use predicates::is_v_blocking;
pub use predicates::is_v_blocking_filtered;
pub use quorum_set::QuorumSet;
pub use quorum_set::MAXIMUM_QUORUM_NESTING_LEVEL;
pub use quorum_set::MAXIMUM_QUORUM_NODES;
pub use sanity::check_quorum_set_sanity;
pub use sanity::is_quorum_set_sane;
pub use transitive::is_quorum;
pub use weight::big_divide;
pub use weight::node_weight;
pub use weight::Rounding;
