#![doc = include_str!("lib_readme.md")]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]
#![allow(clippy::result_large_err)]
#![allow(clippy::type_complexity)]
#![deny(unused_qualifications)]

mod config;

pub mod base;
pub mod errors;
pub mod hash;
pub mod node;
pub mod quorum;
pub mod scp;
pub mod testing;

pub use anyerror;
pub use anyerror::AnyError;

pub use crate::config::Config;
pub use crate::config::ConfigError;
pub use crate::hash::hash_quorum_set;
pub use crate::hash::Hash;
pub use crate::node::NodeId;
pub use crate::quorum::find_closest_v_blocking;
pub use crate::quorum::find_closest_v_blocking_filtered;
pub use crate::quorum::is_quorum;
pub use crate::quorum::is_quorum_set_sane;
pub use crate::quorum::is_quorum_slice;
pub use crate::quorum::is_v_blocking;
pub use crate::quorum::is_v_blocking_filtered;
pub use crate::quorum::node_weight;
pub use crate::quorum::normalize;
pub use crate::quorum::NodeSet;
pub use crate::quorum::QuorumSet;
pub use crate::scp::driver::Driver;
pub use crate::scp::local_node::LocalNode;
pub use crate::scp::EnvelopeState;
pub use crate::scp::Scp;
