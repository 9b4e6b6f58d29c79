//! Content hash of quorum sets and values.

use std::fmt;

use anyerror::AnyError;
use sha2::Digest;
use sha2::Sha256;

use crate::errors::to_any_error;
use crate::quorum::QuorumSet;

/// A 32 bytes SHA-256 digest.
#[derive(Clone, Copy, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Hash(pub [u8; 32]);

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.abbrev())
    }
}

impl Hash {
    /// Compute the SHA-256 digest of `data`.
    pub fn sha256(data: impl AsRef<[u8]>) -> Self {
        let digest = Sha256::digest(data.as_ref());
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&digest);
        Self(buf)
    }

    /// The first 3 bytes in hex, for logging.
    pub fn abbrev(&self) -> String {
        hex::encode(&self.0[..3])
    }
}

/// Hash a quorum set as is.
///
/// The hash is SHA-256 over the `bincode` encoding of the tree, so two quorum
/// sets have the same hash only if they are structurally identical. Normalize
/// it first to make logically equal sets hash identically.
pub fn hash_quorum_set(quorum_set: &QuorumSet) -> Result<Hash, AnyError> {
    let buf = bincode::serialize(quorum_set).map_err(to_any_error)?;
    Ok(Hash::sha256(buf))
}

impl QuorumSet {
    /// Returns the hash of the normalized form of this quorum set.
    pub fn content_hash(&self) -> Result<Hash, AnyError> {
        hash_quorum_set(&self.normalized())
    }
}
