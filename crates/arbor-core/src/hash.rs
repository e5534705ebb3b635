//! Fixed-width hash values for Merkle tree nodes
//!
//! Every leaf and internal node is a [`NodeHash`]: 32 raw bytes produced by
//! the configured digest algorithm. The type is `Copy`, compares byte-wise and
//! renders as lowercase hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{MerkleError, MerkleResult};

/// A 32-byte hash used for leaves and internal nodes
///
/// ## Example
///
/// ```rust
/// use arbor_core::NodeHash;
///
/// let hash = NodeHash::new([7u8; 32]);
/// let restored = NodeHash::from_hex(&hash.to_hex()).unwrap();
/// assert_eq!(hash, restored);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHash([u8; 32]);

impl NodeHash {
    /// Size of the hash in bytes
    pub const SIZE: usize = 32;

    /// Create a new NodeHash from raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Build a hash from a digest output slice
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::InvalidHash`] if `bytes` is not exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> MerkleResult<Self> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            MerkleError::InvalidHash(format!(
                "expected {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Concatenate two hashes into the 64-byte buffer fed to the digest
    #[inline]
    pub fn concat(left: &NodeHash, right: &NodeHash) -> [u8; 64] {
        let mut merged = [0u8; 64];
        merged[..32].copy_from_slice(&left.0);
        merged[32..].copy_from_slice(&right.0);
        merged
    }

    /// Convert the hash to a hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create a hash from a hexadecimal string
    ///
    /// Surrounding whitespace is ignored, so response bodies with a trailing
    /// newline parse cleanly.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex string is invalid or has the wrong length.
    pub fn from_hex(hex: &str) -> MerkleResult<Self> {
        let bytes = hex::decode(hex.trim())
            .map_err(|e| MerkleError::InvalidHash(format!("Invalid hex format: {}", e)))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHash({})", self.to_hex())
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for NodeHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8; 32]> for NodeHash {
    fn from(bytes: &[u8; 32]) -> Self {
        Self::new(*bytes)
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Serialized as a lowercase hex string
impl Serialize for NodeHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NodeHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
