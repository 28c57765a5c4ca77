//! Opaque document digest
//!
//! Agreements reference an off-system document by a fixed-size digest. The
//! digest is stored and returned, never interpreted; verification against
//! the actual document happens outside the system.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Errors from parsing a digest out of its hex transport form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    #[error("Digest must be 32 bytes, got {actual}")]
    WrongLength { actual: usize },

    #[error("Invalid hex encoding: {message}")]
    InvalidHex { message: String },
}

/// A 32-byte digest of an off-system agreement document
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentDigest([u8; 32]);

impl DocumentDigest {
    /// Wrap raw digest bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-256 digest of a document's bytes
    pub fn of(document: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(document);
        Self(hasher.finalize().into())
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self, DigestParseError> {
        let bytes = hex::decode(s).map_err(|e| DigestParseError::InvalidHex {
            message: e.to_string(),
        })?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| DigestParseError::WrongLength { actual: v.len() })?;
        Ok(Self(bytes))
    }

    /// Get the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentDigest({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_of_document() {
        let a = DocumentDigest::of(b"agreement v1");
        let b = DocumentDigest::of(b"agreement v1");
        let c = DocumentDigest::of(b"agreement v2");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hex_round_trip() {
        let digest = DocumentDigest::of(b"doc");
        let parsed = DocumentDigest::from_hex(&digest.to_string()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn test_hex_rejects_wrong_length() {
        let result = DocumentDigest::from_hex("deadbeef");
        assert!(matches!(
            result,
            Err(DigestParseError::WrongLength { actual: 4 })
        ));
    }

    #[test]
    fn test_hex_rejects_bad_encoding() {
        let result = DocumentDigest::from_hex("zz");
        assert!(matches!(result, Err(DigestParseError::InvalidHex { .. })));
    }
}
