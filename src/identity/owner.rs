use crate::identity::PublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwnerIdError {
    #[error("Invalid owner id format: {0}")]
    InvalidFormat(String),

    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),
}

/// Display identifier for the owner of an output: SHA-256 of the encoded
/// public key, rendered as base58.
///
/// Ledger dumps show this instead of the raw key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId([u8; 32]);

impl OwnerId {
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = Sha256::digest(public_key.as_bytes());
        Self(digest.into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse the base58 form produced by `Display`
    pub fn parse(s: &str) -> Result<Self, OwnerIdError> {
        if s.is_empty() {
            return Err(OwnerIdError::InvalidFormat("owner id cannot be empty".into()));
        }

        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| OwnerIdError::InvalidBase58(e.to_string()))?;

        let digest: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            OwnerIdError::InvalidFormat(format!("expected 32 bytes, got {}", bytes.len()))
        })?;

        Ok(Self(digest))
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for OwnerId {
    type Err = OwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
