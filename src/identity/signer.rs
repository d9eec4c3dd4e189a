use crate::identity::{Keypair, PublicKey};
use ed25519_dalek::{Signature as DalekSignature, Signer as DalekSigner, Verifier, SIGNATURE_LENGTH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid signature length: expected 64, got {0}")]
    InvalidLength(usize),
}

/// Ed25519 signature (64 bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(DalekSignature);

impl Signature {
    /// Raw 64-byte form, as attached to a transaction input
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }

    /// Parse a signature from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes_array: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidLength(bytes.len()))?;
        Ok(Self(DalekSignature::from_bytes(&bytes_array)))
    }
}

/// Signing and verification operations
pub struct Signer;

impl Signer {
    /// Sign a message with a keypair
    pub fn sign(keypair: &Keypair, message: &[u8]) -> Signature {
        Signature(keypair.signing_key().sign(message))
    }

    /// Verify a signature against a public key and message
    pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        public_key.inner().verify(message, &signature.0).is_ok()
    }

    /// Verify signature bytes taken straight off an input.
    ///
    /// Bytes that cannot be parsed as a signature verify as false.
    pub fn verify_bytes(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_bytes(signature) {
            Ok(sig) => Self::verify(public_key, message, &sig),
            Err(_) => false,
        }
    }
}
