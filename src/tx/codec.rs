use crate::tx::Transaction;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode transaction: {0}")]
    EncodeError(String),

    #[error("Failed to decode transaction: {0}")]
    DecodeError(String),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid base64 string: {0}")]
    InvalidBase64(String),
}

/// Transport encoding for finalized transactions.
///
/// Decoding recomputes the identity hash, so a transaction whose fields
/// were altered in transit is refused.
pub struct TransactionCodec;

impl TransactionCodec {
    /// Encode to compact binary (postcard)
    pub fn encode(tx: &Transaction) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(tx).map_err(|e| CodecError::EncodeError(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Transaction, CodecError> {
        postcard::from_bytes(bytes).map_err(|e| CodecError::DecodeError(e.to_string()))
    }

    pub fn encode_hex(tx: &Transaction) -> Result<String, CodecError> {
        Ok(hex::encode(Self::encode(tx)?))
    }

    pub fn decode_hex(hex_str: &str) -> Result<Transaction, CodecError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        Self::decode(&bytes)
    }

    /// Encode to base64 (URL-safe, no padding)
    pub fn encode_base64(tx: &Transaction) -> Result<String, CodecError> {
        Ok(URL_SAFE_NO_PAD.encode(Self::encode(tx)?))
    }

    pub fn decode_base64(b64_str: &str) -> Result<Transaction, CodecError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(b64_str.trim())
            .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;
        Self::decode(&bytes)
    }
}
