//! UTXO settlement core.
//!
//! Validates batches of value-transfer transactions against an unspent
//! output pool and commits each accepted batch atomically.
//!
//! - [`identity`]: Ed25519 keys, signatures, owner identifiers
//! - [`tx`]: transaction building, byte-exact encodings, identity hashing
//! - [`ledger`]: the UTXO pool and the `TxHandler` epoch commit
//! - [`engine`]: the pluggable shell that feeds batches to the handler

pub mod engine;
pub mod identity;
pub mod ledger;
pub mod tx;
