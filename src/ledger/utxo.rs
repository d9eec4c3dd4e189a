// UTXO identity: the (creating transaction, output index) pair

use crate::tx::TxHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names one spendable output. Two keys are equal iff both fields are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UTXOKey {
    tx_hash: TxHash,
    output_index: u32,
}

impl UTXOKey {
    pub fn new(tx_hash: TxHash, output_index: u32) -> Self {
        Self {
            tx_hash,
            output_index,
        }
    }

    /// Hash of the transaction that created the output
    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    /// Position of the output in that transaction
    pub fn output_index(&self) -> u32 {
        self.output_index
    }
}

impl fmt::Display for UTXOKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.output_index)
    }
}
