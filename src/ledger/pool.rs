// UTXO pool - the current set of spendable outputs

use crate::identity::PublicKey;
use crate::ledger::UTXOKey;
use crate::tx::{Output, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Snapshot serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Snapshot deserialization failed: {0}")]
    DeserializationFailed(String),
}

/// Mapping from UTXO key to the output it names.
///
/// `Clone` gives an independent copy; mutating the copy never touches the
/// source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UTXOPool {
    utxos: HashMap<UTXOKey, Output>,
}

impl UTXOPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Pool holding every output of `tx`, used to seed a ledger from a root transaction
    pub fn from_transaction(tx: &Transaction) -> Self {
        let mut pool = Self::new();
        pool.add_outputs_of(tx);
        pool
    }

    /// Add or overwrite an entry
    pub fn insert(&mut self, key: UTXOKey, output: Output) {
        self.utxos.insert(key, output);
    }

    /// Remove an entry. Absent keys are ignored.
    pub fn remove(&mut self, key: &UTXOKey) -> Option<Output> {
        self.utxos.remove(key)
    }

    pub fn contains(&self, key: &UTXOKey) -> bool {
        self.utxos.contains_key(key)
    }

    pub fn get(&self, key: &UTXOKey) -> Option<&Output> {
        self.utxos.get(key)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Snapshot of all entries, sorted by key
    pub fn entries(&self) -> Vec<(UTXOKey, Output)> {
        let mut entries: Vec<_> = self
            .utxos
            .iter()
            .map(|(key, output)| (*key, output.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &UTXOKey> {
        self.utxos.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UTXOKey, &Output)> {
        self.utxos.iter()
    }

    /// Insert every output of `tx` keyed by (tx hash, index)
    pub fn add_outputs_of(&mut self, tx: &Transaction) {
        for (key, output) in tx.output_keys() {
            self.utxos.insert(key, output.clone());
        }
    }

    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| o.value() as i128).sum()
    }

    /// Entries spendable by `owner`, sorted by key
    pub fn outputs_owned_by(&self, owner: &PublicKey) -> Vec<(UTXOKey, Output)> {
        self.entries()
            .into_iter()
            .filter(|(_, output)| output.owner() == owner)
            .collect()
    }

    pub fn balance_of(&self, owner: &PublicKey) -> i128 {
        self.utxos
            .values()
            .filter(|o| o.owner() == owner)
            .map(|o| o.value() as i128)
            .sum()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PoolError> {
        postcard::to_allocvec(self).map_err(|e| PoolError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PoolError> {
        postcard::from_bytes(bytes).map_err(|e| PoolError::DeserializationFailed(e.to_string()))
    }
}
