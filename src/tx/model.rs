use crate::identity::PublicKey;
use crate::ledger::UTXOKey;
use crate::tx::encoding;
use crate::tx::TransactionBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Value in smallest units. Signed so that a negative output can be
/// expressed and then rejected by validation.
pub type Amount = i64;

/// Errors from transaction construction and indexed access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Input index {index} out of range: transaction has {len} inputs")]
    InputIndexOutOfRange { index: usize, len: usize },

    #[error("Identity hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch { stored: TxHash, computed: TxHash },
}

/// Identity of a finalized transaction (SHA-256 of its canonical encoding)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", &self.to_hex()[..16])
    }
}

/// A value and the public key allowed to spend it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    value: Amount,
    owner: PublicKey,
}

impl Output {
    pub fn new(value: Amount, owner: PublicKey) -> Self {
        Self { value, owner }
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn owner(&self) -> &PublicKey {
        &self.owner
    }
}

/// Reference to an output being spent, plus the spender's signature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Hash of the transaction that created the output; `None` for a root placeholder
    source_tx_hash: Option<TxHash>,
    /// Index of the output within that transaction
    output_index: u32,
    /// Raw signature bytes, attached after the payload has been signed
    signature: Option<Vec<u8>>,
}

impl Input {
    pub fn new(source_tx_hash: Option<TxHash>, output_index: u32) -> Self {
        Self {
            source_tx_hash,
            output_index,
            signature: None,
        }
    }

    pub fn source_tx_hash(&self) -> Option<&TxHash> {
        self.source_tx_hash.as_ref()
    }

    pub fn output_index(&self) -> u32 {
        self.output_index
    }

    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// The pool key this input spends. Root placeholders have none.
    pub fn utxo_key(&self) -> Option<UTXOKey> {
        self.source_tx_hash
            .map(|hash| UTXOKey::new(hash, self.output_index))
    }

    pub(crate) fn set_signature(&mut self, signature: &[u8]) {
        self.signature = Some(signature.to_vec());
    }
}

/// A finalized transaction. Its fields can no longer change, so the
/// identity hash stays valid as a pool key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UnverifiedTransaction")]
pub struct Transaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    hash: TxHash,
}

impl Transaction {
    pub(crate) fn from_parts(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        let hash = encoding::identity_hash(&inputs, &outputs);
        Self {
            inputs,
            outputs,
            hash,
        }
    }

    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Bytes the owner of the output spent by `input_index` must have signed
    pub fn signing_payload(&self, input_index: usize) -> Result<Vec<u8>, TransactionError> {
        encoding::signing_payload(&self.inputs, &self.outputs, input_index)
    }

    /// Canonical encoding the identity hash is computed over
    pub fn canonical_bytes(&self) -> Vec<u8> {
        encoding::canonical_bytes(&self.inputs, &self.outputs)
    }

    /// Recompute the hash and compare it with the stored one
    pub fn verify_identity(&self) -> Result<(), TransactionError> {
        let computed = encoding::identity_hash(&self.inputs, &self.outputs);
        if computed != self.hash {
            return Err(TransactionError::HashMismatch {
                stored: self.hash,
                computed,
            });
        }
        Ok(())
    }

    /// Pool keys for each output, paired with the output itself
    pub fn output_keys(&self) -> impl Iterator<Item = (UTXOKey, &Output)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(move |(index, output)| (UTXOKey::new(self.hash, index as u32), output))
    }

    /// Sum of all output values
    pub fn total_output(&self) -> i128 {
        self.outputs.iter().map(|o| o.value() as i128).sum()
    }

    /// Re-open the transaction for editing. The hash is dropped and will be
    /// recomputed by the next `finalize`.
    pub fn into_builder(self) -> TransactionBuilder {
        TransactionBuilder::from_parts(self.inputs, self.outputs)
    }
}

/// Wire form of a transaction, checked before it becomes a `Transaction`
#[derive(Deserialize)]
struct UnverifiedTransaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    hash: TxHash,
}

impl TryFrom<UnverifiedTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(raw: UnverifiedTransaction) -> Result<Self, Self::Error> {
        let tx = Transaction {
            inputs: raw.inputs,
            outputs: raw.outputs,
            hash: raw.hash,
        };
        tx.verify_identity()?;
        Ok(tx)
    }
}
