// Conflict bookkeeping for one epoch - who consumed which output, and why
// the losers were turned away

use crate::ledger::{UTXOKey, ValidationError};
use crate::tx::{Output, Transaction, TxHash};
use std::collections::HashMap;
use std::fmt;

/// Why a proposed transaction was left out of an epoch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    /// An identical transaction (same identity hash) was already proposed
    DuplicateProposal,
    /// An input was consumed earlier in this epoch by `winner`
    Conflict { key: UTXOKey, winner: TxHash },
    /// The transaction failed validation against the epoch's final pool
    Invalid(Vec<ValidationError>),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProposal => f.write_str("duplicate proposal"),
            Self::Conflict { key, winner } => {
                write!(f, "output {} already spent by {}", key, winner)
            }
            Self::Invalid(errors) => {
                let reasons: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "invalid: {}", reasons.join("; "))
            }
        }
    }
}

/// A proposed transaction that was not accepted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub tx_hash: TxHash,
    pub reason: RejectionReason,
}

/// Outcome of one epoch commit
#[derive(Clone, Debug, Default)]
pub struct EpochReport {
    /// Accepted transactions, in acceptance order
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<Rejection>,
    /// Pool entries removed by accepted transactions
    pub consumed: usize,
    /// Pool entries added by accepted transactions
    pub created: usize,
}

impl EpochReport {
    pub fn accepted_hashes(&self) -> Vec<TxHash> {
        self.accepted.iter().map(|tx| *tx.hash()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// An output consumed during the epoch, and who consumed it
#[derive(Clone, Debug)]
struct Claim {
    winner: TxHash,
    output: Output,
}

/// Records which accepted transaction spent each output during an epoch.
///
/// The first claim on a key is final; there is no second winner. The
/// spent output is kept so a losing transaction can still be checked on
/// its own merits.
#[derive(Clone, Debug, Default)]
pub struct ClaimRegistry {
    claims: HashMap<UTXOKey, Claim>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: UTXOKey, winner: TxHash, output: Output) {
        self.claims.entry(key).or_insert(Claim { winner, output });
    }

    pub fn winner(&self, key: &UTXOKey) -> Option<&TxHash> {
        self.claims.get(key).map(|claim| &claim.winner)
    }

    /// The output `key` named before it was consumed this epoch
    pub fn spent_output(&self, key: &UTXOKey) -> Option<&Output> {
        self.claims.get(key).map(|claim| &claim.output)
    }

    /// First input of `tx` already claimed by another transaction
    pub fn first_conflict(&self, tx: &Transaction) -> Option<(UTXOKey, TxHash)> {
        tx.inputs()
            .iter()
            .filter_map(|input| input.utxo_key())
            .find_map(|key| {
                self.claims
                    .get(&key)
                    .filter(|claim| &claim.winner != tx.hash())
                    .map(|claim| (key, claim.winner))
            })
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }
}
