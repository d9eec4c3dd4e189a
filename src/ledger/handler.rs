// TxHandler - validates transactions and commits epochs to the UTXO pool

use crate::identity::Signer;
use crate::ledger::{ClaimRegistry, EpochReport, Rejection, RejectionReason, UTXOKey, UTXOPool};
use crate::tx::{Amount, Output, Transaction};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// One failed validity condition. A transaction is valid iff it has none.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input {index} spends an output that is not in the pool")]
    MissingInput { index: usize, key: Option<UTXOKey> },

    #[error("Input {index} is not signed by the owner of the output it spends")]
    InvalidSignature { index: usize },

    #[error("Output {key} is spent more than once")]
    DuplicateInput { key: UTXOKey },

    #[error("Output {index} has negative value {value}")]
    NegativeOutput { index: usize, value: Amount },

    #[error("Outputs total {outputs} but inputs only provide {inputs}")]
    InsufficientInputValue { inputs: i128, outputs: i128 },
}

/// Evaluate every validity condition of `tx`, resolving inputs through `lookup`
fn check<'a, F>(lookup: F, tx: &Transaction) -> Vec<ValidationError>
where
    F: Fn(&UTXOKey) -> Option<&'a Output>,
{
    let mut errors = Vec::new();
    let mut seen: HashSet<UTXOKey> = HashSet::with_capacity(tx.num_inputs());
    let mut total_input: i128 = 0;

    for (index, input) in tx.inputs().iter().enumerate() {
        let key = input.utxo_key();
        let spent = key.as_ref().and_then(&lookup);

        let Some(output) = spent else {
            errors.push(ValidationError::MissingInput { index, key });
            continue;
        };
        total_input += output.value() as i128;

        let authorized = match (tx.signing_payload(index), input.signature()) {
            (Ok(payload), Some(signature)) => Signer::verify_bytes(output.owner(), &payload, signature),
            _ => false,
        };
        if !authorized {
            errors.push(ValidationError::InvalidSignature { index });
        }
    }

    for key in tx.inputs().iter().filter_map(|input| input.utxo_key()) {
        if !seen.insert(key) {
            errors.push(ValidationError::DuplicateInput { key });
        }
    }

    for (index, output) in tx.outputs().iter().enumerate() {
        if output.value() < 0 {
            errors.push(ValidationError::NegativeOutput {
                index,
                value: output.value(),
            });
        }
    }

    let total_output = tx.total_output();
    if total_output > total_input {
        errors.push(ValidationError::InsufficientInputValue {
            inputs: total_input,
            outputs: total_output,
        });
    }

    errors
}

/// Apply an already-validated transaction to a working pool, recording
/// what it consumed
fn apply(pool: &mut UTXOPool, claims: &mut ClaimRegistry, tx: &Transaction) -> usize {
    let mut consumed = 0;
    for key in tx.inputs().iter().filter_map(|input| input.utxo_key()) {
        if let Some(output) = pool.remove(&key) {
            claims.register(key, *tx.hash(), output);
            consumed += 1;
        }
    }
    pool.add_outputs_of(tx);
    consumed
}

/// Owns the current UTXO pool and moves it forward one epoch at a time.
///
/// The pool is never mutated in place: a commit builds a new pool and
/// swaps it in with a single assignment, so `snapshot` holders always see
/// a whole epoch or none of it. Callers sharing a handler across threads
/// must serialize `commit_epoch` themselves.
#[derive(Clone, Debug, Default)]
pub struct TxHandler {
    pool: Arc<UTXOPool>,
}

impl TxHandler {
    pub fn new(pool: UTXOPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &UTXOPool {
        &self.pool
    }

    /// Shared handle to the current pool; unaffected by later commits
    pub fn snapshot(&self) -> Arc<UTXOPool> {
        Arc::clone(&self.pool)
    }

    /// Every validity condition `tx` violates against the current pool
    pub fn violations(&self, tx: &Transaction) -> Vec<ValidationError> {
        check(|key| self.pool.get(key), tx)
    }

    /// True iff all inputs exist in the pool and are signed by their owners,
    /// no output is spent twice, no output is negative, and outputs do not
    /// exceed inputs.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.violations(tx).is_empty()
    }

    /// Commit one epoch and return the accepted transactions in acceptance order
    pub fn commit_epoch(&mut self, proposed: &[Transaction]) -> Vec<Transaction> {
        self.commit_epoch_with_report(proposed).accepted
    }

    /// Commit one epoch.
    ///
    /// Candidates are ordered by identity hash. Each pass accepts, in that
    /// order, every candidate valid against the pool as updated by the
    /// candidates accepted before it; passes repeat until one accepts
    /// nothing. A transaction may therefore spend an output created by any
    /// other accepted transaction of the same batch, and when two compete
    /// for one output the earlier accepted wins.
    pub fn commit_epoch_with_report(&mut self, proposed: &[Transaction]) -> EpochReport {
        let mut report = EpochReport::default();

        let mut candidates: Vec<&Transaction> = proposed.iter().collect();
        candidates.sort_by(|a, b| a.hash().cmp(b.hash()));

        let mut pending: Vec<&Transaction> = Vec::with_capacity(candidates.len());
        for tx in candidates {
            if pending.last().is_some_and(|prev| prev.hash() == tx.hash()) {
                report.rejected.push(Rejection {
                    tx_hash: *tx.hash(),
                    reason: RejectionReason::DuplicateProposal,
                });
            } else {
                pending.push(tx);
            }
        }

        let mut working = (*self.pool).clone();
        let mut claims = ClaimRegistry::new();

        loop {
            let before = pending.len();
            let mut deferred = Vec::with_capacity(before);

            for tx in pending {
                if check(|key| working.get(key), tx).is_empty() {
                    report.consumed += apply(&mut working, &mut claims, tx);
                    report.created += tx.num_outputs();
                    report.accepted.push(tx.clone());
                } else {
                    deferred.push(tx);
                }
            }

            pending = deferred;
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        // A loser that would have been valid with its claimed inputs still
        // in place lost a conflict; anything else is invalid in its own right.
        for tx in pending {
            let violations = check(|key| working.get(key).or_else(|| claims.spent_output(key)), tx);
            let reason = match claims.first_conflict(tx) {
                Some((key, winner)) if violations.is_empty() => RejectionReason::Conflict { key, winner },
                _ => RejectionReason::Invalid(violations),
            };
            debug!(tx = %tx.hash(), %reason, "transaction rejected");
            report.rejected.push(Rejection {
                tx_hash: *tx.hash(),
                reason,
            });
        }

        if !report.accepted.is_empty() {
            self.pool = Arc::new(working);
        }

        info!(
            proposed = proposed.len(),
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            consumed = report.consumed,
            created = report.created,
            pool_size = self.pool.len(),
            "epoch committed"
        );

        report
    }
}
