use crate::identity::OwnerId;
use crate::ledger::{UTXOKey, UTXOPool};
use crate::tx::{Amount, Transaction};
use std::fmt;
use thiserror::Error;

/// Errors raised by the engine shell. These are caller contract
/// violations; invalid transactions never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Engine not initialized: call init first")]
    NotInitialized,

    #[error("Transaction batch is empty or missing")]
    EmptyBatch,

    #[error("Transaction batch too large: {size} proposed, limit is {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Engine '{name}' is not found. Available engines are: {available}")]
    NotFound { name: String, available: String },

    #[error("Engine '{0}' is already registered")]
    DuplicateEngine(String),
}

/// Opaque carrier of a proposed batch
pub trait Resource {
    /// Proposed transactions, or `None` when the resource carries none
    fn proposed_transactions(&self) -> Option<&[Transaction]>;
}

/// Stock resource: a batch that may or may not have been filled in
#[derive(Clone, Debug, Default)]
pub struct BatchResource {
    proposed: Option<Vec<Transaction>>,
}

impl BatchResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(proposed: Vec<Transaction>) -> Self {
        Self {
            proposed: Some(proposed),
        }
    }

    pub fn set_proposed_transactions(&mut self, proposed: Vec<Transaction>) {
        self.proposed = Some(proposed);
    }
}

impl Resource for BatchResource {
    fn proposed_transactions(&self) -> Option<&[Transaction]> {
        self.proposed.as_deref()
    }
}

/// One row of a ledger dump
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerLine {
    pub key: UTXOKey,
    pub value: Amount,
    pub owner: OwnerId,
}

impl fmt::Display for LedgerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} received by {}", self.value, self.owner)
    }
}

/// A settlement engine driven by an outer shell
pub trait Engine: Send {
    /// Seed the engine with a ledger, or an empty one when `None`
    fn init(&mut self, ledger: Option<UTXOPool>);

    /// Commit the batch carried by `resource`; returns the accepted transactions
    fn on_resource_created(&mut self, resource: &dyn Resource) -> Result<Vec<Transaction>, EngineError>;

    /// Current ledger, one line per unspent output
    fn dump_ledger(&self) -> Result<Vec<LedgerLine>, EngineError>;

    /// Release the ledger; the engine must be re-initialized before reuse
    fn destroy(&mut self);
}

/// Creates engines of one kind, looked up by name in an `EngineRegistry`
pub trait EngineFactory: Send + Sync {
    fn name(&self) -> &str;

    fn create_engine(&self) -> Box<dyn Engine>;
}
