// Ledger module - unspent outputs, validation, and epoch commits

mod conflict;
mod handler;
mod pool;
mod utxo;

pub use conflict::{ClaimRegistry, EpochReport, Rejection, RejectionReason};
pub use handler::{TxHandler, ValidationError};
pub use pool::{PoolError, UTXOPool};
pub use utxo::UTXOKey;
