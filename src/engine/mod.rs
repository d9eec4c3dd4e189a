// Engine module - pluggable shell that feeds batches to the ledger core

mod basic;
mod config;
mod registry;
mod traits;

pub use basic::{BasicEngine, BasicEngineFactory, BASIC_ENGINE_NAME};
pub use config::EngineConfig;
pub use registry::EngineRegistry;
pub use traits::{BatchResource, Engine, EngineError, EngineFactory, LedgerLine, Resource};
