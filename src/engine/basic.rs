use crate::engine::{Engine, EngineConfig, EngineError, EngineFactory, LedgerLine, Resource};
use crate::ledger::{TxHandler, UTXOPool};
use crate::tx::Transaction;
use tracing::{info, warn};

pub const BASIC_ENGINE_NAME: &str = "basic";

/// Engine that commits every proposed batch straight through a `TxHandler`
#[derive(Debug, Default)]
pub struct BasicEngine {
    handler: Option<TxHandler>,
    config: EngineConfig,
}

impl BasicEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            handler: None,
            config,
        }
    }

    pub fn handler(&self) -> Option<&TxHandler> {
        self.handler.as_ref()
    }

    fn handler_mut(&mut self) -> Result<&mut TxHandler, EngineError> {
        self.handler.as_mut().ok_or(EngineError::NotInitialized)
    }
}

impl Engine for BasicEngine {
    fn init(&mut self, ledger: Option<UTXOPool>) {
        let pool = ledger.unwrap_or_default();
        info!(entries = pool.len(), "engine initialized");
        self.handler = Some(TxHandler::new(pool));
    }

    fn on_resource_created(&mut self, resource: &dyn Resource) -> Result<Vec<Transaction>, EngineError> {
        let proposed = match resource.proposed_transactions() {
            Some(txs) if !txs.is_empty() => txs,
            _ => {
                warn!("refusing empty transaction batch");
                return Err(EngineError::EmptyBatch);
            }
        };
        self.config.check_batch_size(proposed.len())?;

        let log_rejections = self.config.log_rejections;
        let report = self.handler_mut()?.commit_epoch_with_report(proposed);

        if log_rejections {
            for rejection in &report.rejected {
                info!(tx = %rejection.tx_hash, reason = %rejection.reason, "proposal rejected");
            }
        }

        Ok(report.accepted)
    }

    fn dump_ledger(&self) -> Result<Vec<LedgerLine>, EngineError> {
        let handler = self.handler.as_ref().ok_or(EngineError::NotInitialized)?;
        Ok(handler
            .pool()
            .entries()
            .into_iter()
            .map(|(key, output)| LedgerLine {
                key,
                value: output.value(),
                owner: output.owner().owner_id(),
            })
            .collect())
    }

    fn destroy(&mut self) {
        self.handler = None;
    }
}

/// Factory registered under the name "basic"
#[derive(Clone, Debug, Default)]
pub struct BasicEngineFactory {
    config: EngineConfig,
}

impl BasicEngineFactory {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl EngineFactory for BasicEngineFactory {
    fn name(&self) -> &str {
        BASIC_ENGINE_NAME
    }

    fn create_engine(&self) -> Box<dyn Engine> {
        Box::new(BasicEngine::new(self.config.clone()))
    }
}
