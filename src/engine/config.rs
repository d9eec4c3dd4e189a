use crate::engine::EngineError;

/// Configuration for an engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Largest batch accepted by `on_resource_created` (0 = no limit)
    pub max_batch_size: usize,
    /// Log each rejected transaction with its reason
    pub log_rejections: bool,
}

impl EngineConfig {
    /// Create a new config with builder pattern
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    pub fn with_log_rejections(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    /// Check that a batch of `size` transactions is within limits
    pub fn check_batch_size(&self, size: usize) -> Result<(), EngineError> {
        if self.max_batch_size > 0 && size > self.max_batch_size {
            return Err(EngineError::BatchTooLarge {
                size,
                max: self.max_batch_size,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 0,
            log_rejections: true,
        }
    }
}
