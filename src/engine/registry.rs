use crate::engine::{BasicEngineFactory, Engine, EngineConfig, EngineError, EngineFactory};

/// Name-to-factory lookup, built by the caller and passed where needed
#[derive(Default)]
pub struct EngineRegistry {
    factories: Vec<Box<dyn EngineFactory>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in engines
    pub fn with_defaults(config: EngineConfig) -> Self {
        let mut registry = Self::new();
        registry.factories.push(Box::new(BasicEngineFactory::new(config)));
        registry
    }

    /// Add a factory. Names are unique, ignoring case.
    pub fn register(&mut self, factory: Box<dyn EngineFactory>) -> Result<(), EngineError> {
        if self.find(factory.name()).is_some() {
            return Err(EngineError::DuplicateEngine(factory.name().to_string()));
        }
        self.factories.push(factory);
        Ok(())
    }

    /// Look up a factory by name, ignoring case
    pub fn get(&self, name: &str) -> Result<&dyn EngineFactory, EngineError> {
        self.find(name).ok_or_else(|| EngineError::NotFound {
            name: name.to_string(),
            available: self.names().join(","),
        })
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Engine>, EngineError> {
        Ok(self.get(name)?.create_engine())
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn find(&self, name: &str) -> Option<&dyn EngineFactory> {
        self.factories
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
    }
}
