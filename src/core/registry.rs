//! Named logger instances
//!
//! Loggers built with [`LoggerBuilder::name`](super::LoggerBuilder::name)
//! can be registered here and looked up by name from anywhere in the
//! process. Registration is optional; unregistered loggers work the same.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL_REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry
    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register a named logger and return the shared handle.
    ///
    /// # Errors
    ///
    /// - [`LoggerError::InvalidConfiguration`] if the logger has no name
    /// - [`LoggerError::DuplicateName`] if the name is taken
    pub fn register(&self, logger: Logger) -> Result<Arc<Logger>> {
        let name = logger
            .name()
            .ok_or_else(|| LoggerError::config("LoggerRegistry", "only named loggers can be registered"))?
            .to_string();

        let mut loggers = self.loggers.write();
        if loggers.contains_key(&name) {
            return Err(LoggerError::DuplicateName(name));
        }
        let logger = Arc::new(logger);
        loggers.insert(name, Arc::clone(&logger));
        Ok(logger)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.write().remove(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    pub fn clear(&self) {
        self.loggers.write().clear();
    }
}
