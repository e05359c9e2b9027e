//! In-memory sink, for capturing output in tests and tools

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Accumulates written blocks in a shared buffer. Clones share the buffer,
/// so one clone can be handed to a logger while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
    blocks: Arc<Mutex<usize>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Written text split into lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(String::from).collect()
    }

    /// Number of `write_block` calls received
    pub fn block_count(&self) -> usize {
        *self.blocks.lock()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
        *self.blocks.lock() = 0;
    }
}

impl Sink for MemorySink {
    fn write_block(&mut self, block: &str) -> Result<()> {
        self.buffer.lock().push_str(block);
        *self.blocks.lock() += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
