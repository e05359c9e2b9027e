//! Adapter turning any `io::Write` into a sink

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

/// Sink over an arbitrary writer (a socket, a pipe, a `Vec<u8>`, ...)
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named("writer", writer)
    }

    pub fn named(name: impl Into<String>, writer: W) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_block(&mut self, block: &str) -> Result<()> {
        self.writer
            .write_all(block.as_bytes())
            .map_err(|e| LoggerError::sink_write(&self.name, e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::sink_write(&self.name, e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
