//! Sink trait for log output destinations

use super::error::Result;

/// Destination for rendered text. One call to [`Sink::write_block`] carries a
/// complete multi-line emission and must be written as a unit.
pub trait Sink: Send {
    fn write_block(&mut self, block: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_block(&mut self, block: &str) -> Result<()> {
        (**self).write_block(block)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
