//! # Rust Decorated Logger
//!
//! A console logger that prefixes every line it writes with a configurable
//! sequence of decorations, optionally followed by the source location of
//! the code that called it.
//!
//! ## Features
//!
//! - **Ordered decorations**: timestamps, tags or any `Fn() -> String`,
//!   each individually toggleable
//! - **Per-line prefixes**: multi-line messages get a fresh prefix on every
//!   line and are written as one block
//! - **Caller annotation**: `[module.function(file.rs:42)] ` resolved from
//!   the stack, with depth skipping for wrappers
//! - **Leveled facade**: `log`, `warn` and `error` with a minimum threshold
//! - **Named instances**: a process-wide [`LoggerRegistry`]
//!
//! ```
//! use rust_decorated_logger::prelude::*;
//!
//! let output = MemorySink::new();
//! let logger = Logger::builder()
//!     .decorator(TagDecoration::plain("> "))
//!     .output(output.clone())
//!     .build();
//!
//! logger.log("first\nsecond").unwrap();
//! assert_eq!(output.contents(), "> first\n> second\n");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerLocation, DateTimeDecoration, DebugState, Decoration, Decorator, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerRegistry, Result, Sink,
        TagDecoration, TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    format_template, CallerLocation, DateTimeDecoration, DebugState, Decoration, Decorator,
    DecoratorRegistry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    LoggerRegistry, Result, Sink, TagDecoration, TimestampFormat, NULL_PLACEHOLDER,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, WriterSink};
