//! Logging macros for ergonomic log message formatting.
//!
//! Each macro expands in place to one facade call, so caller annotation
//! reports the function that invoked the macro. The macros evaluate to the
//! facade's `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_decorated_logger::prelude::*;
//! use rust_decorated_logger::{error, log, warn};
//!
//! let output = MemorySink::new();
//! let logger = Logger::builder().output(output.clone()).build();
//!
//! let port = 8080;
//! log!(logger, "listening on port {}", port).unwrap();
//! warn!(logger, "retry {} of {}", 1, 3).unwrap();
//! error!(logger, "giving up").unwrap();
//!
//! assert_eq!(output.lines().len(), 3);
//! ```

/// Format and log at the plain level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(format!($($arg)+))
    };
}

/// Format and log with the warning tag.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Format and log with the error tag.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}
