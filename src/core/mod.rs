//! Core logger types and traits

pub mod caller;
pub mod composer;
pub mod config;
pub mod decorator;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod palette;
pub mod registry;
pub mod sink;
pub mod template;
pub mod timestamp;

pub use caller::CallerLocation;
pub use composer::DebugState;
pub use config::{DebugConfig, DecoratorConfig, LoggerConfig};
pub use decorator::{DateTimeDecoration, Decoration, Decorator, DecoratorRegistry, TagDecoration};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, NULL_PLACEHOLDER};
pub use metrics::LoggerMetrics;
pub use registry::LoggerRegistry;
pub use sink::Sink;
pub use template::format_template;
pub use timestamp::TimestampFormat;
