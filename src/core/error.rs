//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Positional decorator toggle outside `[0, len)`
    #[error("Decorator index {index} out of range (decorator count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Requested caller depth is deeper than the current call stack
    #[error("Invalid caller depth {requested}: only {available} frames above the resolver")]
    InvalidDepth { requested: usize, available: usize },

    /// Message template and arguments do not match
    #[error("Format error in template '{template}': {message}")]
    Format { template: String, message: String },

    /// Sink rejected a write
    #[error("Write to sink '{sink}' failed: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A logger with this name is already registered
    #[error("Logger named '{0}' is already registered")]
    DuplicateName(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an index error for a positional decorator toggle
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        LoggerError::IndexOutOfRange { index, len }
    }

    /// Create an invalid depth error
    pub fn invalid_depth(requested: usize, available: usize) -> Self {
        LoggerError::InvalidDepth {
            requested,
            available,
        }
    }

    /// Create a format error
    pub fn format(template: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Format {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
