//! Declarative logger configuration
//!
//! A [`LoggerConfig`] describes everything a [`LoggerBuilder`] can set except
//! the sinks and custom producers, and can be loaded from JSON:
//!
//! ```
//! use rust_decorated_logger::core::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "server",
//!     "min_level": "Warn",
//!     "debug": { "enabled": true, "short": true, "color": "cyan" },
//!     "decorators": [
//!         { "kind": "date_time", "format": "Iso8601", "color": "green", "before": "[", "after": "] " },
//!         { "kind": "tag", "text": "[SERVER] ", "color": "magenta" }
//!     ]
//! }"#).unwrap();
//!
//! let logger = config.into_builder().unwrap().build();
//! assert_eq!(logger.name(), Some("server"));
//! assert_eq!(logger.decorator_count(), 2);
//! ```

use super::decorator::{DateTimeDecoration, TagDecoration};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::LoggerBuilder;
use super::palette;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: Option<String>,
    pub min_level: LogLevel,
    pub debug: DebugConfig,
    /// Prefix producers in emission order
    pub decorators: Vec<DecoratorConfig>,
    pub route_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
    pub short: bool,
    /// Color name understood by `colored`, or `"reset"`
    pub color: String,
    pub before: String,
    pub after: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            short: false,
            color: "blue".to_string(),
            before: "[".to_string(),
            after: "] ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecoratorConfig {
    DateTime {
        #[serde(default = "default_datetime_format")]
        format: TimestampFormat,
        #[serde(default = "default_reset")]
        color: String,
        #[serde(default = "default_open_paren")]
        before: String,
        #[serde(default = "default_close_paren")]
        after: String,
    },
    Tag {
        text: String,
        #[serde(default)]
        color: Option<String>,
    },
}

fn default_datetime_format() -> TimestampFormat {
    TimestampFormat::Human
}

fn default_reset() -> String {
    "reset".to_string()
}

fn default_open_paren() -> String {
    "(".to_string()
}

fn default_close_paren() -> String {
    ") ".to_string()
}

fn color_marker(component: &str, name: &str) -> Result<String> {
    palette::marker_from_name(name)
        .ok_or_else(|| LoggerError::config(component, format!("unknown color '{}'", name)))
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Translate into a builder; sinks default to stdout/stderr and can be
    /// overridden on the returned builder.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidConfiguration`] for an unknown color name.
    pub fn into_builder(self) -> Result<LoggerBuilder> {
        let mut builder = LoggerBuilder::new()
            .min_level(self.min_level)
            .route_errors(self.route_errors)
            .debug_short(self.debug.short);

        if let Some(name) = self.name {
            builder = builder.name(name);
        }

        let color = color_marker("debug", &self.debug.color)?;
        builder = builder
            .debug_style(color, self.debug.before, self.debug.after)
            .debug(self.debug.enabled);

        for decorator in self.decorators {
            builder = match decorator {
                DecoratorConfig::DateTime {
                    format,
                    color,
                    before,
                    after,
                } => {
                    let color = color_marker("date_time decorator", &color)?;
                    builder.decorator(
                        DateTimeDecoration::with_style(color, before, after).with_format(format),
                    )
                }
                DecoratorConfig::Tag { text, color } => match color {
                    Some(color) => {
                        let color = color_marker("tag decorator", &color)?;
                        builder.decorator(TagDecoration::colored(color, text))
                    }
                    None => builder.decorator(TagDecoration::plain(text)),
                },
            };
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.min_level, LogLevel::Log);
        assert!(!config.debug.enabled);
        assert!(config.decorators.is_empty());
    }

    #[test]
    fn test_decorator_order_preserved() {
        let config = LoggerConfig::from_json(
            r#"{ "decorators": [
                { "kind": "tag", "text": "[A] " },
                { "kind": "date_time" },
                { "kind": "tag", "text": "[B] " }
            ] }"#,
        )
        .unwrap();

        assert!(matches!(config.decorators[0], DecoratorConfig::Tag { .. }));
        assert!(matches!(
            config.decorators[1],
            DecoratorConfig::DateTime {
                format: TimestampFormat::Human,
                ..
            }
        ));

        let output = MemorySink::new();
        let logger = config
            .into_builder()
            .unwrap()
            .output(output.clone())
            .error_output(MemorySink::new())
            .build();
        logger.disable(1).unwrap().log("x").unwrap();
        assert_eq!(output.contents(), "[A] [B] x\n");
    }

    #[test]
    fn test_debug_settings_applied() {
        let config = LoggerConfig::from_json(
            r#"{ "debug": { "enabled": true, "short": true, "color": "reset", "before": "{", "after": "} " } }"#,
        )
        .unwrap();
        let logger = config.into_builder().unwrap().build();

        let state = logger.debug_state();
        assert!(state.enabled);
        assert!(state.short);
        assert_eq!(state.color, palette::reset());
        assert_eq!(state.before, "{");
    }

    #[test]
    fn test_unknown_color_rejected() {
        let config = LoggerConfig::from_json(
            r#"{ "decorators": [ { "kind": "tag", "text": "x", "color": "chartreuse-ish" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_builder(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = LoggerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = LoggerConfig {
            name: Some("svc".to_string()),
            min_level: LogLevel::Error,
            ..LoggerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(LoggerConfig::from_json(&json).unwrap(), config);
    }
}
