//! Prefix decorations and the ordered registry that holds them

use super::error::{LoggerError, Result};
use super::palette;
use super::timestamp::TimestampFormat;
use std::fmt;

/// A producer of one prefix segment, re-evaluated on every emitted line.
///
/// Implementations must not fail; a producer that cannot compute its value
/// returns an empty or sentinel string instead.
pub trait Decoration: Send + Sync {
    fn render(&self) -> String;

    /// Default tag used to match this decoration in predicate toggles
    fn kind(&self) -> &str {
        "custom"
    }
}

impl<F> Decoration for F
where
    F: Fn() -> String + Send + Sync,
{
    fn render(&self) -> String {
        self()
    }

    fn kind(&self) -> &str {
        "fn"
    }
}

/// Current date and time wrapped in a color and bracket strings
#[derive(Debug, Clone)]
pub struct DateTimeDecoration {
    format: TimestampFormat,
    color: String,
    before: String,
    after: String,
}

impl DateTimeDecoration {
    pub const KIND: &'static str = "datetime";

    pub fn new() -> Self {
        Self::with_style(palette::reset(), "(", ") ")
    }

    pub fn with_style(
        color: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            format: TimestampFormat::Human,
            color: color.into(),
            before: before.into(),
            after: after.into(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for DateTimeDecoration {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoration for DateTimeDecoration {
    fn render(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.color,
            self.before,
            self.format.now(),
            self.after,
            palette::reset()
        )
    }

    fn kind(&self) -> &str {
        Self::KIND
    }
}

/// Fixed text, optionally colored, such as `[SERVER] `
#[derive(Debug, Clone)]
pub struct TagDecoration {
    text: String,
    color: Option<String>,
}

impl TagDecoration {
    pub const KIND: &'static str = "tag";

    /// Text emitted verbatim
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    /// Text wrapped in `color` and a reset marker
    pub fn colored(color: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
        }
    }
}

impl Decoration for TagDecoration {
    fn render(&self) -> String {
        match &self.color {
            Some(color) => format!("{}{}{}", color, self.text, palette::reset()),
            None => self.text.clone(),
        }
    }

    fn kind(&self) -> &str {
        Self::KIND
    }
}

/// A registered decoration with its matching tag and enabled flag
pub struct Decorator {
    decoration: Box<dyn Decoration>,
    tag: String,
    enabled: bool,
}

impl Decorator {
    /// Wrap a decoration, tagged with its [`Decoration::kind`]
    pub fn new(decoration: impl Decoration + 'static) -> Self {
        let tag = decoration.kind().to_string();
        Self {
            decoration: Box::new(decoration),
            tag,
            enabled: true,
        }
    }

    /// Wrap a decoration under an explicit tag
    pub fn tagged(tag: impl Into<String>, decoration: impl Decoration + 'static) -> Self {
        Self {
            decoration: Box::new(decoration),
            tag: tag.into(),
            enabled: true,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn render(&self) -> String {
        self.decoration.render()
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("tag", &self.tag)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Ordered decorators. Entries are never reordered or removed; toggles only
/// flip the `enabled` flag.
#[derive(Debug, Default)]
pub struct DecoratorRegistry {
    entries: Vec<Decorator>,
}

impl DecoratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the end and return the new entry's index
    pub fn append(&mut self, decorator: Decorator) -> usize {
        self.entries.push(decorator);
        self.entries.len() - 1
    }

    pub fn enable_at(&mut self, index: usize) -> Result<()> {
        self.set_at(index, true)
    }

    pub fn disable_at(&mut self, index: usize) -> Result<()> {
        self.set_at(index, false)
    }

    fn set_at(&mut self, index: usize, enabled: bool) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| LoggerError::index_out_of_range(index, len))?;
        entry.enabled = enabled;
        Ok(())
    }

    /// Enable every entry whose tag satisfies `predicate`; returns the match count
    pub fn enable_where(&mut self, predicate: impl Fn(&str) -> bool) -> usize {
        self.set_where(predicate, true)
    }

    /// Disable every entry whose tag satisfies `predicate`; returns the match count
    pub fn disable_where(&mut self, predicate: impl Fn(&str) -> bool) -> usize {
        self.set_where(predicate, false)
    }

    fn set_where(&mut self, predicate: impl Fn(&str) -> bool, enabled: bool) -> usize {
        let mut matched = 0;
        for entry in self.entries.iter_mut().filter(|entry| predicate(&entry.tag)) {
            entry.enabled = enabled;
            matched += 1;
        }
        matched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Decorator> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decorator> {
        self.entries.iter()
    }

    /// Concatenate the output of enabled entries in registration order
    pub fn render(&self) -> String {
        let mut prefix = String::new();
        for entry in self.entries.iter().filter(|entry| entry.enabled) {
            prefix.push_str(&entry.render());
        }
        prefix
    }
}
