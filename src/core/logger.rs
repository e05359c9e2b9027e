//! Main logger implementation
//!
//! Every public entry point funnels into one private line emitter. Each
//! internal hop between an entry point and the caller-location resolver adds
//! one to the `depth` it forwards and keeps its own frame on the stack, so
//! annotation always reports the external call site. Entry points also
//! capture that site with `#[track_caller]`, which fixes its file and line
//! even when the symbolizer has no debug info for it.

use super::{
    caller::{keep_frame, next_depth},
    composer::{self, DebugState},
    decorator::{Decoration, Decorator, DecoratorRegistry},
    error::Result,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    palette,
    sink::Sink,
    template::format_template,
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::io;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

/// Text emitted in place of an absent value
pub const NULL_PLACEHOLDER: &str = "null";

/// Source position of an entry-point call, captured with `#[track_caller]`
type CallSite = &'static Location<'static>;

/// Call site to attach for an entry point invoked with `depth`. The captured
/// position belongs to the depth-0 frame only.
#[track_caller]
fn call_site(depth: usize) -> Option<CallSite> {
    if depth == 0 {
        Some(Location::caller())
    } else {
        None
    }
}

struct Sinks {
    output: Box<dyn Sink>,
    error: Box<dyn Sink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Output,
    Error,
}

pub struct Logger {
    name: Option<String>,
    min_level: RwLock<LogLevel>,
    decorators: RwLock<DecoratorRegistry>,
    debug: RwLock<DebugState>,
    route_errors: AtomicBool,
    /// Held for the whole compose + write of one emission
    sinks: Mutex<Sinks>,
    /// Partial line written through `io::Write`, awaiting its newline
    pending: Mutex<Vec<u8>>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to stdout, with stderr as its error sink
    #[must_use]
    pub fn new() -> Self {
        Self::with_sinks(ConsoleSink::stdout(), ConsoleSink::stderr())
    }

    #[must_use]
    pub fn with_sinks(output: impl Sink + 'static, error_output: impl Sink + 'static) -> Self {
        Self::from_parts(None, Box::new(output), Box::new(error_output))
    }

    fn from_parts(name: Option<String>, output: Box<dyn Sink>, error: Box<dyn Sink>) -> Self {
        Self {
            name,
            min_level: RwLock::new(LogLevel::Log),
            decorators: RwLock::new(DecoratorRegistry::new()),
            debug: RwLock::new(DebugState::default()),
            route_errors: AtomicBool::new(false),
            sinks: Mutex::new(Sinks { output, error }),
            pending: Mutex::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Name given at construction, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    // ------------------------------------------------------------------
    // Decorators
    // ------------------------------------------------------------------

    /// Append a decoration tagged with its kind, enabled
    pub fn add_decorator(&self, decoration: impl Decoration + 'static) -> &Self {
        self.append_decorator(Decorator::new(decoration))
    }

    /// Append a decoration under an explicit tag, enabled
    pub fn add_tagged_decorator(
        &self,
        tag: impl Into<String>,
        decoration: impl Decoration + 'static,
    ) -> &Self {
        self.append_decorator(Decorator::tagged(tag, decoration))
    }

    pub fn append_decorator(&self, decorator: Decorator) -> &Self {
        self.decorators.write().append(decorator);
        self
    }

    /// Enable the decorator at `index`
    ///
    /// # Errors
    ///
    /// [`LoggerError::IndexOutOfRange`](super::LoggerError::IndexOutOfRange)
    /// if `index >= decorator_count()`.
    pub fn enable(&self, index: usize) -> Result<&Self> {
        self.decorators.write().enable_at(index)?;
        Ok(self)
    }

    /// Disable the decorator at `index`
    ///
    /// # Errors
    ///
    /// [`LoggerError::IndexOutOfRange`](super::LoggerError::IndexOutOfRange)
    /// if `index >= decorator_count()`.
    pub fn disable(&self, index: usize) -> Result<&Self> {
        self.decorators.write().disable_at(index)?;
        Ok(self)
    }

    /// Enable every decorator whose tag satisfies `predicate`
    pub fn enable_where(&self, predicate: impl Fn(&str) -> bool) -> &Self {
        self.decorators.write().enable_where(predicate);
        self
    }

    /// Disable every decorator whose tag satisfies `predicate`
    pub fn disable_where(&self, predicate: impl Fn(&str) -> bool) -> &Self {
        self.decorators.write().disable_where(predicate);
        self
    }

    pub fn decorator_count(&self) -> usize {
        self.decorators.read().len()
    }

    pub fn is_decorator_enabled(&self, index: usize) -> Option<bool> {
        self.decorators.read().get(index).map(Decorator::is_enabled)
    }

    // ------------------------------------------------------------------
    // Caller-location annotation
    // ------------------------------------------------------------------

    pub fn debug(&self, enabled: bool) -> &Self {
        self.debug.write().enabled = enabled;
        self
    }

    pub fn debug_short(&self, short: bool) -> &Self {
        self.debug.write().short = short;
        self
    }

    /// Set the annotation color without changing whether it is enabled
    pub fn debug_color(&self, color: impl Into<String>) -> &Self {
        self.debug.write().color = color.into();
        self
    }

    /// Enable annotation with the given color and bracket strings
    pub fn debug_style(
        &self,
        color: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> &Self {
        let mut debug = self.debug.write();
        debug.enabled = true;
        debug.color = color.into();
        debug.before = before.into();
        debug.after = after.into();
        self
    }

    /// Snapshot of the annotation settings
    pub fn debug_state(&self) -> DebugState {
        self.debug.read().clone()
    }

    pub fn is_debug(&self) -> bool {
        self.debug.read().enabled
    }

    pub fn is_debug_short(&self) -> bool {
        self.debug.read().short
    }

    // ------------------------------------------------------------------
    // Levels and routing
    // ------------------------------------------------------------------

    pub fn set_min_level(&self, level: LogLevel) -> &Self {
        *self.min_level.write() = level;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    /// Send `error` emissions to the error sink instead of the output sink
    pub fn route_errors(&self, enabled: bool) -> &Self {
        self.route_errors.store(enabled, Ordering::Relaxed);
        self
    }

    // ------------------------------------------------------------------
    // Sinks
    // ------------------------------------------------------------------

    pub fn set_output(&self, sink: impl Sink + 'static) -> &Self {
        self.sinks.lock().output = Box::new(sink);
        self
    }

    pub fn set_error_output(&self, sink: impl Sink + 'static) -> &Self {
        self.sinks.lock().error = Box::new(sink);
        self
    }

    pub fn output_name(&self) -> String {
        self.sinks.lock().output.name().to_string()
    }

    pub fn error_output_name(&self) -> String {
        self.sinks.lock().error.name().to_string()
    }

    /// Emit any buffered partial line, then flush both sinks
    pub fn flush(&self) -> Result<()> {
        self.flush_pending()?;
        let mut sinks = self.sinks.lock();
        sinks.output.flush()?;
        sinks.error.flush()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    #[track_caller]
    #[inline(never)]
    pub fn log(&self, message: impl AsRef<str>) -> Result<&Self> {
        let site = Location::caller();
        keep_frame(self.submit(LogLevel::Log, message.as_ref(), 1, Some(site)))?;
        Ok(self)
    }

    /// Log, annotating the frame `depth` levels above this call's caller.
    ///
    /// A wrapper around the logger passes `depth + 1` for each frame it adds.
    #[track_caller]
    #[inline(never)]
    pub fn log_at(&self, message: impl AsRef<str>, depth: usize) -> Result<&Self> {
        let site = call_site(depth);
        keep_frame(self.submit(LogLevel::Log, message.as_ref(), next_depth(depth), site))?;
        Ok(self)
    }

    /// Log a runtime template, see [`format_template`]
    ///
    /// # Errors
    ///
    /// [`LoggerError::Format`](super::LoggerError::Format) on a
    /// template/argument mismatch.
    #[track_caller]
    #[inline(never)]
    pub fn log_fmt(&self, template: &str, args: &[&dyn Display]) -> Result<&Self> {
        let site = Location::caller();
        keep_frame(self.submit_fmt(template, args, 1, Some(site)))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn log_fmt_at(&self, template: &str, depth: usize, args: &[&dyn Display]) -> Result<&Self> {
        let site = call_site(depth);
        keep_frame(self.submit_fmt(template, args, next_depth(depth), site))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn warn(&self, message: impl AsRef<str>) -> Result<&Self> {
        let site = Location::caller();
        keep_frame(self.submit(LogLevel::Warn, message.as_ref(), 1, Some(site)))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn warn_at(&self, message: impl AsRef<str>, depth: usize) -> Result<&Self> {
        let site = call_site(depth);
        keep_frame(self.submit(LogLevel::Warn, message.as_ref(), next_depth(depth), site))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn error(&self, message: impl AsRef<str>) -> Result<&Self> {
        let site = Location::caller();
        keep_frame(self.submit(LogLevel::Error, message.as_ref(), 1, Some(site)))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn error_at(&self, message: impl AsRef<str>, depth: usize) -> Result<&Self> {
        let site = call_site(depth);
        keep_frame(self.submit(LogLevel::Error, message.as_ref(), next_depth(depth), site))?;
        Ok(self)
    }

    /// Emit any displayable value, like a print stream would
    #[track_caller]
    #[inline(never)]
    pub fn println(&self, value: impl Display) -> Result<&Self> {
        let site = Location::caller();
        keep_frame(self.submit(LogLevel::Log, &value.to_string(), 1, Some(site)))?;
        Ok(self)
    }

    /// Emit a value, or [`NULL_PLACEHOLDER`] when absent
    #[track_caller]
    #[inline(never)]
    pub fn println_opt<T: Display>(&self, value: Option<T>) -> Result<&Self> {
        let site = Location::caller();
        let text: Cow<'_, str> = match value {
            Some(value) => Cow::Owned(value.to_string()),
            None => Cow::Borrowed(NULL_PLACEHOLDER),
        };
        keep_frame(self.submit(LogLevel::Log, &text, 1, Some(site)))?;
        Ok(self)
    }

    #[track_caller]
    #[inline(never)]
    pub fn print_chars(&self, chars: &[char]) -> Result<&Self> {
        let site = Location::caller();
        let text: String = chars.iter().collect();
        keep_frame(self.submit(LogLevel::Log, &text, 1, Some(site)))?;
        Ok(self)
    }

    /// Prefix for one line as it would be emitted from the frame `depth`
    /// levels above this call's caller
    #[track_caller]
    #[inline(never)]
    pub fn compose(&self, depth: usize) -> Result<String> {
        let site = call_site(depth);
        let decorators = self.decorators.read();
        let debug = self.debug.read();
        keep_frame(composer::compose(&decorators, &debug, next_depth(depth), site))
    }

    // ------------------------------------------------------------------
    // Line emitter
    // ------------------------------------------------------------------

    #[inline(never)]
    fn submit_fmt(
        &self,
        template: &str,
        args: &[&dyn Display],
        depth: usize,
        site: Option<CallSite>,
    ) -> Result<()> {
        if !self.is_level_enabled(LogLevel::Log) {
            return Ok(());
        }
        let message = format_template(template, args)?;
        keep_frame(self.submit(LogLevel::Log, &message, next_depth(depth), site))
    }

    /// Level check, body tag and sink selection for one logical message
    #[inline(never)]
    fn submit(&self, level: LogLevel, body: &str, depth: usize, site: Option<CallSite>) -> Result<()> {
        if !self.is_level_enabled(level) {
            return Ok(());
        }

        let message: Cow<'_, str> = match level.tag() {
            Some(tag) => Cow::Owned(format!("{}{}", palette::paint(level.color_code(), tag), body)),
            None => Cow::Borrowed(body),
        };
        let target = if level == LogLevel::Error && self.route_errors.load(Ordering::Relaxed) {
            Target::Error
        } else {
            Target::Output
        };

        keep_frame(self.emit(target, &message, next_depth(depth), site))
    }

    /// Prefix every `\n`-separated line and write the block in one call.
    ///
    /// The sink lock is held from the first prefix to the end of the write,
    /// so concurrent emissions on one logger never interleave.
    #[inline(never)]
    fn emit(&self, target: Target, message: &str, depth: usize, site: Option<CallSite>) -> Result<()> {
        let mut sinks = self.sinks.lock();

        let depth = next_depth(depth);
        let mut block = String::with_capacity(message.len() + 64);
        let mut lines = 0u64;
        for line in message.split('\n') {
            let prefix = composer::compose(&self.decorators.read(), &self.debug.read(), depth, site)?;
            block.push_str(&prefix);
            block.push_str(line);
            block.push('\n');
            lines += 1;
        }

        let sink = match target {
            Target::Output => &mut sinks.output,
            Target::Error => &mut sinks.error,
        };
        match sink.write_block(&block) {
            Ok(()) => {
                self.metrics.record_emission(lines);
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed_write();
                Err(e)
            }
        }
    }

    #[inline(never)]
    fn flush_pending(&self) -> Result<()> {
        let rest = std::mem::take(&mut *self.pending.lock());
        if !rest.is_empty() {
            self.submit(LogLevel::Log, &String::from_utf8_lossy(&rest), 1, None)?;
        }
        Ok(())
    }

    /// Write an internal diagnostic line to the error sink
    fn report(&self, line: &str) {
        let mut sinks = self.sinks.lock();
        let _ = sinks.error.write_block(&format!("{}\n", line));
    }

    /// Take everything up to and including the last newline from the
    /// pending buffer, without that final newline
    fn take_complete_lines(&self, buf: &[u8]) -> Option<Vec<u8>> {
        let mut pending = self.pending.lock();
        pending.extend_from_slice(buf);
        let pos = pending.iter().rposition(|&b| b == b'\n')?;
        let rest = pending.split_off(pos + 1);
        let mut complete = std::mem::replace(&mut *pending, rest);
        complete.pop();
        Some(complete)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("decorators", &self.decorator_count())
            .field("debug", &self.debug_state())
            .finish_non_exhaustive()
    }
}

/// Redirect generic output through decoration. Complete lines are emitted
/// as they arrive; a trailing partial line waits for its newline or `flush`.
impl io::Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(lines) = self.take_complete_lines(buf) {
            self.log_at(String::from_utf8_lossy(&lines), 1)
                .map_err(io::Error::other)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self).map_err(io::Error::other)
    }
}

impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut &*self)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            self.report(&format!("[LOGGER ERROR] Failed to flush during shutdown: {}", e));
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_decorated_logger::prelude::*;
///
/// let output = MemorySink::new();
/// let logger = Logger::builder()
///     .decorator(TagDecoration::plain("[SERVER] "))
///     .output(output.clone())
///     .build();
///
/// logger.log("boot ok").unwrap();
/// assert_eq!(output.contents(), "[SERVER] boot ok\n");
/// ```
pub struct LoggerBuilder {
    name: Option<String>,
    min_level: LogLevel,
    decorators: Vec<Decorator>,
    output: Option<Box<dyn Sink>>,
    error_output: Option<Box<dyn Sink>>,
    debug: DebugState,
    route_errors: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: None,
            min_level: LogLevel::Log,
            decorators: Vec::new(),
            output: None,
            error_output: None,
            debug: DebugState::default(),
            route_errors: false,
        }
    }

    /// Name the logger, for lookup in a [`LoggerRegistry`](super::LoggerRegistry)
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Append a decoration; order of calls is prefix order
    #[must_use = "builder methods return a new value"]
    pub fn decorator(mut self, decoration: impl Decoration + 'static) -> Self {
        self.decorators.push(Decorator::new(decoration));
        self
    }

    /// Append a decoration under an explicit tag
    #[must_use = "builder methods return a new value"]
    pub fn tagged_decorator(
        mut self,
        tag: impl Into<String>,
        decoration: impl Decoration + 'static,
    ) -> Self {
        self.decorators.push(Decorator::tagged(tag, decoration));
        self
    }

    /// Set the output sink (default: stdout)
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: impl Sink + 'static) -> Self {
        self.output = Some(Box::new(sink));
        self
    }

    /// Set the error sink (default: stderr)
    #[must_use = "builder methods return a new value"]
    pub fn error_output(mut self, sink: impl Sink + 'static) -> Self {
        self.error_output = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug.enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug_short(mut self, short: bool) -> Self {
        self.debug.short = short;
        self
    }

    /// Enable annotation with the given color and bracket strings
    #[must_use = "builder methods return a new value"]
    pub fn debug_style(
        mut self,
        color: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        self.debug = DebugState {
            enabled: true,
            short: self.debug.short,
            color: color.into(),
            before: before.into(),
            after: after.into(),
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn route_errors(mut self, enabled: bool) -> Self {
        self.route_errors = enabled;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let output = self
            .output
            .unwrap_or_else(|| Box::new(ConsoleSink::stdout()));
        let error = self
            .error_output
            .unwrap_or_else(|| Box::new(ConsoleSink::stderr()));

        let logger = Logger::from_parts(self.name, output, error);
        logger.set_min_level(self.min_level);
        logger.route_errors(self.route_errors);
        *logger.debug.write() = self.debug;
        {
            let mut registry = logger.decorators.write();
            for decorator in self.decorators {
                registry.append(decorator);
            }
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
