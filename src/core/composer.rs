//! Message prefix composition
//!
//! A prefix is the concatenation of every enabled decorator, in registration
//! order, optionally followed by the caller location wrapped as
//! `color + before + location + after + reset`.

use super::caller::{keep_frame, next_depth, CallerLocation};
use super::decorator::DecoratorRegistry;
use super::error::Result;
use super::palette;
use serde::Serialize;
use std::panic::Location;

/// Caller-location annotation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugState {
    pub enabled: bool,
    pub short: bool,
    pub color: String,
    pub before: String,
    pub after: String,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            enabled: false,
            short: false,
            color: palette::fg(colored::Color::Blue),
            before: "[".to_string(),
            after: "] ".to_string(),
        }
    }
}

/// Build the prefix for one physical line.
///
/// `depth` counts frames above the caller of this function, as for
/// [`CallerLocation::resolve`]; `site` is the captured call site of that
/// frame, see [`CallerLocation::resolve_at_site`].
#[inline(never)]
pub fn compose(
    decorators: &DecoratorRegistry,
    debug: &DebugState,
    depth: usize,
    site: Option<&Location<'_>>,
) -> Result<String> {
    let mut prefix = decorators.render();

    if debug.enabled {
        let location = keep_frame(CallerLocation::resolve_at_site(next_depth(depth), site))?;
        prefix.push_str(&debug.color);
        prefix.push_str(&debug.before);
        prefix.push_str(&location.render(debug.short));
        prefix.push_str(&debug.after);
        prefix.push_str(palette::reset());
    }

    Ok(prefix)
}
