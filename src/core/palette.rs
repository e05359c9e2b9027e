//! Color markers injected into prefixes and message bodies.
//!
//! The logger treats colors as opaque marker strings. These helpers turn a
//! [`colored::Color`] into the ANSI foreground marker the prefix carries, and
//! [`reset`] closes any colored segment. Markers follow `colored`'s colorize
//! control (`NO_COLOR`, `CLICOLOR`, `colored::control::set_override`): when
//! colorizing is off they are empty.

use colored::Color;
use std::str::FromStr;

/// Marker that restores the terminal's default style
pub const RESET: &str = "\x1b[0m";

/// Whether markers are currently emitted
pub fn colors_enabled() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

/// Foreground marker for `color`, empty when colorizing is off
pub fn fg(color: Color) -> String {
    if colors_enabled() {
        ansi_fg(color)
    } else {
        String::new()
    }
}

/// Foreground marker for `color`, regardless of colorize control
pub fn ansi_fg(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// [`RESET`], or empty when colorizing is off
pub fn reset() -> &'static str {
    if colors_enabled() {
        RESET
    } else {
        ""
    }
}

/// `text` wrapped in the foreground marker for `color` and a reset
pub fn paint(color: Color, text: &str) -> String {
    format!("{}{}{}", fg(color), text, reset())
}

/// Parse a color name (`"blue"`, `"bright red"`, ...) into its marker.
///
/// `"reset"` and `"none"` map to [`reset`].
pub fn marker_from_name(name: &str) -> Option<String> {
    match name.trim().to_lowercase().as_str() {
        "reset" | "none" => Some(reset().to_string()),
        other => Color::from_str(other).ok().map(fg),
    }
}
