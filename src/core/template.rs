//! Runtime message templates
//!
//! `format!` checks its arguments at compile time. Templates that only exist
//! at runtime (loaded from configuration, built by callers) go through
//! [`format_template`] instead, which reports mismatches as
//! [`LoggerError::Format`].
//!
//! Supported syntax: `{}` takes the next positional argument, `{N}` takes
//! argument `N`, `{{` and `}}` are literal braces. Every argument must be
//! used at least once.

use super::error::{LoggerError, Result};
use std::fmt::{Display, Write};

/// Substitute `args` into `template`.
///
/// ```
/// use rust_decorated_logger::core::template::format_template;
///
/// let text = format_template("{} of {}", &[&3, &"five"]).unwrap();
/// assert_eq!(text, "3 of five");
/// assert!(format_template("{} {}", &[&1]).is_err());
/// ```
pub fn format_template(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; args.len()];
    let mut next = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut index_text = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    index_text.push(c);
                }
                if !closed {
                    return Err(LoggerError::format(
                        template,
                        format!("unclosed '{{' at byte {}", pos),
                    ));
                }

                let index = if index_text.is_empty() {
                    next += 1;
                    next - 1
                } else {
                    index_text.trim().parse::<usize>().map_err(|_| {
                        LoggerError::format(template, format!("invalid placeholder '{{{}}}'", index_text))
                    })?
                };

                let arg = args.get(index).ok_or_else(|| {
                    LoggerError::format(
                        template,
                        format!("missing argument {} ({} supplied)", index, args.len()),
                    )
                })?;
                used[index] = true;
                write!(out, "{}", arg)
                    .map_err(|_| LoggerError::format(template, "argument formatting failed"))?;
            }
            '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(LoggerError::format(
                    template,
                    format!("unmatched '}}' at byte {}", pos),
                ));
            }
            c => out.push(c),
        }
    }

    if let Some(unused) = used.iter().position(|used| !used) {
        return Err(LoggerError::format(
            template,
            format!("argument {} is never used", unused),
        ));
    }

    Ok(out)
}
