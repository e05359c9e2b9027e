//! Caller location resolution
//!
//! Walks the current call stack and reports the frame `depth` levels above
//! the point where [`CallerLocation::resolve`] was invoked. Every internal
//! function that forwards a logging call adds exactly one to `depth`, so the
//! reported location is the external call site rather than a logger helper.
//!
//! Inlined functions are reported by the symbolizer as separate logical
//! frames and are counted like any other frame.

use super::error::{LoggerError, Result};
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Suffix of the demangled symbol the walk anchors on
const ANCHOR: &str = "CallerLocation::walk";

/// Depth to forward from one internal hop to the next. Saturates, so an
/// absurd depth stays absurd and fails the resolver's bound check.
#[inline]
pub(crate) fn next_depth(depth: usize) -> usize {
    depth.saturating_add(1)
}

/// Pass a forwarded result through an opaque barrier.
///
/// A forwarding call in tail position may be compiled as a jump, which
/// removes the forwarding frame from the stack and shifts every depth by
/// one. Using the result after the call rules that out.
#[inline(always)]
pub(crate) fn keep_frame<T>(value: T) -> T {
    std::hint::black_box(value)
}

/// Whether a demangled symbol is the walk itself. Optimizer clones keep a
/// `.suffix`; closures inside the walk (`walk::{{closure}}`) are not it.
fn is_anchor_symbol(name: &str) -> bool {
    name.match_indices(ANCHOR).any(|(pos, _)| {
        matches!(name[pos + ANCHOR.len()..].chars().next(), None | Some('.') | Some(' '))
    })
}

/// A resolved call-stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    container: String,
    function: String,
    file: Option<PathBuf>,
    line: Option<u32>,
    native: bool,
}

impl CallerLocation {
    pub fn new(
        container: impl Into<String>,
        function: impl Into<String>,
        file: Option<PathBuf>,
        line: Option<u32>,
        native: bool,
    ) -> Self {
        Self {
            container: container.into(),
            function: function.into(),
            file,
            line,
            native,
        }
    }

    /// Location reported when symbols are unavailable
    pub fn unknown() -> Self {
        Self::new("<unknown>", "<unknown>", None, None, false)
    }

    /// Resolve the frame `depth` levels above the caller of this function.
    ///
    /// `resolve(0)` describes the function that called `resolve`.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidDepth`] if the stack has fewer than `depth + 1`
    /// frames above this call.
    #[inline(never)]
    pub fn resolve(depth: usize) -> Result<Self> {
        keep_frame(Self::walk(depth, None))
    }

    /// Like [`resolve`](Self::resolve), with the source position of the
    /// target frame already known.
    ///
    /// `site` is the location captured by `#[track_caller]` at the call the
    /// target frame made. It is authoritative for file and line, which the
    /// optimizer can blur in debug info. When debug info places the walked
    /// frame in a different file, the walk landed on the wrong frame and its
    /// names are reported as unknown.
    #[inline(never)]
    pub fn resolve_at_site(depth: usize, site: Option<&Location<'_>>) -> Result<Self> {
        keep_frame(Self::walk(depth, site))
    }

    /// Stack walk shared by the public resolvers. Logical frame
    /// `anchor + 1` is the public resolver, `anchor + 2` its caller.
    #[inline(never)]
    fn walk(depth: usize, site: Option<&Location<'_>>) -> Result<Self> {
        let mut raw = Vec::new();
        backtrace::trace(|frame| {
            raw.push(frame.clone());
            true
        });

        let mut anchor: Option<usize> = None;
        let mut logical: Vec<Self> = Vec::new();

        for frame in &raw {
            let before = logical.len();
            backtrace::resolve_frame(frame, |symbol| {
                let (location, is_anchor) = Self::from_symbol(symbol);
                if anchor.is_none() && is_anchor {
                    anchor = Some(logical.len());
                }
                logical.push(location);
            });
            if logical.len() == before {
                logical.push(Self::unresolved());
            }

            if let Some(anchor) = anchor {
                if logical.len() > anchor.saturating_add(2).saturating_add(depth) {
                    break;
                }
            }
        }

        let Some(anchor) = anchor else {
            let unknown = Self::unknown();
            return Ok(match site {
                Some(site) => unknown.at_site(site),
                None => unknown,
            });
        };

        let available = logical.len().saturating_sub(anchor + 2);
        let located = (anchor + 2)
            .checked_add(depth)
            .and_then(|target| logical.into_iter().nth(target))
            .ok_or_else(|| LoggerError::invalid_depth(depth, available))?;

        Ok(match site {
            Some(site) => located.at_site(site),
            None => located,
        })
    }

    /// Take file and line from a `#[track_caller]` site
    fn at_site(mut self, site: &Location<'_>) -> Self {
        let site_file = Path::new(site.file());
        let other_file = self
            .file
            .as_deref()
            .is_some_and(|file| !(file.ends_with(site_file) || site_file.ends_with(file)));
        if other_file {
            self.container = "<unknown>".to_string();
            self.function = "<unknown>".to_string();
        }
        self.file = Some(site_file.to_path_buf());
        self.line = Some(site.line());
        self.native = false;
        self
    }

    /// Build a location from a symbol, flagging the resolver's own frame
    fn from_symbol(symbol: &backtrace::Symbol) -> (Self, bool) {
        let file = symbol.filename().map(Path::to_path_buf);
        let line = symbol.lineno();

        let Some(name) = symbol.name() else {
            return (Self::new("<unknown>", "<unknown>", file, line, false), false);
        };
        let name = format!("{:#}", name);
        let is_anchor = is_anchor_symbol(&name);
        let native = file.is_none() && line.is_none() && !name.contains("::");
        let (container, function) = split_symbol(&name);

        (Self::new(container, function, file, line, native), is_anchor)
    }

    fn unresolved() -> Self {
        Self::new("<unknown>", "<unknown>", None, None, true)
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn is_native(&self) -> bool {
        self.native
    }

    /// `container::function`, or just the function for top-level symbols
    pub fn qualified_name(&self) -> String {
        if self.container.is_empty() {
            self.function.clone()
        } else {
            format!("{}::{}", self.container, self.function)
        }
    }

    /// Last segment of the container path
    pub fn short_container(&self) -> &str {
        last_segment(&self.container)
    }

    /// Short form when `short` is set, full form otherwise
    pub fn render(&self, short: bool) -> String {
        if short {
            self.to_short_string()
        } else {
            self.to_string()
        }
    }

    /// `Container.function(file.rs:42)` with the file reduced to its name
    pub fn to_short_string(&self) -> String {
        let file_name = self
            .file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned());

        let head = if self.container.is_empty() {
            self.function.clone()
        } else {
            format!("{}.{}", self.short_container(), self.function)
        };
        format!("{}{}", head, self.source_suffix(file_name.as_deref()))
    }

    fn source_suffix(&self, file: Option<&str>) -> String {
        if self.native {
            return "(Native Method)".to_string();
        }
        match (file, self.line) {
            (Some(file), Some(line)) => format!("({}:{})", file, line),
            (Some(file), None) => format!("({})", file),
            (None, _) => "(Unknown Source)".to_string(),
        }
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .file
            .as_deref()
            .map(|path| path.display().to_string());
        write!(
            f,
            "{}{}",
            self.qualified_name(),
            self.source_suffix(file.as_deref())
        )
    }
}

/// Split a demangled symbol into `(container, function)` at the last
/// top-level `::`, ignoring separators nested in `<...>`. Trailing closure
/// segments are dropped so a closure reports its enclosing function.
fn split_symbol(name: &str) -> (String, String) {
    let mut name = name;
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }

    match last_separator(name) {
        Some(pos) => (name[..pos].to_string(), name[pos + 2..].to_string()),
        None => (String::new(), name.to_string()),
    }
}

fn last_segment(path: &str) -> &str {
    match last_separator(path) {
        Some(pos) => &path[pos + 2..],
        None => path,
    }
}

fn last_separator(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    let mut nesting = 0usize;
    let mut found = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => nesting += 1,
            b'>' => nesting = nesting.saturating_sub(1),
            b':' if nesting == 0 && bytes.get(i + 1) == Some(&b':') => {
                found = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[inline(never)]
    fn resolve_here() -> CallerLocation {
        CallerLocation::resolve(0).expect("depth 0 always resolves")
    }

    #[inline(never)]
    fn resolve_through(hops: usize, depth: usize) -> CallerLocation {
        if hops == 0 {
            CallerLocation::resolve(depth).expect("frame exists")
        } else {
            black_box(resolve_through(hops - 1, depth + 1))
        }
    }

    #[inline(never)]
    fn origin(hops: usize) -> CallerLocation {
        black_box(resolve_through(hops, 1))
    }

    #[track_caller]
    #[inline(never)]
    fn locate_caller() -> CallerLocation {
        let site = Location::caller();
        CallerLocation::resolve_at_site(1, Some(site)).expect("caller frame exists")
    }

    #[inline(never)]
    fn site_caller() -> (CallerLocation, u32) {
        let line = line!() + 1;
        let location = locate_caller();
        (black_box(location), line)
    }

    #[test]
    fn test_depth_zero_reports_direct_caller() {
        let location = resolve_here();
        assert_eq!(location.function(), "resolve_here");
        assert!(location.container().ends_with("caller::tests"));
        assert_eq!(location.short_container(), "tests");
        assert!(location
            .file()
            .is_some_and(|file| file.ends_with("caller.rs")));
        assert!(location.line().is_some());
        assert!(!location.is_native());
    }

    #[test]
    fn test_wrapper_hops_resolve_same_site() {
        let direct = origin(0);
        assert_eq!(direct.function(), "origin");
        for hops in 1..4 {
            assert_eq!(origin(hops), direct, "hops = {}", hops);
        }
    }

    #[test]
    fn test_depth_beyond_stack_fails() {
        let err = CallerLocation::resolve(1_000_000).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::InvalidDepth {
                requested: 1_000_000,
                ..
            }
        ));
    }

    #[test]
    fn test_depth_at_usize_max_fails() {
        let err = CallerLocation::resolve(usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::InvalidDepth {
                requested: usize::MAX,
                ..
            }
        ));
        assert!(CallerLocation::resolve_at_site(usize::MAX, None).is_err());
    }

    #[test]
    fn test_site_supplies_file_and_line() {
        let (location, line) = site_caller();
        assert_eq!(location.function(), "site_caller");
        assert_eq!(location.line(), Some(line));
        assert!(location
            .file()
            .is_some_and(|file| file.ends_with("src/core/caller.rs")));
    }

    #[test]
    fn test_site_in_other_file_drops_names() {
        let location = CallerLocation::new(
            "app",
            "start",
            Some(PathBuf::from("/work/app/src/main.rs")),
            Some(3),
            false,
        );
        let site = Location::caller();

        let moved = location.at_site(site);
        assert_eq!(moved.function(), "<unknown>");
        assert_eq!(moved.line(), Some(site.line()));

        let same = CallerLocation::new(
            "app",
            "start",
            Some(PathBuf::from("/work").join(site.file())),
            Some(1),
            false,
        )
        .at_site(site);
        assert_eq!(same.function(), "start");
        assert_eq!(same.line(), Some(site.line()));
    }

    #[test]
    fn test_anchor_symbol_matching() {
        assert!(is_anchor_symbol("my_crate::core::caller::CallerLocation::walk"));
        assert!(is_anchor_symbol("my_crate::core::caller::CallerLocation::walk.constprop.0"));
        assert!(!is_anchor_symbol("my_crate::core::caller::CallerLocation::walk::{{closure}}"));
        assert!(!is_anchor_symbol("my_crate::core::caller::CallerLocation::walker"));
    }

    #[test]
    fn test_short_form_variants() {
        let with_line = CallerLocation::new(
            "app::App",
            "start",
            Some(PathBuf::from("src/app/App.src")),
            Some(42),
            false,
        );
        assert_eq!(with_line.to_short_string(), "App.start(App.src:42)");
        assert_eq!(with_line.to_string(), "app::App::start(src/app/App.src:42)");

        let file_only =
            CallerLocation::new("app::App", "start", Some(PathBuf::from("App.src")), None, false);
        assert_eq!(file_only.to_short_string(), "App.start(App.src)");

        let unknown = CallerLocation::new("app::App", "start", None, Some(42), false);
        assert_eq!(unknown.to_short_string(), "App.start(Unknown Source)");

        let native = CallerLocation::new("", "clone", None, None, true);
        assert_eq!(native.to_short_string(), "clone(Native Method)");
    }

    #[test]
    fn test_split_symbol() {
        assert_eq!(
            split_symbol("my_crate::server::Server::start"),
            ("my_crate::server::Server".to_string(), "start".to_string())
        );
        assert_eq!(
            split_symbol("my_crate::run::{{closure}}::{{closure}}"),
            ("my_crate".to_string(), "run".to_string())
        );
        assert_eq!(
            split_symbol("<alloc::vec::Vec<T> as core::ops::drop::Drop>::drop"),
            (
                "<alloc::vec::Vec<T> as core::ops::drop::Drop>".to_string(),
                "drop".to_string()
            )
        );
        assert_eq!(split_symbol("main"), (String::new(), "main".to_string()));
    }
}
