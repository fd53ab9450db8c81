//! crates/taglog/src/call_site.rs
//! Attribution of a log call to the first stack frame outside the facade.
//!
//! # Design
//!
//! Every [`Logger`](crate::Logger) compiles an [`OriginPattern`] from its name
//! when it is constructed. On an enabled log call the resolver walks a stack
//! snapshot from the innermost frame outwards and returns the first frame whose
//! origin satisfies the pattern. The facade's own frames sit at the top of that
//! snapshot; they never match a caller's name, so taking the first match skips
//! them.
//!
//! A frame symbol such as `app::net::Connection::send::{{closure}}` is
//! normalised before matching: hash suffixes, generic arguments and
//! `<Type as Trait>` qualification are removed and trailing closure segments
//! are dropped. The last remaining segment is the operation (`send`) and the
//! rest is the origin (`app::net::Connection`).
//!
//! Stable Rust offers no frame-by-frame stack walking, so [`BacktraceResolver`]
//! captures a [`std::backtrace::Backtrace`] and parses its rendered frames.
//! Capturing is the expensive part of an enabled call; other strategies can be
//! plugged in through [`ResolveCallSite`].

use std::backtrace::Backtrace;
use std::fmt;

use regex::Regex;

const PATH_SEP: &str = "::";

/// Origin, operation and line of the code that issued a log call.
///
/// The unknown call site has empty origin and operation and line 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallSite {
    origin: String,
    operation: String,
    line: u32,
}

impl CallSite {
    /// Creates a call site from an origin short name, operation and line.
    pub fn new(origin: impl Into<String>, operation: impl Into<String>, line: u32) -> Self {
        Self {
            origin: origin.into(),
            operation: operation.into(),
            line,
        }
    }

    /// Returns the sentinel used when no frame matches.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            origin: String::new(),
            operation: String::new(),
            line: 0,
        }
    }

    /// Reports whether this is the sentinel.
    pub fn is_unknown(&self) -> bool {
        self.origin.is_empty() && self.operation.is_empty() && self.line == 0
    }

    /// Returns the origin short name (the last path segment).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the operation (function) name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the 1-based source line, or 0 when unknown.
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.origin, self.operation, self.line)
    }
}

/// Compiled matcher for the origins attributed to one logger name.
///
/// Matches the name itself, or the name followed by `::` and any trailing
/// text, so items nested inside the named scope are attributed to it.
///
/// ```
/// use taglog::OriginPattern;
///
/// let pattern = OriginPattern::new("com::example::Foo");
/// assert!(pattern.matches("com::example::Foo"));
/// assert!(pattern.matches("com::example::Foo::Inner"));
/// assert!(!pattern.matches("com::example::FooBar"));
/// ```
#[derive(Clone, Debug)]
pub struct OriginPattern {
    name: String,
    // None only when the name exceeds the regex size limit.
    regex: Option<Regex>,
}

impl OriginPattern {
    /// Compiles the pattern for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let source = format!("^{}(?:{PATH_SEP}.*)?$", regex::escape(&name));
        let regex = Regex::new(&source).ok();
        Self { name, regex }
    }

    /// Returns the logger name the pattern was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether `origin` belongs to this pattern's scope.
    pub fn matches(&self, origin: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(origin),
            None => origin
                .strip_prefix(self.name.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(PATH_SEP)),
        }
    }
}

/// One frame of a stack snapshot: a symbol path and its source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    symbol: String,
    line: u32,
}

impl Frame {
    /// Creates a frame. A line of 0 means the line is unknown.
    pub fn new(symbol: impl Into<String>, line: u32) -> Self {
        Self {
            symbol: symbol.into(),
            line,
        }
    }

    /// Returns the raw symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the source line, or 0 when unknown.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Splits the normalised symbol into `(origin, operation)`.
    ///
    /// Returns `None` for symbols without a scope, such as `main` or
    /// `<unknown>`.
    pub fn origin_and_operation(&self) -> Option<(String, String)> {
        let path = normalize_symbol(&self.symbol);
        let mut segments: Vec<&str> = path.split(PATH_SEP).filter(|s| !s.is_empty()).collect();
        while segments.last().is_some_and(|s| s.starts_with('{')) {
            segments.pop();
        }

        let operation = segments.pop()?;
        if segments.is_empty() {
            return None;
        }
        Some((segments.join(PATH_SEP), operation.to_owned()))
    }
}

/// Returns the first frame, innermost first, whose origin matches `pattern`.
///
/// Never fails: when no frame matches, [`CallSite::unknown`] is returned.
pub fn find_call_site<I>(pattern: &OriginPattern, frames: I) -> CallSite
where
    I: IntoIterator<Item = Frame>,
{
    frames
        .into_iter()
        .find_map(|frame| {
            let (origin, operation) = frame.origin_and_operation()?;
            pattern
                .matches(&origin)
                .then(|| CallSite::new(short_name(&origin), operation, frame.line))
        })
        .unwrap_or_else(CallSite::unknown)
}

/// Returns the last segment of a `::`-separated path.
///
/// ```
/// assert_eq!(taglog::short_name("com::example::Foo"), "Foo");
/// assert_eq!(taglog::short_name("Foo"), "Foo");
/// ```
pub fn short_name(path: &str) -> &str {
    path.rsplit(PATH_SEP).next().unwrap_or(path)
}

/// Resolves the call site of the log call currently in progress.
pub trait ResolveCallSite: Send + Sync {
    /// Resolves the innermost frame matching `pattern`.
    fn resolve(&self, pattern: &OriginPattern) -> CallSite;
}

/// Default resolver backed by [`std::backtrace::Backtrace`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktraceResolver;

impl ResolveCallSite for BacktraceResolver {
    fn resolve(&self, pattern: &OriginPattern) -> CallSite {
        let rendered = Backtrace::force_capture().to_string();
        find_call_site(pattern, parse_backtrace(&rendered))
    }
}

/// Parses the `Display` rendering of a [`Backtrace`] into frames.
///
/// Symbol lines look like `  12: path::to::function` (or carry no index for
/// inlined symbols) and may be followed by `at file:line:column`. Anything
/// else, including `disabled backtrace`, parses into frames that never match.
pub fn parse_backtrace(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for raw in rendered.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.line == 0 {
                    frame.line = parse_line_number(location);
                }
            }
            continue;
        }

        let symbol = strip_frame_index(line);
        if !symbol.is_empty() {
            frames.push(Frame::new(symbol, 0));
        }
    }
    frames
}

fn strip_frame_index(line: &str) -> &str {
    match line.split_once(": ") {
        Some((index, symbol)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            symbol.trim()
        }
        _ => line,
    }
}

/// Extracts the line from `file:line` or `file:line:column`.
fn parse_line_number(location: &str) -> u32 {
    let mut parts = location.rsplit(':');
    let last = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    let previous = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
    match (previous, last) {
        (Some(line), Some(_column)) => line,
        (None, Some(line)) => line,
        _ => 0,
    }
}

/// Reduces a demangled symbol to a plain `::`-separated path.
fn normalize_symbol(symbol: &str) -> String {
    let mut path = strip_hash(symbol.trim()).to_owned();
    while path.starts_with('<') {
        match unqualify(&path) {
            Some(unqualified) => path = unqualified,
            None => break,
        }
    }
    strip_generics(&path)
}

/// Drops a trailing `::h0123456789abcdef` disambiguator.
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once(PATH_SEP) {
        Some((head, hash))
            if hash.len() == 17
                && hash.starts_with('h')
                && hash[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => symbol,
    }
}

/// Rewrites `<Type as Trait>::rest` and `<Type>::rest` as `Type::rest`.
fn unqualify(path: &str) -> Option<String> {
    let close = matching_angle(path)?;
    let inner = &path[1..close];
    let tail = &path[close + 1..];
    let self_type = split_top_level_as(inner).unwrap_or(inner);
    Some(format!("{self_type}{tail}"))
}

/// Index of the `>` closing the `<` at the start of `path`.
fn matching_angle(path: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in path.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the self type of `Type as Trait` when ` as ` occurs outside generics.
fn split_top_level_as(inner: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 && inner[idx..].starts_with(" as ") => return Some(&inner[..idx]),
            _ => {}
        }
    }
    None
}

fn strip_generics(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for ch in path.chars() {
        match ch {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}
