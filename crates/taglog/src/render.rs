//! crates/taglog/src/render.rs
//! Positional `{}` template rendering with trailing-cause extraction.

use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::sync::Arc;

/// Error attached to a log record and handed to the sink unchanged.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

const DELIM: &str = "{}";
const ESCAPE: char = '\\';

/// A single argument substituted into a message template.
///
/// Only the last argument of a call is ever treated as a trailing cause, and
/// only when it is an [`Arg::Cause`] that no placeholder consumed.
#[derive(Clone)]
pub enum Arg<'a> {
    /// A displayable value.
    Value(&'a dyn Display),
    /// An error value; substituted by its `Display` text when consumed.
    Cause(Cause),
}

impl<'a> Arg<'a> {
    /// Wraps a displayable value.
    pub fn value<T: Display>(value: &'a T) -> Self {
        Self::Value(value)
    }

    /// Wraps a shared error that may become the record's cause.
    pub fn cause(cause: impl Into<Cause>) -> Self {
        Self::Cause(cause.into())
    }

    /// Wraps an owned error that may become the record's cause.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Cause(Arc::new(error))
    }

    fn as_cause(&self) -> Option<&Cause> {
        match self {
            Self::Cause(cause) => Some(cause),
            Self::Value(_) => None,
        }
    }
}

impl<'a, T: Display> From<&'a T> for Arg<'a> {
    fn from(value: &'a T) -> Self {
        Self::Value(value)
    }
}

impl Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Cause(cause) => cause.fmt(f),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(&value.to_string()).finish(),
            Self::Cause(cause) => f.debug_tuple("Cause").field(cause).finish(),
        }
    }
}

/// Result of rendering a template.
#[derive(Clone, Debug, Default)]
pub struct Rendered {
    /// Template text with arguments substituted.
    pub text: String,
    /// Trailing cause extracted from the argument list, if any.
    pub cause: Option<Cause>,
}

/// Substitutes arguments into a message template.
///
/// Implementations are pure: the same template and arguments always render
/// the same text. Malformed templates are rendered as well as possible rather
/// than rejected.
pub trait Render: Send + Sync {
    /// Renders `template` with `args`.
    fn render(&self, template: &str, args: &[Arg<'_>]) -> Rendered;
}

/// Default renderer for `{}`-style templates.
///
/// Arguments fill successive `{}` placeholders from left to right. A
/// backslash before a placeholder (`\{}`) emits it literally without
/// consuming an argument; a doubled backslash (`\\{}`) emits one backslash
/// and still substitutes. Placeholders left without an argument stay in the
/// output verbatim.
///
/// When the last argument is an [`Arg::Cause`] and the template runs out of
/// placeholders before reaching it, it is returned as the trailing cause.
///
/// ```
/// use std::io;
/// use std::sync::Arc;
/// use taglog::{Arg, PlaceholderRenderer, Render};
///
/// let cause: taglog::Cause = Arc::new(io::Error::other("disk full"));
/// let rendered = PlaceholderRenderer.render(
///     "saving {} failed",
///     &[Arg::value(&"report.txt"), Arg::Cause(cause.clone())],
/// );
/// assert_eq!(rendered.text, "saving report.txt failed");
/// assert!(Arc::ptr_eq(rendered.cause.as_ref().unwrap(), &cause));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderRenderer;

impl Render for PlaceholderRenderer {
    fn render(&self, template: &str, args: &[Arg<'_>]) -> Rendered {
        let trailing = args.last().and_then(Arg::as_cause);

        let mut text = String::with_capacity(template.len() + 16 * args.len());
        let mut rest = template;
        let mut consumed = 0;

        while consumed < args.len() {
            let Some(at) = rest.find(DELIM) else {
                break;
            };

            let before = &rest[..at];
            let after = &rest[at + DELIM.len()..];

            if is_escaped(before) {
                if is_escaped(&before[..before.len() - 1]) {
                    // "\\{}": keep one backslash and substitute.
                    text.push_str(&before[..before.len() - 1]);
                    let _ = write!(text, "{}", args[consumed]);
                    consumed += 1;
                } else {
                    text.push_str(&before[..before.len() - 1]);
                    text.push_str(DELIM);
                }
            } else {
                text.push_str(before);
                let _ = write!(text, "{}", args[consumed]);
                consumed += 1;
            }
            rest = after;
        }
        text.push_str(rest);

        let cause = if consumed < args.len() {
            trailing.cloned()
        } else {
            None
        };
        Rendered { text, cause }
    }
}

fn is_escaped(before: &str) -> bool {
    before.ends_with(ESCAPE)
}
