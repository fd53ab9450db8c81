//! crates/taglog-sink/src/line_mode.rs

/// Line terminator a [`WriterSink`](crate::WriterSink) writes after each record.
///
/// A record that carries a cause spans several lines; the terminator is also
/// used between the message, the cause and each `Caused by:` line so a
/// record never mixes line endings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// `\n` after each line.
    #[default]
    Lf,
    /// `\r\n` after each line, for consumers that expect DOS line endings.
    CrLf,
    /// Lines inside a record end with `\n` and nothing follows the record.
    Unterminated,
}

impl LineMode {
    /// Returns the conventional line ending of the host platform.
    ///
    /// ```
    /// use taglog_sink::LineMode;
    ///
    /// let expected = if cfg!(windows) { LineMode::CrLf } else { LineMode::Lf };
    /// assert_eq!(LineMode::native(), expected);
    /// ```
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }

    /// Returns the separator written between lines of one record.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf | Self::Unterminated => "\n",
        }
    }

    /// Returns the terminator written after a record.
    #[must_use]
    pub const fn terminator(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Unterminated => "",
        }
    }
}
