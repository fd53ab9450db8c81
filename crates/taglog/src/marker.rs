//! crates/taglog/src/marker.rs

use std::fmt;

/// Named label that callers may attach to a log call.
///
/// Markers are accepted for API compatibility and have no effect on gating
/// or output.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Marker {
    name: String,
}

impl Marker {
    /// Creates a marker.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the marker's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
