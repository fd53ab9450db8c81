//! crates/taglog/src/global.rs
//! Optional process-wide registry slot.
//!
//! Hosts that prefer a single registry reachable from anywhere install one at
//! startup with [`set_registry`]. The slot can be filled once and is never
//! torn down.

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::logger::Logger;
use crate::registry::LoggerRegistry;

static REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// Error returned when the process-wide registry is already installed.
#[derive(Debug, Error)]
#[error("a global logger registry is already installed")]
pub struct SetRegistryError {
    rejected: LoggerRegistry,
}

impl SetRegistryError {
    /// Returns the registry that could not be installed.
    pub fn into_inner(self) -> LoggerRegistry {
        self.rejected
    }
}

/// Installs `registry` as the process-wide registry.
pub fn set_registry(registry: LoggerRegistry) -> Result<&'static LoggerRegistry, SetRegistryError> {
    let mut installed = false;
    let slot = REGISTRY.get_or_init(|| {
        installed = true;
        registry.clone()
    });
    if !installed {
        return Err(SetRegistryError { rejected: registry });
    }
    tracing::debug!("global logger registry installed");
    Ok(slot)
}

/// Returns the process-wide registry, if one was installed.
pub fn registry() -> Option<&'static LoggerRegistry> {
    REGISTRY.get()
}

/// Returns the logger for `name` from the process-wide registry.
pub fn logger(name: &str) -> Option<Arc<Logger>> {
    registry().map(|registry| registry.get_logger(name))
}
