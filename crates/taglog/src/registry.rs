//! crates/taglog/src/registry.rs
//! Name-keyed cache guaranteeing one shared logger per name.

use std::any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::call_site::{BacktraceResolver, ResolveCallSite};
use crate::config::LoggerConfig;
use crate::logger::{Backend, Logger};
use crate::render::{PlaceholderRenderer, Render};
use crate::sink::Sink;

/// Hands out one [`Logger`] per name, creating it on first request.
///
/// Lookups of existing names never block one another. Concurrent first
/// requests for the same name construct at most one logger and all callers
/// receive the same `Arc`. Entries live as long as the registry.
///
/// Clones share the same map and configuration.
///
/// ```
/// use std::sync::Arc;
/// use taglog::{LoggerRegistry, NullSink};
///
/// let registry = LoggerRegistry::builder(Arc::new(NullSink)).build();
/// let a = registry.get_logger("app::net");
/// let b = registry.get_logger("app::net");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Clone)]
pub struct LoggerRegistry {
    loggers: Arc<DashMap<String, Arc<Logger>>>,
    backend: Arc<Backend>,
}

impl LoggerRegistry {
    /// Starts building a registry that dispatches to `sink`.
    pub fn builder<S>(sink: Arc<S>) -> RegistryBuilder
    where
        S: Sink + 'static,
    {
        RegistryBuilder {
            config: None,
            sink,
            renderer: Arc::new(PlaceholderRenderer),
            resolver: Arc::new(BacktraceResolver),
        }
    }

    /// Creates a registry with configuration loaded via [`LoggerConfig::load`].
    pub fn new<S>(sink: Arc<S>) -> Self
    where
        S: Sink + 'static,
    {
        Self::builder(sink).build()
    }

    /// Returns the logger for `name`, creating it if this is the first request.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(existing) = self.loggers.get(name) {
            return Arc::clone(existing.value());
        }

        let entry = self
            .loggers
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(Logger::new(name, Arc::clone(&self.backend))));
        Arc::clone(entry.value())
    }

    /// Returns the logger named after the type `T`, without generic arguments.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use taglog::{LoggerRegistry, NullSink};
    ///
    /// struct Server;
    ///
    /// let registry = LoggerRegistry::builder(Arc::new(NullSink)).build();
    /// assert!(registry.logger_for::<Server>().name().ends_with("::Server"));
    /// ```
    pub fn logger_for<T: ?Sized>(&self) -> Arc<Logger> {
        let full = any::type_name::<T>();
        let name = full.split_once('<').map_or(full, |(head, _)| head);
        self.get_logger(name)
    }

    /// Returns the configuration shared by every logger of this registry.
    pub fn config(&self) -> &Arc<LoggerConfig> {
        &self.backend.config
    }

    /// Returns the number of loggers created so far.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Reports whether no logger has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Returns the names of all loggers created so far, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.loggers.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.loggers.len())
            .field("config", &self.backend.config)
            .finish_non_exhaustive()
    }
}

/// Assembles the collaborators of a [`LoggerRegistry`].
pub struct RegistryBuilder {
    config: Option<Arc<LoggerConfig>>,
    sink: Arc<dyn Sink>,
    renderer: Arc<dyn Render>,
    resolver: Arc<dyn ResolveCallSite>,
}

impl RegistryBuilder {
    /// Shares `config` instead of loading one at build time.
    #[must_use]
    pub fn config(mut self, config: Arc<LoggerConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default [`PlaceholderRenderer`].
    #[must_use]
    pub fn renderer<R>(mut self, renderer: Arc<R>) -> Self
    where
        R: Render + 'static,
    {
        self.renderer = renderer;
        self
    }

    /// Replaces the default [`BacktraceResolver`].
    #[must_use]
    pub fn resolver<R>(mut self, resolver: Arc<R>) -> Self
    where
        R: ResolveCallSite + 'static,
    {
        self.resolver = resolver;
        self
    }

    /// Builds the registry, loading configuration if none was supplied.
    pub fn build(self) -> LoggerRegistry {
        let config = self.config.unwrap_or_else(|| Arc::new(LoggerConfig::load()));
        tracing::debug!(
            threshold = %config.threshold(),
            tag = %config.tag(),
            "logger registry created"
        );
        LoggerRegistry {
            loggers: Arc::new(DashMap::new()),
            backend: Arc::new(Backend {
                config,
                sink: self.sink,
                renderer: self.renderer,
                resolver: self.resolver,
            }),
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
