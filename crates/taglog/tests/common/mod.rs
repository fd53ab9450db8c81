//! Shared test doubles for the taglog integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use taglog::{
    Arg, BacktraceResolver, CallSite, Cause, Level, LoggerConfig, LoggerRegistry, OriginPattern,
    PlaceholderRenderer, Render, Rendered, ResolveCallSite, Sink,
};

/// One captured sink call.
#[derive(Clone, Debug)]
pub struct Dispatch {
    pub code: i32,
    pub tag: String,
    pub message: String,
    pub cause: Option<Cause>,
}

/// Sink recording every call it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<Dispatch>>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<Dispatch> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn single(&self) -> Dispatch {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one dispatch: {calls:?}");
        calls.into_iter().next().expect("one dispatch")
    }
}

impl Sink for RecordingSink {
    fn write(&self, code: i32, tag: &str, message: &str, cause: Option<&Cause>) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Dispatch {
                code,
                tag: tag.to_owned(),
                message: message.to_owned(),
                cause: cause.cloned(),
            });
    }
}

/// Renderer that counts invocations and delegates to the default renderer.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    calls: AtomicUsize,
}

impl CountingRenderer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Render for CountingRenderer {
    fn render(&self, template: &str, args: &[Arg<'_>]) -> Rendered {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PlaceholderRenderer.render(template, args)
    }
}

/// Resolver that counts invocations and delegates to the backtrace resolver.
#[derive(Debug, Default)]
pub struct CountingResolver {
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResolveCallSite for CountingResolver {
    fn resolve(&self, pattern: &OriginPattern) -> CallSite {
        self.calls.fetch_add(1, Ordering::SeqCst);
        BacktraceResolver.resolve(pattern)
    }
}

/// A registry wired to a recording sink and counting collaborators.
pub struct Harness {
    pub registry: LoggerRegistry,
    pub config: Arc<LoggerConfig>,
    pub sink: Arc<RecordingSink>,
    pub renderer: Arc<CountingRenderer>,
    pub resolver: Arc<CountingResolver>,
}

impl Harness {
    pub fn new(threshold: Level, tag: &str) -> Self {
        let config = Arc::new(LoggerConfig::new(threshold, tag));
        let sink = Arc::new(RecordingSink::default());
        let renderer = Arc::new(CountingRenderer::default());
        let resolver = Arc::new(CountingResolver::default());
        let registry = LoggerRegistry::builder(Arc::clone(&sink))
            .config(Arc::clone(&config))
            .renderer(Arc::clone(&renderer))
            .resolver(Arc::clone(&resolver))
            .build();
        Self {
            registry,
            config,
            sink,
            renderer,
            resolver,
        }
    }
}
