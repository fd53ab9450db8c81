//! Integration tests for forwarding `tracing` events into taglog loggers.

mod common;

use common::Harness;
use taglog::{Level, TaglogLayer};
use tracing_subscriber::layer::SubscriberExt;

fn with_bridge(harness: &Harness, f: impl FnOnce()) {
    let subscriber =
        tracing_subscriber::registry().with(TaglogLayer::new(harness.registry.clone()));
    tracing::subscriber::with_default(subscriber, f);
}

/// Verifies an event reaches the logger named after its target.
#[test]
fn event_is_forwarded_to_target_logger() {
    let harness = Harness::new(Level::Info, "Bridge");

    with_bridge(&harness, || {
        tracing::info!("hello {}", "bridge");
    });

    let dispatch = harness.sink.single();
    assert_eq!(dispatch.code, Level::Info.native_code());
    assert_eq!(dispatch.tag, "Bridge");
    assert!(dispatch.message.starts_with("hello bridge ["), "{}", dispatch.message);
    assert!(
        dispatch.message.contains("[tracing_bridge:event_is_forwarded_to_target_logger:"),
        "{}",
        dispatch.message
    );
    assert_eq!(harness.registry.names(), vec!["tracing_bridge".to_owned()]);
}

/// Verifies events below the threshold are dropped before any work.
#[test]
fn events_below_threshold_are_dropped() {
    let harness = Harness::new(Level::Warn, "Bridge");

    with_bridge(&harness, || {
        tracing::debug!("hidden");
        tracing::info!("hidden");
        tracing::error!(target: "app::db", "visible");
    });

    let dispatch = harness.sink.single();
    assert_eq!(dispatch.code, Level::Error.native_code());
    assert!(dispatch.message.starts_with("visible ["));
    assert_eq!(harness.resolver.calls(), 1);
    assert_eq!(harness.registry.names(), vec!["app::db".to_owned()]);
}

/// Verifies threshold changes take effect for already registered callsites.
#[test]
fn threshold_changes_apply_to_registered_callsites() {
    let harness = Harness::new(Level::Error, "Bridge");

    with_bridge(&harness, || {
        for _ in 0..2 {
            tracing::info!("toggled");
            harness.config.set_threshold(Level::Info);
        }
    });

    assert_eq!(harness.sink.calls().len(), 1);
}

/// Verifies structured fields are appended to the message.
#[test]
fn fields_are_appended() {
    let harness = Harness::new(Level::Trace, "Bridge");

    with_bridge(&harness, || {
        tracing::warn!(attempt = 2, host = "db1", "retrying");
    });

    let dispatch = harness.sink.single();
    assert!(
        dispatch.message.starts_with("retrying attempt=2 host=db1 ["),
        "{}",
        dispatch.message
    );
}
