//! Tests for ExpiryMonitor::sweep method.
//!
//! Verifies that expired entries get corrected to inactive and unpaid, that
//! corrections flow into the cache and event channel, and that a repeated
//! sweep is a no-op.

use kontowart::{
    model::{
        entry::{EntryStatus, PaymentStatus},
        event::EntryEvent,
    },
    scheduler::expiry::ExpiryMonitor,
    service::entry::cache::EntryCache,
};
use kontowart_test_utils::prelude::*;
use tokio::sync::broadcast;

/// Tests that a sweep corrects an expired entry and leaves a valid one alone.
///
/// Expected: one corrected entry reading inactive and unpaid afterwards
#[tokio::test]
async fn corrects_expired_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::expired_entry(constant::TEST_FRIEND_USERNAME))
        .with_entry(factory::entry(constant::TEST_OTHER_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let monitor = ExpiryMonitor::new(test.db.clone(), cache.clone(), events);

    let report = monitor.sweep().await.unwrap().expect("sweep should run");

    assert_eq!(report.expired, 1);
    assert_eq!(report.corrected, 1);
    assert_eq!(report.failed, 0);

    let corrected = cache.get(test.entries[0].id).expect("corrected entry cached");
    assert_eq!(corrected.status, EntryStatus::Inactive.as_str());
    assert_eq!(corrected.payment_status, PaymentStatus::Unpaid.as_str());
    assert!(cache.get(test.entries[1].id).is_none());

    Ok(())
}

/// Tests that a second sweep finds nothing left to correct.
///
/// Expected: empty report on the repeated run
#[tokio::test]
async fn repeated_sweep_is_noop() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::expired_entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let monitor = ExpiryMonitor::new(test.db.clone(), cache, events);

    let first = monitor.sweep().await.unwrap().expect("sweep should run");
    let second = monitor.sweep().await.unwrap().expect("sweep should run");

    assert_eq!(first.corrected, 1);
    assert_eq!(second.expired, 0);
    assert_eq!(second.corrected, 0);

    Ok(())
}

/// Tests that each correction is published on the event channel.
///
/// Expected: an Updated event per corrected entry
#[tokio::test]
async fn publishes_update_events() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::expired_entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, mut receiver) = broadcast::channel(16);
    let monitor = ExpiryMonitor::new(test.db.clone(), cache, events);

    monitor.sweep().await.unwrap();

    match receiver.try_recv() {
        Ok(EntryEvent::Updated(model)) => {
            assert_eq!(model.id, test.entries[0].id);
            assert_eq!(model.status, EntryStatus::Inactive.as_str());
        }
        other => panic!("Expected an Updated event, got {:?}", other),
    }

    Ok(())
}

/// Tests a sweep over a collection with nothing expired.
///
/// Expected: empty report
#[tokio::test]
async fn reports_nothing_for_valid_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let monitor = ExpiryMonitor::new(test.db.clone(), cache, events);

    let report = monitor.sweep().await.unwrap().expect("sweep should run");

    assert_eq!(report.expired, 0);
    assert_eq!(report.corrected, 0);

    Ok(())
}
