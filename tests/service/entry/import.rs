//! Tests for EntryService::import method.
//!
//! Verifies batch creation order and the fail-fast behavior on the first
//! invalid record.

use chrono::{Duration, Utc};
use kontowart::{
    error::Error,
    model::{
        entry::{EntryDraft, EntryKind},
        secret::Secret,
        user::{Actor, Role},
    },
    service::entry::{cache::EntryCache, EntryService},
};
use kontowart_test_utils::prelude::*;
use tokio::sync::broadcast;

fn draft(alias: &str) -> EntryDraft {
    let valid_until = (Utc::now().naive_utc() + Duration::days(45))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();

    EntryDraft {
        username: format!("{}@example.com", alias),
        password: Secret::new("hunter2"),
        alias_notes: alias.to_string(),
        kind: EntryKind::Basic,
        status: None,
        payment_status: None,
        owner: None,
        created_at: None,
        valid_until,
        admin_fee: Some(10),
        note: None,
    }
}

/// Tests importing a batch of valid drafts.
///
/// Expected: Ok with entries in draft order
#[tokio::test]
async fn imports_drafts_in_order() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let actor = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let imported = service
        .import(vec![draft("first"), draft("second")], &actor)
        .await
        .unwrap();

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].alias_notes, "first");
    assert_eq!(imported[1].alias_notes, "second");
    assert_eq!(cache.len(), 2);

    Ok(())
}

/// Tests that the first invalid draft aborts the batch.
///
/// Records before the failure are kept; records after it are never created.
///
/// Expected: Err(Error::Validation), one entry persisted
#[tokio::test]
async fn stops_at_first_invalid_draft() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut invalid = draft("second");
    invalid.username = String::new();

    let actor = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let result = service
        .import(vec![draft("first"), invalid, draft("third")], &actor)
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    let persisted = service.refresh().await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].alias_notes, "first");

    Ok(())
}
