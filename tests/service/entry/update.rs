//! Tests for EntryService::update method.
//!
//! Verifies patch merging, ownership checks, patch validation, and missing
//! entry handling.

use kontowart::{
    error::{auth::AuthError, Error},
    model::{
        entry::{EntryPatch, PaymentStatus},
        user::{Actor, Role},
    },
    service::entry::{cache::EntryCache, EntryService},
};
use kontowart_test_utils::prelude::*;
use tokio::sync::broadcast;

/// Tests that patched fields change while omitted fields survive.
///
/// Expected: Ok with the new payment status and the original alias label.
#[tokio::test]
async fn merges_patch_into_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);
    let existing = &test.entries[0];

    let patch = EntryPatch {
        payment_status: Some(PaymentStatus::Unpaid),
        ..Default::default()
    };

    let actor = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let updated = service.update(existing.id, patch, &actor).await.unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Unpaid);
    assert_eq!(updated.alias_notes, existing.alias_notes);
    assert_eq!(updated.owner, existing.owner);

    Ok(())
}

/// Tests nulling the fee and note back out of a populated entry.
///
/// Expected: Ok with both fields cleared to None
#[tokio::test]
async fn clears_nullable_fields_on_explicit_null() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let patch = EntryPatch {
        admin_fee: Some(None),
        note: Some(None),
        ..Default::default()
    };

    let actor = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let updated = service.update(test.entries[0].id, patch, &actor).await.unwrap();

    assert_eq!(updated.admin_fee, None);
    assert_eq!(updated.note, None);

    Ok(())
}

/// Tests that a non-administrator cannot update someone else's entry.
///
/// Expected: Err(Error::Auth), entry unchanged
#[tokio::test]
async fn fails_when_updating_foreign_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let patch = EntryPatch {
        payment_status: Some(PaymentStatus::Unpaid),
        ..Default::default()
    };

    let actor = Actor::new(constant::TEST_OTHER_FRIEND_USERNAME, Role::Friend);
    let result = service.update(test.entries[0].id, patch, &actor).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden { .. }))));

    let stored = service.get(test.entries[0].id).await.unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Paid);

    Ok(())
}

/// Tests that an administrator may update any entry.
///
/// Expected: Ok
#[tokio::test]
async fn admin_updates_any_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let patch = EntryPatch {
        note: Some(Some("verified during audit".to_string())),
        ..Default::default()
    };

    let actor = Actor::new(constant::TEST_ADMIN_USERNAME, Role::Admin);
    let updated = service.update(test.entries[0].id, patch, &actor).await.unwrap();

    assert_eq!(updated.note.as_deref(), Some("verified during audit"));

    Ok(())
}

/// Tests updating an entry id that does not exist.
///
/// Expected: Err(Error::EntryNotFound)
#[tokio::test]
async fn fails_on_missing_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let actor = Actor::new(constant::TEST_ADMIN_USERNAME, Role::Admin);
    let result = service.update(999, EntryPatch::default(), &actor).await;

    assert!(matches!(result, Err(Error::EntryNotFound(999))));

    Ok(())
}

/// Tests that an out-of-range fee in a patch is rejected.
///
/// Expected: Err(Error::Validation)
#[tokio::test]
async fn fails_on_out_of_range_fee() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let patch = EntryPatch {
        admin_fee: Some(Some(-1)),
        ..Default::default()
    };

    let actor = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let result = service.update(test.entries[0].id, patch, &actor).await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}
