//! Tests for EntryService::create method.
//!
//! Verifies draft validation, default status and payment values, admin fee
//! computation, and the administrator-only owner and backdate paths.

use chrono::{Duration, Utc};
use kontowart::{
    error::{auth::AuthError, entry::ValidationError, Error},
    model::{
        entry::{EntryDraft, EntryKind, EntryStatus, PaymentStatus},
        event::EntryEvent,
        secret::Secret,
        user::{Actor, Role},
    },
    service::entry::{cache::EntryCache, EntryService},
};
use kontowart_test_utils::prelude::*;
use tokio::sync::broadcast;

fn draft(valid_until: &str) -> EntryDraft {
    EntryDraft {
        username: "user@example.com".to_string(),
        password: Secret::new("hunter2"),
        alias_notes: "Netflix".to_string(),
        kind: EntryKind::Premium,
        status: None,
        payment_status: None,
        owner: None,
        created_at: None,
        valid_until: valid_until.to_string(),
        admin_fee: None,
        note: None,
    }
}

fn friend() -> Actor {
    Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend)
}

fn admin() -> Actor {
    Actor::new(constant::TEST_ADMIN_USERNAME, Role::Admin)
}

fn in_days(days: i64) -> String {
    (Utc::now().naive_utc() + Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Tests creating an entry from a minimal draft.
///
/// Expected: Ok with default status, default payment status, the actor as
/// owner, and a computed admin fee.
#[tokio::test]
async fn creates_entry_with_defaults() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let entry = service.create(draft(&in_days(45)), &friend()).await.unwrap();

    assert_eq!(entry.status, EntryStatus::Active);
    assert_eq!(entry.payment_status, PaymentStatus::Unpaid);
    assert_eq!(entry.owner, constant::TEST_FRIEND_USERNAME);
    assert!(entry.admin_fee.is_some());

    Ok(())
}

/// Tests that a creation is visible through the cache and the event channel.
///
/// Expected: Inserted event received and cache populated with the new entry.
#[tokio::test]
async fn publishes_insert_event() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, mut receiver) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let entry = service.create(draft(&in_days(45)), &friend()).await.unwrap();

    assert!(cache.get(entry.id).is_some());
    match receiver.try_recv() {
        Ok(EntryEvent::Inserted(model)) => assert_eq!(model.id, entry.id),
        other => panic!("Expected an Inserted event, got {:?}", other),
    }

    Ok(())
}

/// Tests that a supplied admin fee takes precedence over computation.
///
/// Expected: Ok with the supplied fee stored unchanged.
#[tokio::test]
async fn keeps_supplied_admin_fee() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft(&in_days(45));
    draft.admin_fee = Some(25);

    let entry = service.create(draft, &friend()).await.unwrap();

    assert_eq!(entry.admin_fee, Some(25));

    Ok(())
}

/// Tests the fee computation on the administrator backdate path.
///
/// Creation on January 5th counts a 10 unit partial month, then full months
/// until the March 1st expiry.
///
/// Expected: Ok with a fee of 30.
#[tokio::test]
async fn computes_fee_for_backdated_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft("2024-03-01");
    draft.created_at = Some("2024-01-05".to_string());

    let entry = service.create(draft, &admin()).await.unwrap();

    assert_eq!(entry.admin_fee, Some(30));

    Ok(())
}

/// Tests that a non-administrator cannot backdate the creation timestamp.
///
/// Expected: Err(Error::Auth)
#[tokio::test]
async fn fails_when_non_admin_backdates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft(&in_days(45));
    draft.created_at = Some("2024-01-05".to_string());

    let result = service.create(draft, &friend()).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden { .. }))));

    Ok(())
}

/// Tests that a non-administrator cannot create entries for another owner.
///
/// Expected: Err(Error::Auth)
#[tokio::test]
async fn fails_when_non_admin_sets_foreign_owner() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft(&in_days(45));
    draft.owner = Some(constant::TEST_OTHER_FRIEND_USERNAME.to_string());

    let result = service.create(draft, &friend()).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden { .. }))));

    Ok(())
}

/// Tests that a blank username is rejected before persistence.
///
/// Expected: Err(Error::Validation)
#[tokio::test]
async fn fails_on_blank_username() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft(&in_days(45));
    draft.username = "   ".to_string();

    let result = service.create(draft, &friend()).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(cache.is_empty());

    Ok(())
}

/// Tests that an out-of-range admin fee is rejected.
///
/// Expected: Err(Error::Validation(ValidationError::FeeOutOfRange))
#[tokio::test]
async fn fails_on_out_of_range_fee() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let mut draft = draft(&in_days(45));
    draft.admin_fee = Some(1000);

    let result = service.create(draft, &friend()).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::FeeOutOfRange(1000)))
    ));

    Ok(())
}

/// Tests that a malformed expiry timestamp is rejected.
///
/// Expected: Err(Error::Validation(ValidationError::InvalidTimestamp))
#[tokio::test]
async fn fails_on_malformed_expiry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = EntryService::new(&test.db, &cache, &events);

    let result = service.create(draft("next tuesday"), &friend()).await;

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidTimestamp { .. }))
    ));

    Ok(())
}
