//! Tests for ExtensionService::reject method.
//!
//! Verifies the administrator requirement and that rejection leaves the
//! expiry and history untouched.

use kontowart::{
    error::{auth::AuthError, entry::IneligibleError, Error},
    model::{
        entry::ExtensionState,
        user::{Actor, Role},
    },
    service::entry::{cache::EntryCache, extension::ExtensionService},
};
use kontowart_test_utils::prelude::*;
use tokio::sync::broadcast;

fn admin() -> Actor {
    Actor::new(constant::TEST_ADMIN_USERNAME, Role::Admin)
}

/// Tests rejecting a pending request.
///
/// Expected: Ok with rejected state, unchanged expiry, and no history record
#[tokio::test]
async fn rejects_pending_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry_with_pending_request(
            constant::TEST_FRIEND_USERNAME,
        ))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = ExtensionService::new(&test.db, &cache, &events);
    let id = test.entries[0].id;

    let entry = service.reject(id, &admin()).await.unwrap();

    assert_eq!(entry.extension_state, ExtensionState::Rejected);
    assert!(entry.extension_decided_at.is_some());
    assert_eq!(entry.valid_until, test.entries[0].valid_until);
    assert!(service.history(id, &admin()).await.unwrap().is_empty());

    Ok(())
}

/// Tests that only administrators may reject.
///
/// Expected: Err(Error::Auth)
#[tokio::test]
async fn fails_for_non_admin() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry_with_pending_request(
            constant::TEST_FRIEND_USERNAME,
        ))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = ExtensionService::new(&test.db, &cache, &events);

    let owner = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let result = service.reject(test.entries[0].id, &owner).await;

    assert!(matches!(result, Err(Error::Auth(AuthError::Forbidden { .. }))));

    Ok(())
}

/// Tests rejecting an entry without a pending request.
///
/// Expected: Err(Error::Ineligible(NoPendingRequest))
#[tokio::test]
async fn fails_without_pending_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry(constant::TEST_FRIEND_USERNAME))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = ExtensionService::new(&test.db, &cache, &events);

    let result = service.reject(test.entries[0].id, &admin()).await;

    assert!(matches!(
        result,
        Err(Error::Ineligible(IneligibleError::NoPendingRequest(_)))
    ));

    Ok(())
}

/// Tests that a fresh request may follow a rejection.
///
/// Expected: Ok with the state back to pending
#[tokio::test]
async fn allows_new_request_after_rejection() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_entry_tables()
        .with_entry(factory::entry_with_pending_request(
            constant::TEST_FRIEND_USERNAME,
        ))
        .build()
        .await?;
    let cache = EntryCache::new();
    let (events, _) = broadcast::channel(16);
    let service = ExtensionService::new(&test.db, &cache, &events);
    let id = test.entries[0].id;

    service.reject(id, &admin()).await.unwrap();

    let owner = Actor::new(constant::TEST_FRIEND_USERNAME, Role::Friend);
    let entry = service.request(id, &owner).await.unwrap();

    assert_eq!(entry.extension_state, ExtensionState::Pending);

    Ok(())
}
