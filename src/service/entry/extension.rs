//! Extension request workflow.
//!
//! A single-slot state machine per entry: `none -> pending -> approved` or
//! `rejected`, where a decided request behaves like `none` for the next one.
//! Owners raise requests, administrators decide them; approval moves the
//! expiry and appends to the permanent extension history.

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tokio::sync::broadcast;

use crate::{
    data::{
        entry::{EntryPatchRecord, EntryRepository},
        extension_history::ExtensionHistoryRepository,
    },
    error::{
        auth::AuthError,
        entry::{IneligibleError, ValidationError},
        Error,
    },
    model::{
        app::AppState,
        entry::{parse_timestamp, EntryDto, ExtensionRecordDto, ExtensionState},
        event::EntryEvent,
        user::Actor,
    },
    service::entry::{cache::EntryCache, to_dto},
};

/// An entry becomes eligible for an extension request this close to expiry.
/// Entries that are already expired remain eligible.
pub const EXTENSION_WINDOW_DAYS: i64 = 30;

/// Service for the per-entry extension request workflow.
pub struct ExtensionService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a EntryCache,
    events: &'a broadcast::Sender<EntryEvent>,
}

impl<'a> ExtensionService<'a> {
    /// Creates a new instance of [`ExtensionService`]
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a EntryCache,
        events: &'a broadcast::Sender<EntryEvent>,
    ) -> Self {
        Self { db, cache, events }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.db, &state.entries, &state.events)
    }

    fn publish(&self, event: EntryEvent) {
        self.cache.apply(&event);
        let _ = self.events.send(event);
    }

    /// Raises an extension request on an entry.
    ///
    /// Preconditions: the actor owns the entry, no request is currently
    /// pending, and the entry expires within [`EXTENSION_WINDOW_DAYS`] (or
    /// already has). Violations surface as errors rather than being silently
    /// dropped, so callers can distinguish an accepted request from a
    /// refused one.
    pub async fn request(&self, id: i32, actor: &Actor) -> Result<EntryDto, Error> {
        let repo = EntryRepository::new(self.db);

        let entry = repo.get_by_id(id).await?.ok_or(Error::EntryNotFound(id))?;

        if entry.owner != actor.username {
            return Err(AuthError::forbidden(
                &actor.username,
                format!("request an extension for entry ID {}", id),
            )
            .into());
        }

        let state = ExtensionState::parse(&entry.extension_state)
            .map_err(|e| Error::InternalError(e.to_string()))?;
        if state == ExtensionState::Pending {
            return Err(IneligibleError::AlreadyPending(id).into());
        }

        let now = Utc::now().naive_utc();
        if entry.valid_until - now > Duration::days(EXTENSION_WINDOW_DAYS) {
            return Err(IneligibleError::OutsideWindow(id, EXTENSION_WINDOW_DAYS).into());
        }

        let updated = repo
            .update(
                id,
                EntryPatchRecord {
                    extension_state: Some(ExtensionState::Pending),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(Error::EntryNotFound(id))?;

        tracing::info!("Extension requested for entry ID {} by {}", id, actor.username);

        let dto = to_dto(updated.clone())?;
        self.publish(EntryEvent::Updated(updated));

        Ok(dto)
    }

    /// Approves a pending request, extending the entry to `new_valid_until`.
    ///
    /// Administrator-only. The new expiry must parse and lie strictly in the
    /// future at approval time; otherwise the entry is left untouched. The
    /// state transition and the history record are written in one
    /// transaction, so an approved entry always carries its matching history
    /// row.
    pub async fn approve(
        &self,
        id: i32,
        new_valid_until: &str,
        actor: &Actor,
    ) -> Result<EntryDto, Error> {
        if !actor.is_admin() {
            return Err(AuthError::forbidden(&actor.username, "approve extensions").into());
        }

        let new_valid_until = parse_timestamp("valid_until", new_valid_until)?;

        let now = Utc::now().naive_utc();
        if new_valid_until <= now {
            return Err(ValidationError::ExpiryNotInFuture(new_valid_until).into());
        }

        let entry = self.get_pending(id).await?;

        let txn = self.db.begin().await?;

        let updated = self
            .decide(
                &txn,
                entry.id,
                ExtensionState::Approved,
                Some(new_valid_until),
                now,
            )
            .await?;

        ExtensionHistoryRepository::new(&txn)
            .create(id, now, new_valid_until)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Extension for entry ID {} approved until {} by {}",
            id,
            new_valid_until,
            actor.username
        );

        let dto = to_dto(updated.clone())?;
        self.publish(EntryEvent::Updated(updated));

        Ok(dto)
    }

    /// Rejects a pending request.
    ///
    /// Administrator-only. No history record is written; the entry keeps its
    /// current expiry and may raise a fresh request later.
    pub async fn reject(&self, id: i32, actor: &Actor) -> Result<EntryDto, Error> {
        if !actor.is_admin() {
            return Err(AuthError::forbidden(&actor.username, "reject extensions").into());
        }

        let entry = self.get_pending(id).await?;
        let now = Utc::now().naive_utc();

        let updated = self
            .decide(self.db, entry.id, ExtensionState::Rejected, None, now)
            .await?;

        tracing::info!("Extension for entry ID {} rejected by {}", id, actor.username);

        let dto = to_dto(updated.clone())?;
        self.publish(EntryEvent::Updated(updated));

        Ok(dto)
    }

    /// Gets the ordered extension history of an entry.
    ///
    /// Visible to administrators and the entry's owner only, like every
    /// other read of owner-scoped data.
    pub async fn history(&self, id: i32, actor: &Actor) -> Result<Vec<ExtensionRecordDto>, Error> {
        let repo = EntryRepository::new(self.db);
        let entry = repo.get_by_id(id).await?.ok_or(Error::EntryNotFound(id))?;

        if !actor.is_admin() && entry.owner != actor.username {
            return Err(AuthError::forbidden(
                &actor.username,
                format!("view the extension history of entry ID {}", id),
            )
            .into());
        }

        let history_repo = ExtensionHistoryRepository::new(self.db);
        let records = history_repo.get_by_entry_id(id).await?;

        Ok(records.into_iter().map(ExtensionRecordDto::from).collect())
    }

    /// Fetches an entry and checks it carries a pending request.
    async fn get_pending(&self, id: i32) -> Result<entity::kontowart_entry::Model, Error> {
        let repo = EntryRepository::new(self.db);

        let entry = repo.get_by_id(id).await?.ok_or(Error::EntryNotFound(id))?;

        let state = ExtensionState::parse(&entry.extension_state)
            .map_err(|e| Error::InternalError(e.to_string()))?;
        if state != ExtensionState::Pending {
            return Err(IneligibleError::NoPendingRequest(id).into());
        }

        Ok(entry)
    }

    async fn decide<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
        state: ExtensionState,
        new_valid_until: Option<NaiveDateTime>,
        decided_at: NaiveDateTime,
    ) -> Result<entity::kontowart_entry::Model, Error> {
        let repo = EntryRepository::new(db);

        repo.update(
            id,
            EntryPatchRecord {
                valid_until: new_valid_until,
                extension_state: Some(state),
                extension_decided_at: Some(decided_at),
                ..Default::default()
            },
        )
        .await?
        .ok_or(Error::EntryNotFound(id))
    }
}
