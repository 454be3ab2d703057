//! Entry collection services.
//!
//! This module owns the authoritative entry collection: all mutations pass
//! through [`EntryService`], which validates before touching persistence,
//! merges the persisted row (not the request payload) back into the
//! in-memory mirror, and publishes a change event for subscribers. Reads are
//! served from the mirror; an explicit [`EntryService::refresh`] re-fetches
//! from storage.

pub mod cache;
pub mod extension;
pub mod query;
pub mod tracker;

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use crate::{
    data::entry::{EntryPatchRecord, EntryRepository, NewEntryRecord},
    error::{auth::AuthError, entry::ValidationError, Error},
    model::{
        app::AppState,
        entry::{parse_timestamp, EntryDraft, EntryDto, EntryPatch, EntryStatus, PaymentStatus},
        event::EntryEvent,
        user::Actor,
    },
    service::{fee, retry::RetryContext},
};

/// Converts a stored row into a DTO, treating unconvertible rows as an
/// internal error: the service only ever writes known labels.
pub(crate) fn to_dto(model: entity::kontowart_entry::Model) -> Result<EntryDto, Error> {
    let id = model.id;

    EntryDto::from_model(model)
        .map_err(|e| Error::InternalError(format!("Stored entry ID {} failed conversion: {}", id, e)))
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Service for managing the entry collection.
pub struct EntryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a cache::EntryCache,
    events: &'a broadcast::Sender<EntryEvent>,
}

impl<'a> EntryService<'a> {
    /// Creates a new instance of [`EntryService`]
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a cache::EntryCache,
        events: &'a broadcast::Sender<EntryEvent>,
    ) -> Self {
        Self { db, cache, events }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.db, &state.entries, &state.events)
    }

    /// Applies a change to the mirror and notifies subscribers.
    ///
    /// A send error only means nobody is listening right now; the mirror has
    /// already been updated, so it is safe to ignore.
    fn publish(&self, event: EntryEvent) {
        self.cache.apply(&event);
        let _ = self.events.send(event);
    }

    /// Returns the current in-memory snapshot without touching storage.
    pub fn list(&self) -> Result<Vec<EntryDto>, Error> {
        self.cache.snapshot().into_iter().map(to_dto).collect()
    }

    /// Re-fetches the collection from storage and rebuilds the mirror.
    pub async fn refresh(&self) -> Result<Vec<EntryDto>, Error> {
        let mut ctx = RetryContext::new();

        let db = self.db.clone();

        let entries = ctx
            .execute_with_retry("refresh entry collection", move || {
                let db = db.clone();

                Box::pin(async move {
                    let repo = EntryRepository::new(&db);

                    Ok(repo.get_all().await?)
                })
            })
            .await?;

        self.cache.replace_all(entries.clone());

        entries.into_iter().map(to_dto).collect()
    }

    /// Retrieves a single entry from storage.
    pub async fn get(&self, id: i32) -> Result<EntryDto, Error> {
        let repo = EntryRepository::new(self.db);

        match repo.get_by_id(id).await? {
            Some(entry) => to_dto(entry),
            None => Err(Error::EntryNotFound(id)),
        }
    }

    /// Creates an entry from a draft.
    ///
    /// Required fields must be non-empty and `valid_until` parseable; the
    /// admin fee is computed from the creation date and expiry when not
    /// supplied, and validated against its bounds either way. Only
    /// administrators may create entries for another owner or backdate the
    /// creation timestamp (the manual path for pre-existing subscribers).
    pub async fn create(&self, draft: EntryDraft, actor: &Actor) -> Result<EntryDto, Error> {
        require_non_empty("username", &draft.username)?;
        require_non_empty("alias_notes", &draft.alias_notes)?;
        if draft.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let owner = match draft.owner {
            Some(owner) if owner != actor.username && !actor.is_admin() => {
                return Err(
                    AuthError::forbidden(&actor.username, "create entries for other users").into(),
                );
            }
            Some(owner) => owner,
            None => actor.username.clone(),
        };

        let created_at = match draft.created_at {
            Some(ref raw) => {
                if !actor.is_admin() {
                    return Err(
                        AuthError::forbidden(&actor.username, "backdate entry creation").into(),
                    );
                }
                parse_timestamp("created_at", raw)?
            }
            None => chrono::Utc::now().naive_utc(),
        };

        let valid_until = parse_timestamp("valid_until", &draft.valid_until)?;

        let admin_fee = draft
            .admin_fee
            .unwrap_or_else(|| fee::compute_fee(created_at, valid_until));
        fee::validate_fee(admin_fee)?;

        let record = NewEntryRecord {
            username: draft.username.trim().to_string(),
            password: draft.password.expose().to_string(),
            alias_notes: draft.alias_notes.trim().to_string(),
            kind: draft.kind,
            status: draft.status.unwrap_or(EntryStatus::Active),
            payment_status: draft.payment_status.unwrap_or(PaymentStatus::Unpaid),
            owner,
            created_at,
            valid_until,
            admin_fee: Some(admin_fee),
            note: draft.note,
        };

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let created = ctx
            .execute_with_retry("create entry", move || {
                let db = db.clone();
                let record = record.clone();

                Box::pin(async move {
                    let repo = EntryRepository::new(&db);

                    Ok(repo.create(record).await?)
                })
            })
            .await?;

        let dto = to_dto(created.clone())?;
        self.publish(EntryEvent::Inserted(created));

        Ok(dto)
    }

    /// Merges a patch into an existing entry.
    ///
    /// Non-administrators may only update their own entries. The nullable
    /// fields distinguish an absent field (kept as is) from an explicit null
    /// (cleared).
    pub async fn update(&self, id: i32, patch: EntryPatch, actor: &Actor) -> Result<EntryDto, Error> {
        let repo = EntryRepository::new(self.db);

        let existing = repo.get_by_id(id).await?.ok_or(Error::EntryNotFound(id))?;

        if !actor.is_admin() && existing.owner != actor.username {
            return Err(
                AuthError::forbidden(&actor.username, format!("update entry ID {}", id)).into(),
            );
        }

        if let Some(ref username) = patch.username {
            require_non_empty("username", username)?;
        }
        if let Some(ref password) = patch.password {
            if password.is_empty() {
                return Err(ValidationError::MissingField("password").into());
            }
        }
        if let Some(ref alias_notes) = patch.alias_notes {
            require_non_empty("alias_notes", alias_notes)?;
        }

        let valid_until = match patch.valid_until {
            Some(ref raw) => Some(parse_timestamp("valid_until", raw)?),
            None => None,
        };

        if let Some(Some(admin_fee)) = patch.admin_fee {
            fee::validate_fee(admin_fee)?;
        }

        let record = EntryPatchRecord {
            username: patch.username.map(|v| v.trim().to_string()),
            password: patch.password.map(|v| v.expose().to_string()),
            alias_notes: patch.alias_notes.map(|v| v.trim().to_string()),
            kind: patch.kind,
            status: patch.status,
            payment_status: patch.payment_status,
            valid_until,
            admin_fee: patch.admin_fee,
            note: patch.note,
            ..Default::default()
        };

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let updated = ctx
            .execute_with_retry(&format!("update entry ID {}", id), move || {
                let db = db.clone();
                let record = record.clone();

                Box::pin(async move {
                    let repo = EntryRepository::new(&db);

                    repo.update(id, record)
                        .await?
                        .ok_or(Error::EntryNotFound(id))
                })
            })
            .await?;

        let dto = to_dto(updated.clone())?;
        self.publish(EntryEvent::Updated(updated));

        Ok(dto)
    }

    /// Deletes an entry.
    ///
    /// Deletion is irreversible, so callers must pass `confirmed = true`; the
    /// flag corresponds to the destructive-action confirmation in the client.
    /// Non-administrators may only delete their own entries.
    pub async fn delete(&self, id: i32, actor: &Actor, confirmed: bool) -> Result<(), Error> {
        if !confirmed {
            return Err(ValidationError::DeleteNotConfirmed.into());
        }

        let repo = EntryRepository::new(self.db);

        let existing = repo.get_by_id(id).await?.ok_or(Error::EntryNotFound(id))?;

        if !actor.is_admin() && existing.owner != actor.username {
            return Err(
                AuthError::forbidden(&actor.username, format!("delete entry ID {}", id)).into(),
            );
        }

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        let result = ctx
            .execute_with_retry(&format!("delete entry ID {}", id), move || {
                let db = db.clone();

                Box::pin(async move {
                    let repo = EntryRepository::new(&db);

                    Ok(repo.delete(id).await?)
                })
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::EntryNotFound(id));
        }

        self.publish(EntryEvent::Deleted(id));

        Ok(())
    }

    /// Inserts a bulk list of entries, applying the same per-record rules as
    /// [`EntryService::create`].
    ///
    /// Fails on the first invalid record; records before it have already been
    /// persisted, which the caller can see from the returned error position
    /// being absent from the collection.
    pub async fn import(&self, drafts: Vec<EntryDraft>, actor: &Actor) -> Result<Vec<EntryDto>, Error> {
        let mut imported = Vec::with_capacity(drafts.len());

        for draft in drafts {
            imported.push(self.create(draft, actor).await?);
        }

        Ok(imported)
    }
}
