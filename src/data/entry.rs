use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::entry::{EntryKind, EntryStatus, ExtensionState, PaymentStatus};

/// Validated field set for inserting a new entry.
#[derive(Clone, Debug)]
pub struct NewEntryRecord {
    pub username: String,
    pub password: String,
    pub alias_notes: String,
    pub kind: EntryKind,
    pub status: EntryStatus,
    pub payment_status: PaymentStatus,
    pub owner: String,
    pub created_at: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub admin_fee: Option<i32>,
    pub note: Option<String>,
}

/// Validated partial update; `None` fields are left untouched.
///
/// The nullable columns use a nested option so that "leave as is" (outer
/// `None`) and "clear to null" (`Some(None)`) stay distinguishable. `owner`
/// and `created_at` are deliberately absent, they are immutable after
/// insertion.
#[derive(Clone, Debug, Default)]
pub struct EntryPatchRecord {
    pub username: Option<String>,
    pub password: Option<String>,
    pub alias_notes: Option<String>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub valid_until: Option<NaiveDateTime>,
    pub admin_fee: Option<Option<i32>>,
    pub note: Option<Option<String>>,
    pub extension_state: Option<ExtensionState>,
    pub extension_decided_at: Option<NaiveDateTime>,
}

pub struct EntryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntryRepository<'a, C> {
    /// Creates a new instance of [`EntryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new entry and returns the persisted row with its
    /// server-assigned id.
    pub async fn create(
        &self,
        record: NewEntryRecord,
    ) -> Result<entity::kontowart_entry::Model, DbErr> {
        let entry = entity::kontowart_entry::ActiveModel {
            username: ActiveValue::Set(record.username),
            password: ActiveValue::Set(record.password),
            alias_notes: ActiveValue::Set(record.alias_notes),
            kind: ActiveValue::Set(record.kind.as_str().to_string()),
            status: ActiveValue::Set(record.status.as_str().to_string()),
            payment_status: ActiveValue::Set(record.payment_status.as_str().to_string()),
            owner: ActiveValue::Set(record.owner),
            created_at: ActiveValue::Set(record.created_at),
            valid_until: ActiveValue::Set(record.valid_until),
            admin_fee: ActiveValue::Set(record.admin_fee),
            note: ActiveValue::Set(record.note),
            extension_state: ActiveValue::Set(ExtensionState::None.as_str().to_string()),
            extension_decided_at: ActiveValue::Set(None),
            ..Default::default()
        };

        entry.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::kontowart_entry::Model>, DbErr> {
        entity::prelude::KontowartEntry::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Fetches the whole collection ordered by id.
    pub async fn get_all(&self) -> Result<Vec<entity::kontowart_entry::Model>, DbErr> {
        entity::prelude::KontowartEntry::find()
            .order_by_asc(entity::kontowart_entry::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<entity::kontowart_entry::Model>, DbErr> {
        entity::prelude::KontowartEntry::find()
            .filter(entity::kontowart_entry::Column::Owner.eq(owner))
            .order_by_asc(entity::kontowart_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Fetches entries whose validity has run out but which do not yet read
    /// inactive and unpaid.
    ///
    /// Already-corrected rows are excluded, which is what makes the expiry
    /// sweep a no-op on its second run.
    pub async fn get_expired_uncorrected(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::kontowart_entry::Model>, DbErr> {
        entity::prelude::KontowartEntry::find()
            .filter(entity::kontowart_entry::Column::ValidUntil.lt(now))
            .filter(
                Condition::any()
                    .add(
                        entity::kontowart_entry::Column::Status
                            .ne(EntryStatus::Inactive.as_str()),
                    )
                    .add(
                        entity::kontowart_entry::Column::PaymentStatus
                            .ne(PaymentStatus::Unpaid.as_str()),
                    ),
            )
            .order_by_asc(entity::kontowart_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Merges a patch into the stored row.
    ///
    /// Returns `Ok(None)` when no entry with the given id exists.
    pub async fn update(
        &self,
        id: i32,
        patch: EntryPatchRecord,
    ) -> Result<Option<entity::kontowart_entry::Model>, DbErr> {
        let entry = match self.get_by_id(id).await? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let mut entry = entry.into_active_model();

        if let Some(username) = patch.username {
            entry.username = ActiveValue::Set(username);
        }
        if let Some(password) = patch.password {
            entry.password = ActiveValue::Set(password);
        }
        if let Some(alias_notes) = patch.alias_notes {
            entry.alias_notes = ActiveValue::Set(alias_notes);
        }
        if let Some(kind) = patch.kind {
            entry.kind = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(status) = patch.status {
            entry.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(payment_status) = patch.payment_status {
            entry.payment_status = ActiveValue::Set(payment_status.as_str().to_string());
        }
        if let Some(valid_until) = patch.valid_until {
            entry.valid_until = ActiveValue::Set(valid_until);
        }
        if let Some(admin_fee) = patch.admin_fee {
            entry.admin_fee = ActiveValue::Set(admin_fee);
        }
        if let Some(note) = patch.note {
            entry.note = ActiveValue::Set(note);
        }
        if let Some(extension_state) = patch.extension_state {
            entry.extension_state = ActiveValue::Set(extension_state.as_str().to_string());
        }
        if let Some(decided_at) = patch.extension_decided_at {
            entry.extension_decided_at = ActiveValue::Set(Some(decided_at));
        }

        let updated = entry.update(self.db).await?;

        Ok(Some(updated))
    }

    /// Deletes an entry
    ///
    /// Returns OK regardless of the entry existing, to confirm the deletion
    /// result check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::KontowartEntry::delete_by_id(id)
            .exec(self.db)
            .await
    }
}
