use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct ExtensionHistoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ExtensionHistoryRepository<'a, C> {
    /// Creates a new instance of [`ExtensionHistoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a granted extension to an entry's history.
    ///
    /// The history is append-only; no update or delete operation exists on it.
    pub async fn create(
        &self,
        entry_id: i32,
        approval_date: NaiveDateTime,
        valid_until: NaiveDateTime,
    ) -> Result<entity::kontowart_extension_history::Model, DbErr> {
        let record = entity::kontowart_extension_history::ActiveModel {
            entry_id: ActiveValue::Set(entry_id),
            approval_date: ActiveValue::Set(approval_date),
            valid_until: ActiveValue::Set(valid_until),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    /// Gets an entry's extension history ordered by approval time.
    pub async fn get_by_entry_id(
        &self,
        entry_id: i32,
    ) -> Result<Vec<entity::kontowart_extension_history::Model>, DbErr> {
        entity::prelude::KontowartExtensionHistory::find()
            .filter(entity::kontowart_extension_history::Column::EntryId.eq(entry_id))
            .order_by_asc(entity::kontowart_extension_history::Column::ApprovalDate)
            .all(self.db)
            .await
    }
}
