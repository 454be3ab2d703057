use sea_orm::entity::prelude::*;

/// Append-only record of a granted extension, ordered by approval time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "kontowart_extension_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Entry this record belongs to.
    pub entry_id: i32,
    /// When the extension was approved.
    pub approval_date: DateTime,
    /// The expiry the entry was extended to.
    pub valid_until: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kontowart_entry::Entity",
        from = "Column::EntryId",
        to = "super::kontowart_entry::Column::Id"
    )]
    Entry,
}

impl Related<super::kontowart_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
