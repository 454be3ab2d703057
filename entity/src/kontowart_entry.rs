use sea_orm::entity::prelude::*;

/// A managed subscription entry: credentials, validity, payment, and fee state.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "kontowart_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login name of the managed account.
    pub username: String,
    /// Password of the managed account, stored as given.
    pub password: String,
    /// Free-text display label, required non-empty.
    pub alias_notes: String,
    /// Subscription tier, `"Premium"` or `"Basic"`.
    pub kind: String,
    /// `"Aktiv"` or `"Inaktiv"`.
    pub status: String,
    /// `"Gezahlt"` or `"Nicht gezahlt"`.
    pub payment_status: String,
    /// Username of the user who created and controls the entry.
    pub owner: String,
    /// Set once on insert, immutable afterwards.
    pub created_at: DateTime,
    /// Expiry timestamp, mutable only through explicit update or extension approval.
    pub valid_until: DateTime,
    /// Administrative fee in whole currency units, integer in 0..=999 when present.
    pub admin_fee: Option<i32>,
    pub note: Option<String>,
    /// Extension request state, one of `"none"`, `"pending"`, `"approved"`, `"rejected"`.
    pub extension_state: String,
    /// Timestamp of the most recent approve/reject decision.
    pub extension_decided_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::kontowart_extension_history::Entity")]
    ExtensionHistory,
}

impl Related<super::kontowart_extension_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtensionHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
