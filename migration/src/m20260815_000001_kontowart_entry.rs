use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KontowartEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(KontowartEntry::Id))
                    .col(string(KontowartEntry::Username))
                    .col(string(KontowartEntry::Password))
                    .col(string(KontowartEntry::AliasNotes))
                    .col(string(KontowartEntry::Kind))
                    .col(string(KontowartEntry::Status))
                    .col(string(KontowartEntry::PaymentStatus))
                    .col(string(KontowartEntry::Owner))
                    .col(timestamp(KontowartEntry::CreatedAt))
                    .col(timestamp(KontowartEntry::ValidUntil))
                    .col(integer_null(KontowartEntry::AdminFee))
                    .col(string_null(KontowartEntry::Note))
                    .col(string(KontowartEntry::ExtensionState))
                    .col(timestamp_null(KontowartEntry::ExtensionDecidedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KontowartEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum KontowartEntry {
    Table,
    Id,
    Username,
    Password,
    AliasNotes,
    Kind,
    Status,
    PaymentStatus,
    Owner,
    CreatedAt,
    ValidUntil,
    AdminFee,
    Note,
    ExtensionState,
    ExtensionDecidedAt,
}
