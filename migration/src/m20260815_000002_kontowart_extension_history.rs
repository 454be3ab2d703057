use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000001_kontowart_entry::KontowartEntry;

static IDX_EXTENSION_HISTORY_ENTRY_ID: &str = "idx-kontowart_extension_history-entry_id";
static FK_EXTENSION_HISTORY_ENTRY_ID: &str = "fk-kontowart_extension_history-entry_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KontowartExtensionHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(KontowartExtensionHistory::Id))
                    .col(integer(KontowartExtensionHistory::EntryId))
                    .col(timestamp(KontowartExtensionHistory::ApprovalDate))
                    .col(timestamp(KontowartExtensionHistory::ValidUntil))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EXTENSION_HISTORY_ENTRY_ID)
                    .table(KontowartExtensionHistory::Table)
                    .col(KontowartExtensionHistory::EntryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EXTENSION_HISTORY_ENTRY_ID)
                    .from_tbl(KontowartExtensionHistory::Table)
                    .from_col(KontowartExtensionHistory::EntryId)
                    .to_tbl(KontowartEntry::Table)
                    .to_col(KontowartEntry::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EXTENSION_HISTORY_ENTRY_ID)
                    .table(KontowartExtensionHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EXTENSION_HISTORY_ENTRY_ID)
                    .table(KontowartExtensionHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(KontowartExtensionHistory::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KontowartExtensionHistory {
    Table,
    Id,
    EntryId,
    ApprovalDate,
    ValidUntil,
}
