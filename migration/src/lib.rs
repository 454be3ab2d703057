pub use sea_orm_migration::prelude::*;

mod m20260815_000001_kontowart_entry;
mod m20260815_000002_kontowart_extension_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_kontowart_entry::Migration),
            Box::new(m20260815_000002_kontowart_extension_history::Migration),
        ]
    }
}
