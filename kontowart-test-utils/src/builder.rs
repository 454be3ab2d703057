//! Declarative test builder.
//!
//! Configures a test environment by chaining table and fixture declarations,
//! all of which are executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, ActiveModelTrait, EntityTrait, Schema};

use crate::{error::TestError, setup::TestSetup};

/// Builder for declarative test initialization.
///
/// Chains database table creation and entry fixture insertion, finalized with
/// `build()` to produce a ready [`TestSetup`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_entry_tables: bool,
    entries: Vec<entity::kontowart_entry::ActiveModel>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_entry_tables: false,
            entries: Vec::new(),
        }
    }

    /// Add the entry and extension history tables to the test database.
    pub fn with_entry_tables(mut self) -> Self {
        self.include_entry_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queue an entry fixture for insertion during `build()`.
    ///
    /// Inserted models are available afterwards through [`TestSetup::entries`],
    /// in the order they were queued.
    pub fn with_entry(mut self, entry: entity::kontowart_entry::ActiveModel) -> Self {
        self.entries.push(entry);
        self
    }

    /// Execute all queued operations and return the finished test setup.
    pub async fn build(self) -> Result<TestSetup, TestError> {
        let mut setup = TestSetup::new().await?;

        let mut stmts = Vec::new();

        if self.include_entry_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            stmts.push(schema.create_table_from_entity(entity::prelude::KontowartEntry));
            stmts.push(schema.create_table_from_entity(entity::prelude::KontowartExtensionHistory));
        }

        stmts.extend(self.tables);
        setup.with_tables(stmts).await?;

        for entry in self.entries {
            let model = entry.insert(&setup.db).await?;
            setup.entries.push(model);
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
