use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::model::event::EntryEvent;

/// In-memory mirror of the entry collection.
///
/// The mirror is fed two ways: a full rebuild on explicit refresh, and
/// incremental [`EntryEvent`]s after each mutation. Event application is an
/// idempotent upsert or removal keyed by id, so replaying a duplicate event
/// or receiving an insert after the refresh already contained the row leaves
/// the mirror unchanged.
#[derive(Clone, Default)]
pub struct EntryCache {
    inner: Arc<RwLock<HashMap<i32, entity::kontowart_entry::Model>>>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole mirror with a freshly fetched collection.
    pub fn replace_all(&self, entries: Vec<entity::kontowart_entry::Model>) {
        let mut inner = self.write();

        inner.clear();
        inner.extend(entries.into_iter().map(|entry| (entry.id, entry)));
    }

    /// Applies a change event to the mirror.
    pub fn apply(&self, event: &EntryEvent) {
        let mut inner = self.write();

        match event {
            EntryEvent::Inserted(model) | EntryEvent::Updated(model) => {
                inner.insert(model.id, model.clone());
            }
            EntryEvent::Deleted(id) => {
                inner.remove(id);
            }
        }
    }

    pub fn get(&self, id: i32) -> Option<entity::kontowart_entry::Model> {
        self.read().get(&id).cloned()
    }

    /// Current contents ordered by id.
    pub fn snapshot(&self) -> Vec<entity::kontowart_entry::Model> {
        let inner = self.read();

        let mut entries: Vec<_> = inner.values().cloned().collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<i32, entity::kontowart_entry::Model>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<i32, entity::kontowart_entry::Model>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
