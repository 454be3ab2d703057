//! Highlighting of recently created entries.
//!
//! Two independent windows apply. Every viewer sees an entry highlighted for
//! a few days after creation. Administrators additionally get a short-lived
//! attention marker that clears once they have looked at the entry.

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::{Duration, NaiveDateTime};

use crate::model::{entry::EntryDto, user::Actor};

/// How long an entry counts as new for every viewer.
pub const NEW_FOR_EVERYONE_DAYS: i64 = 5;

/// How long an unseen entry demands administrator attention.
pub const ADMIN_ATTENTION_HOURS: i64 = 72;

/// Records which entries an administrator has already looked at.
pub trait SeenStore: Send + Sync {
    fn contains(&self, entry_id: i32) -> bool;

    fn insert(&self, entry_id: i32);
}

/// Process-local [`SeenStore`]. Markers reset on restart, which is acceptable
/// since the attention window itself is only a few days long.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    seen: RwLock<HashSet<i32>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenStore for MemorySeenStore {
    fn contains(&self, entry_id: i32) -> bool {
        self.seen
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&entry_id)
    }

    fn insert(&self, entry_id: i32) {
        self.seen
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(entry_id);
    }
}

/// Decides the "new" markers for an entry relative to a viewer and a clock.
pub struct NewEntryTracker<S> {
    seen: S,
}

impl<S: SeenStore> NewEntryTracker<S> {
    pub fn new(seen: S) -> Self {
        Self { seen }
    }

    /// Whether the entry is within the window everyone sees as new.
    pub fn is_new_for_everyone(&self, entry: &EntryDto, now: NaiveDateTime) -> bool {
        within_window(entry.created_at, now, Duration::days(NEW_FOR_EVERYONE_DAYS))
    }

    /// Whether the entry demands the viewer's attention as an administrator.
    ///
    /// Only administrators get this marker, and only while the entry is both
    /// inside the attention window and not yet marked as seen.
    pub fn is_new_for_admin(&self, entry: &EntryDto, viewer: &Actor, now: NaiveDateTime) -> bool {
        viewer.is_admin()
            && within_window(
                entry.created_at,
                now,
                Duration::hours(ADMIN_ATTENTION_HOURS),
            )
            && !self.seen.contains(entry.id)
    }

    /// Clears the administrator attention marker for an entry.
    pub fn mark_seen(&self, entry_id: i32) {
        self.seen.insert(entry_id);
    }
}

fn within_window(created_at: NaiveDateTime, now: NaiveDateTime, window: Duration) -> bool {
    let age = now - created_at;

    age >= Duration::zero() && age <= window
}
