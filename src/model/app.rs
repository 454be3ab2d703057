use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use crate::{
    config::Config, model::event::EntryEvent, scheduler::expiry::ExpiryMonitor,
    service::entry::cache::EntryCache,
};

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// In-memory mirror of the entry collection.
    pub entries: EntryCache,
    /// Change-notification channel fed by every entry mutation.
    pub events: broadcast::Sender<EntryEvent>,
    /// Expiry sweep, shared so refresh paths and the cron job use one in-flight guard.
    pub monitor: Arc<ExpiryMonitor>,
    pub config: Arc<Config>,
}
