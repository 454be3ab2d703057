use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    config::Config,
    error::Error,
    model::app::AppState,
    scheduler::expiry::ExpiryMonitor,
    service::entry::cache::EntryCache,
};

/// Capacity of the change-notification channel. A lagging subscriber misses
/// events and should rebuild from a fresh snapshot.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Assembles shared state: the entry mirror, its event channel, and the
/// expiry monitor wired to both.
pub fn build_app_state(db: sea_orm::DatabaseConnection, config: Config) -> AppState {
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let entries = EntryCache::new();
    let monitor = Arc::new(ExpiryMonitor::new(
        db.clone(),
        entries.clone(),
        events.clone(),
    ));

    AppState {
        db,
        entries,
        events,
        monitor,
        config: Arc::new(config),
    }
}

/// Subscribes to the change feed and folds every event into the mirror.
///
/// Mutation paths already apply their own events before sending, so this
/// exists for events published elsewhere in the process. Application is
/// idempotent, double-applying is harmless.
pub fn start_entry_feed(state: &AppState) {
    let cache = state.entries.clone();
    let mut receiver = state.events.subscribe();

    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => cache.apply(&event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!("Entry feed lagged, missed {} event(s)", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Loads the initial entry snapshot into the mirror.
pub async fn warm_entry_cache(state: &AppState) -> Result<(), Error> {
    use crate::data::EntryRepository;

    let repo = EntryRepository::new(&state.db);
    let entries = repo.get_all().await?;

    tracing::info!("Loaded {} entries into the in-memory mirror", entries.len());
    state.entries.replace_all(entries);

    Ok(())
}
