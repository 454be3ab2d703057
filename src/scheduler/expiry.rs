//! Background correction of expired entries.
//!
//! An entry whose validity has run out must read inactive and unpaid. The
//! sweep finds rows violating that rule and corrects them in place, feeding
//! each correction through the same cache-and-event pipeline as manual edits.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use crate::{
    data::{entry::EntryPatchRecord, EntryRepository},
    error::Error,
    model::{
        entry::{EntryStatus, PaymentStatus},
        event::EntryEvent,
    },
    service::entry::cache::EntryCache,
};

/// Outcome of one expiry sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Expired entries found in need of correction.
    pub expired: usize,
    /// Entries actually corrected this run.
    pub corrected: usize,
    /// Entries whose correction failed and was skipped.
    pub failed: usize,
}

/// Sweeps expired entries into the inactive, unpaid state.
///
/// One monitor instance is shared by the cron schedule and the listing
/// refresh path so that at most one sweep runs at a time.
pub struct ExpiryMonitor {
    db: DatabaseConnection,
    cache: EntryCache,
    events: broadcast::Sender<EntryEvent>,
    in_flight: AtomicBool,
}

impl ExpiryMonitor {
    pub fn new(
        db: DatabaseConnection,
        cache: EntryCache,
        events: broadcast::Sender<EntryEvent>,
    ) -> Self {
        Self {
            db,
            cache,
            events,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one sweep, unless another sweep is already in flight.
    ///
    /// Returns `Ok(None)` when skipped. A failure on one entry is logged and
    /// counted but does not stop the rest of the sweep.
    pub async fn sweep(&self) -> Result<Option<SweepReport>, Error> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Expiry sweep already in flight, skipping");
            return Ok(None);
        }

        let result = self.run().await;

        self.in_flight.store(false, Ordering::Release);

        result.map(Some)
    }

    async fn run(&self) -> Result<SweepReport, Error> {
        let repo = EntryRepository::new(&self.db);
        let now = Utc::now().naive_utc();

        let expired = repo.get_expired_uncorrected(now).await?;
        let mut report = SweepReport {
            expired: expired.len(),
            ..Default::default()
        };

        for entry in expired {
            let patch = EntryPatchRecord {
                status: Some(EntryStatus::Inactive),
                payment_status: Some(PaymentStatus::Unpaid),
                ..Default::default()
            };

            match repo.update(entry.id, patch).await {
                Ok(Some(updated)) => {
                    self.cache.apply(&EntryEvent::Updated(updated.clone()));
                    let _ = self.events.send(EntryEvent::Updated(updated));

                    report.corrected += 1;
                }
                // Deleted concurrently, nothing left to correct.
                Ok(None) => {}
                Err(error) => {
                    tracing::error!("Failed to correct expired entry {}: {:?}", entry.id, error);

                    report.failed += 1;
                }
            }
        }

        if report.expired > 0 {
            tracing::info!(
                "Expiry sweep corrected {} of {} expired entries ({} failed)",
                report.corrected,
                report.expired,
                report.failed
            );
        }

        Ok(report)
    }
}
