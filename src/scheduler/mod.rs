use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

pub mod config;
pub mod expiry;

use expiry::ExpiryMonitor;

/// Initialize and start the cron job scheduler
pub async fn start_scheduler(monitor: Arc<ExpiryMonitor>) -> Result<(), JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    sched
        .add(Job::new_async(
            config::expiry::CRON_EXPRESSION,
            move |_, _| {
                let monitor = monitor.clone();

                Box::pin(async move {
                    match monitor.sweep().await {
                        Ok(Some(report)) => tracing::debug!(
                            "Scheduled expiry sweep finished ({} corrected)",
                            report.corrected
                        ),
                        Ok(None) => tracing::debug!("Scheduled expiry sweep skipped"),
                        Err(e) => tracing::error!("Error running expiry sweep: {:?}", e),
                    }
                })
            },
        )?)
        .await?;

    sched.start().await?;
    Ok(())
}
