use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient infrastructure failure)
    Retry,
    /// Failed permanently (bad request or programming error)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => {
                match db_err {
                    // Connection acquisition errors - transient, should retry
                    DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                    // Connection errors - transient, should retry
                    DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                    // All other database errors are permanent failures:
                    // constraint violations, type conversion errors, schema
                    // errors, record not found. These indicate bugs or data
                    // issues that won't resolve with retry.
                    _ => ErrorRetryStrategy::Fail,
                }
            }

            // Requests rejected before persistence - permanent by definition
            Self::Validation(_) => ErrorRetryStrategy::Fail,
            Self::Ineligible(_) => ErrorRetryStrategy::Fail,
            Self::Auth(_) => ErrorRetryStrategy::Fail,
            Self::EntryNotFound(_) => ErrorRetryStrategy::Fail,

            // Configuration errors - won't resolve with retry
            Self::Config(_) => ErrorRetryStrategy::Fail,

            // Job scheduler errors - configuration issue
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,

            // Internal errors indicate a bug in Kontowart's code
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
