//! Error types for the Kontowart server application.
//!
//! Specialized error types exist per domain (validation, extension
//! eligibility, authorization, configuration), aggregated into a single
//! [`Error`] with `thiserror` `#[from]` conversions. All errors implement
//! `IntoResponse` for Axum HTTP responses; validation failures surface as
//! client errors while infrastructure failures are logged and masked.

pub mod auth;
pub mod config;
pub mod entry;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{
        auth::AuthError,
        config::ConfigError,
        entry::{IneligibleError, ValidationError},
    },
    model::api::ErrorDto,
};

/// Main error type for the Kontowart server application.
#[derive(Error, Debug)]
pub enum Error {
    /// A request was rejected before any persistence call (bad or missing
    /// field, malformed date, out-of-range fee).
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An extension request was raised outside its eligibility window or
    /// while another request is outstanding.
    #[error(transparent)]
    Ineligible(#[from] IneligibleError),
    /// The actor is not allowed to perform the operation.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The operation targeted an entry id that is no longer present.
    #[error("Entry ID {0} not found")]
    EntryNotFound(i32),
    /// Internal error indicating a bug in Kontowart's code.
    #[error("Internal error with Kontowart's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - validation failures
/// - 401/403 - missing credentials / forbidden operations
/// - 404 Not Found - missing entries
/// - 409 Conflict - ineligible extension requests
/// - 500 Internal Server Error - everything else (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => err.into_response(),
            Self::Ineligible(err) => err.into_response(),
            Self::Auth(err) => err.into_response(),
            Self::Config(err) => err.into_response(),
            Self::EntryNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: format!("Entry ID {} not found", id),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal
/// Server Error response.
///
/// Logs the full error message for debugging, but returns a generic message
/// to the client to avoid exposing internal implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
