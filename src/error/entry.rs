use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// A request was rejected before any persistence call was made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for field {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
    #[error("Could not parse {field} as a timestamp: {value:?}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
    },
    #[error("Admin fee {0} is outside the allowed range 0..=999")]
    FeeOutOfRange(i32),
    #[error("The new expiry {0} is not in the future")]
    ExpiryNotInFuture(chrono::NaiveDateTime),
    #[error("Deleting an entry requires explicit confirmation")]
    DeleteNotConfirmed,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// An extension request was raised outside its eligibility conditions.
///
/// The original workflow silently ignored these; they are surfaced so callers
/// can tell an accepted request from a refused one.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IneligibleError {
    #[error("Entry ID {0} already has a pending extension request")]
    AlreadyPending(i32),
    #[error("Entry ID {0} is not within {1} days of expiry")]
    OutsideWindow(i32, i64),
    #[error("Entry ID {0} has no pending extension request to decide")]
    NoPendingRequest(i32),
}

impl IntoResponse for IneligibleError {
    fn into_response(self) -> Response {
        (
            StatusCode::CONFLICT,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
