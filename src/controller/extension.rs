use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::auth::AuthenticatedActor,
    error::Error,
    model::{
        api::{ApproveExtensionDto, ErrorDto},
        app::AppState,
        entry::{EntryDto, ExtensionRecordDto},
    },
    service::entry::extension::ExtensionService,
};

pub static EXTENSION_TAG: &str = "extension";

/// Request an extension for an entry
///
/// Owner-only, and only within the eligibility window shortly before expiry.
/// Raising a request while another is pending is a conflict.
#[utoipa::path(
    post,
    path = "/api/entries/{id}/extension/request",
    tag = EXTENSION_TAG,
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Extension requested", body = EntryDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 409, description = "Request pending or outside window", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_extension(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = ExtensionService::from_state(&state);

    let entry = service.request(id, &actor).await?;

    Ok((StatusCode::OK, Json(entry)).into_response())
}

/// Approve a pending extension request
///
/// Administrator-only. The new expiry must be strictly in the future; the
/// grant is appended to the entry's extension history.
#[utoipa::path(
    post,
    path = "/api/entries/{id}/extension/approve",
    tag = EXTENSION_TAG,
    params(("id" = i32, Path, description = "Entry id")),
    request_body = ApproveExtensionDto,
    responses(
        (status = 200, description = "Extension approved", body = EntryDto),
        (status = 400, description = "Malformed or past expiry timestamp", body = ErrorDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 409, description = "No pending request", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_extension(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
    Json(body): Json<ApproveExtensionDto>,
) -> Result<impl IntoResponse, Error> {
    let service = ExtensionService::from_state(&state);

    let entry = service.approve(id, &body.valid_until, &actor).await?;

    Ok((StatusCode::OK, Json(entry)).into_response())
}

/// Reject a pending extension request
///
/// Administrator-only. Leaves the entry's validity and history untouched.
#[utoipa::path(
    post,
    path = "/api/entries/{id}/extension/reject",
    tag = EXTENSION_TAG,
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Extension rejected", body = EntryDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 409, description = "No pending request", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_extension(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = ExtensionService::from_state(&state);

    let entry = service.reject(id, &actor).await?;

    Ok((StatusCode::OK, Json(entry)).into_response())
}

/// Extension history of an entry
///
/// Visible to administrators and the entry's owner.
#[utoipa::path(
    get,
    path = "/api/entries/{id}/extension/history",
    tag = EXTENSION_TAG,
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Success when retrieving history", body = Vec<ExtensionRecordDto>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not an administrator or the owner", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_extension_history(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = ExtensionService::from_state(&state);

    let history = service.history(id, &actor).await?;

    Ok((StatusCode::OK, Json(history)).into_response())
}
