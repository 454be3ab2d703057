use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::util::auth::AuthenticatedActor,
    error::Error,
    model::{
        api::{DeleteEntryParams, EntryFilterDto, EntryStatsDto, ErrorDto},
        app::AppState,
        entry::{EntryDraft, EntryDto, EntryPatch},
    },
    service::entry::{
        query::{self, EntryQuery},
        EntryService,
    },
};

pub static ENTRY_TAG: &str = "entry";

/// List entries visible to the authenticated user
///
/// Non-administrators only see their own entries. Filters are conjunctive and
/// the owner filter is honored for administrators only.
#[utoipa::path(
    get,
    path = "/api/entries",
    tag = ENTRY_TAG,
    params(EntryFilterDto),
    responses(
        (status = 200, description = "Success when retrieving entries", body = Vec<EntryDto>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_entries(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Query(filter): Query<EntryFilterDto>,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    // Expired entries get corrected in the background; the listing itself
    // serves whatever state the mirror currently holds.
    let monitor = state.monitor.clone();
    tokio::spawn(async move {
        if let Err(error) = monitor.sweep().await {
            tracing::error!("Error running expiry sweep: {:?}", error);
        }
    });

    let entries = if state.entries.is_empty() {
        service.refresh().await?
    } else {
        service.list()?
    };

    let entries = EntryQuery::from(filter).apply(entries, &actor);

    Ok((StatusCode::OK, Json(entries)).into_response())
}

/// Aggregate statistics over the visible entry collection
#[utoipa::path(
    get,
    path = "/api/entries/stats",
    tag = ENTRY_TAG,
    responses(
        (status = 200, description = "Success when computing statistics", body = EntryStatsDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_entry_stats(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    let entries = service.refresh().await?;
    let entries = EntryQuery::default().apply(entries, &actor);

    Ok((StatusCode::OK, Json(query::statistics(&entries))).into_response())
}

/// Create a new entry
///
/// Omitted status defaults to active, omitted payment status to unpaid, and
/// an omitted admin fee is computed from the creation date and expiry. Only
/// administrators may set a foreign owner or backdate the creation timestamp.
#[utoipa::path(
    post,
    path = "/api/entries",
    tag = ENTRY_TAG,
    request_body = EntryDraft,
    responses(
        (status = 201, description = "Entry created", body = EntryDto),
        (status = 400, description = "Invalid entry fields", body = ErrorDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Owner or backdate not permitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(draft): Json<EntryDraft>,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    let entry = service.create(draft, &actor).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// Import a batch of entries
///
/// Drafts are created in order; the first failure aborts the batch. Entries
/// created before the failure are kept.
#[utoipa::path(
    post,
    path = "/api/entries/import",
    tag = ENTRY_TAG,
    request_body = Vec<EntryDraft>,
    responses(
        (status = 201, description = "Entries imported", body = Vec<EntryDto>),
        (status = 400, description = "Invalid entry fields", body = ErrorDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn import_entries(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(drafts): Json<Vec<EntryDraft>>,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    let entries = service.import(drafts, &actor).await?;

    Ok((StatusCode::CREATED, Json(entries)).into_response())
}

/// Update an entry
///
/// Owners may edit their own entries, administrators any entry. Owner and
/// creation timestamp are immutable.
#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    tag = ENTRY_TAG,
    params(("id" = i32, Path, description = "Entry id")),
    request_body = EntryPatch,
    responses(
        (status = 200, description = "Entry updated", body = EntryDto),
        (status = 400, description = "Invalid entry fields", body = ErrorDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
    Json(patch): Json<EntryPatch>,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    let entry = service.update(id, patch, &actor).await?;

    Ok((StatusCode::OK, Json(entry)).into_response())
}

/// Delete an entry
///
/// Irreversible; requires `confirm=true` as an explicit acknowledgement.
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    tag = ENTRY_TAG,
    params(
        ("id" = i32, Path, description = "Entry id"),
        DeleteEntryParams
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Deletion not confirmed", body = ErrorDto),
        (status = 401, description = "Missing or invalid credentials", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<i32>,
    Query(params): Query<DeleteEntryParams>,
) -> Result<impl IntoResponse, Error> {
    let service = EntryService::from_state(&state);

    service.delete(id, &actor, params.confirm).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
