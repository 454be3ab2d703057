//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa annotations, and
//! Swagger UI serves the collected document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI
/// documentation.
///
/// # Registered Endpoints
/// - `GET /api/entries` - List visible entries with filters and sorting
/// - `GET /api/entries/stats` - Aggregate statistics over visible entries
/// - `POST /api/entries` - Create an entry
/// - `POST /api/entries/import` - Import a batch of entries
/// - `PUT /api/entries/{id}` - Update an entry
/// - `DELETE /api/entries/{id}` - Delete an entry (requires `confirm=true`)
/// - `POST /api/entries/{id}/extension/request` - Request an extension
/// - `POST /api/entries/{id}/extension/approve` - Approve a pending request
/// - `POST /api/entries/{id}/extension/reject` - Reject a pending request
/// - `GET /api/entries/{id}/extension/history` - Extension grant history
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Kontowart", description = "Kontowart API"), tags(
        (name = controller::entry::ENTRY_TAG, description = "Entry management API routes"),
        (name = controller::extension::EXTENSION_TAG, description = "Extension workflow API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::entry::get_entries,
            controller::entry::create_entry
        ))
        .routes(routes!(controller::entry::get_entry_stats))
        .routes(routes!(controller::entry::import_entries))
        .routes(routes!(
            controller::entry::update_entry,
            controller::entry::delete_entry
        ))
        .routes(routes!(controller::extension::request_extension))
        .routes(routes!(controller::extension::approve_extension))
        .routes(routes!(controller::extension::reject_extension))
        .routes(routes!(controller::extension::get_extension_history))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
