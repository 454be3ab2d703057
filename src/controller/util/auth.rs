//! HTTP Basic authentication against the static credential roster.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    error::{auth::AuthError, Error},
    model::{app::AppState, user::Actor},
};

/// The verified actor behind a request.
///
/// Extracting this from a request performs Basic authentication against the
/// configured roster and fails with 401 before the handler body runs.
pub struct AuthenticatedActor(pub Actor);

impl FromRequestParts<AppState> for AuthenticatedActor {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingCredentials)?;

        let encoded = header
            .strip_prefix("Basic ")
            .ok_or(AuthError::MissingCredentials)?;

        let decoded = STANDARD
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(AuthError::InvalidCredentials)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthError::InvalidCredentials)?;

        let user = state
            .config
            .find_user(username)
            .filter(|user| user.password.expose() == password)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(Self(user.to_actor()))
    }
}
