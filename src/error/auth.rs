use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request is missing credentials")]
    MissingCredentials,
    #[error("Credentials did not match any known user")]
    InvalidCredentials,
    #[error("User {username} may not {action}")]
    Forbidden { username: String, action: String },
}

impl AuthError {
    pub fn forbidden(username: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Forbidden {
            username: username.into(),
            action: action.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingCredentials | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
