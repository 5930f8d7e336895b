pub mod contacts;
pub mod events;

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use rolodir_core::RolodirError;
use serde::Serialize;

/// Header carrying the authenticated user id. Identity is delegated to the
/// front proxy; an absent header means a signed-out session.
const USER_HEADER: &str = "x-rolodir-user";

pub fn session_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses, mapping store errors to their status.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<RolodirError>() {
            Some(RolodirError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
            Some(RolodirError::ContactNotFound(_)) => StatusCode::NOT_FOUND,
            Some(RolodirError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(RolodirError::RemoteUnavailable(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
