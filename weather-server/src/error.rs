use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weather_core::ProviderError;

/// JSON error body the browser client reads.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Provider failure carried to the HTTP boundary.
///
/// Wrapping the core error keeps the status mapping in one place and lets
/// handlers propagate with `?`.
#[derive(Debug)]
pub struct ApiError(ProviderError);

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            ProviderError::ApiKeyMissing => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
            ProviderError::CityNotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            // Upstream answered: forward its status code.
            ProviderError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message.clone(),
            ),
            // Upstream unreachable or its success body malformed: the fault
            // is on the provider side of the proxy.
            ProviderError::Schema(_) | ProviderError::Transport(_) => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
        };

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), detail = %detail, "request failed");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
