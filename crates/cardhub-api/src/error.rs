//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::types::response::Envelope;

/// HTTP-facing wrapper for [`AppError`].
///
/// Both `AppError` and `IntoResponse` are foreign to this crate, so the
/// conversion hangs off a local newtype. Handlers return
/// `Result<_, ApiError>`; `?` on any `AppResult` converts through
/// `From`, so call sites read the same as with the domain error.
pub struct ApiError(AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Busy => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Client-class errors carry their message; server-class detail
        // stays in the log and the client gets a generic summary.
        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err, "Request failed");
            "Internal server error".to_string()
        } else {
            err.message
        };

        (status, Json(Envelope::<()>::fail(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(status_of(AppError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::not_found("gone")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("dup")), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::rate_limit("slow down")),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn busy_is_503_not_500() {
        assert_eq!(
            status_of(AppError::busy("render in progress")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let response = ApiError::from(AppError::internal("secret connection string")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn question_mark_converts_from_domain_results() {
        fn inner() -> Result<(), ApiError> {
            let res: cardhub_core::result::AppResult<()> =
                Err(AppError::validation("short name"));
            res?;
            Ok(())
        }
        let response = inner().unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
