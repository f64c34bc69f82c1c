use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bandroom_core::BandroomError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Scheduling conflicts are not routed through here: a non-empty
/// `ConflictReport` is a regular 409 response with the report as its body,
/// built directly in the rehearsal handlers.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<BandroomError>() {
            match e {
                BandroomError::NotInitialized => StatusCode::BAD_REQUEST,
                BandroomError::BandNotFound(_)
                | BandroomError::MemberNotFound(_)
                | BandroomError::RuleNotFound(_)
                | BandroomError::RehearsalNotFound(_)
                | BandroomError::SongNotFound(_) => StatusCode::NOT_FOUND,
                BandroomError::BandExists(_) | BandroomError::DuplicateMember(_) => {
                    StatusCode::CONFLICT
                }
                BandroomError::InvalidInterval(_)
                | BandroomError::NotMergeable
                | BandroomError::InvalidBand(_)
                | BandroomError::InvalidDuration(_)
                | BandroomError::InvalidWindow
                | BandroomError::InvalidRule(_)
                | BandroomError::InvalidSlug(_) => StatusCode::BAD_REQUEST,
                BandroomError::Io(_) | BandroomError::Yaml(_) | BandroomError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
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
