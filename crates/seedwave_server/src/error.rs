//! HTTP error mapping. Every error body is `{"message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use seedwave_core::error::SeedwaveError;

#[derive(Debug)]
pub enum AppError {
    Core(SeedwaveError),
    /// A 400 with a fixed client-facing message.
    BadRequest(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<SeedwaveError> for AppError {
    fn from(e: SeedwaveError) -> Self {
        Self::Core(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Core(SeedwaveError::NotFound(msg))
            | Self::Core(SeedwaveError::InvalidInput(msg))
            | Self::Core(SeedwaveError::Conflict(msg))
            | Self::BadRequest(msg) => msg,
            Self::Core(SeedwaveError::Internal(e)) => {
                tracing::error!(error = ?e, "internal error");
                "Internal server error".to_string()
            }
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_passes_message_through() {
        let (status, body) =
            body_of(SeedwaveError::NotFound("Sector not found".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Sector not found");
    }

    #[tokio::test]
    async fn internal_detail_is_hidden() {
        let err = SeedwaveError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let (status, _) = body_of(SeedwaveError::Conflict("dup".into()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
