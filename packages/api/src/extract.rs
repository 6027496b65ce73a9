// ABOUTME: Request body extractor that reports malformed JSON in the API error envelope
// ABOUTME: Wraps axum's Json so rejections become validation errors instead of plain text

use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

use crate::error::AppError;

/// JSON request body; a rejected body renders as a `VALIDATION_ERROR`
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
