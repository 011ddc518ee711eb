//! JSON body extractor whose rejections use the API error shape.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use campusdesk_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but a malformed body is a `400 VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                tracing::debug!(status = %rejection.into_response().status(), %message, "Rejected JSON body");
                Err(AppError::validation(message).into())
            }
        }
    }
}
