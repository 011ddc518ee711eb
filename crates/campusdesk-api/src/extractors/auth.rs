//! `AuthUser` extractor — pulls the JWT from the Authorization header, validates it, and injects context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use campusdesk_core::error::AppError;
use campusdesk_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by the admin-area gate
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        if !parts.headers.contains_key(AUTHORIZATION) {
            return Err(AppError::unauthorized("Missing Authorization header").into());
        }

        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.services.jwt_decoder.decode(bearer.token())?;
        let ctx = RequestContext::from(claims);
        parts.extensions.insert(ctx.clone());

        Ok(AuthUser(ctx))
    }
}
