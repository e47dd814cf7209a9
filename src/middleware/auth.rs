//! Session extractor for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::services::auth::{self as auth_service, ACCESS_TOKEN};
use crate::AppState;

/// Name of the cookie carrying the access token for browser sessions.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user resolved from the request's session token.
///
/// The token is read from an `Authorization: Bearer` header first, then from
/// the session cookie:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Pull the raw session token out of the request, if any.
fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = auth_service::validate_token(&token, &state.config.jwt_secret)?;

        if claims.token_type != ACCESS_TOKEN {
            return Err(AppError::Unauthorized);
        }

        let id: Uuid = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

        Ok(CurrentUser {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}
