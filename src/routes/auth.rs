//! Authentication routes: register, login, refresh, logout, profile.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::middleware::auth::{CurrentUser, SESSION_COOKIE};
use crate::models::user::{RegisterUser, UserResponse};
use crate::services::auth as auth_service;
use crate::services::auth::TokenPair;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/register — customer self-registration
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let body = body.normalized();
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let user = auth_service::register(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/auth/login — returns tokens and sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenPair>), AppError> {
    let tokens =
        auth_service::login(&state.db, &body.email, &body.password, &state.config).await?;
    let jar = jar.add(session_cookie(
        tokens.access_token.clone(),
        state.config.session_cookie_secure,
    ));
    Ok((jar, Json(tokens)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<TokenPair>), AppError> {
    let tokens = auth_service::refresh_token(&state.db, &body.refresh_token, &state.config).await?;
    let jar = jar.add(session_cookie(
        tokens.access_token.clone(),
        state.config.session_cookie_secure,
    ));
    Ok((jar, Json(tokens)))
}

/// POST /api/auth/logout — drops the session cookie; bearer clients discard their tokens
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// GET /api/auth/me — current user profile
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = auth_service::find_user_by_id(&state.db, current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}
