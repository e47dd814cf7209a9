//! Role-based access control extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::AppState;

/// Extractor that requires the ADMIN or SUPER_ADMIN role.
///
/// Callers without a session and callers with a customer role are both
/// rejected as unauthorized, before the handler body runs.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub CurrentUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            tracing::debug!(user_id = %user.id, role = ?user.role, "Rejected non-staff caller");
            return Err(AppError::Unauthorized);
        }
        Ok(RequireStaff(user))
    }
}
