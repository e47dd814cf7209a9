//! Public villa listing routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::villa::{Villa, VillaFilters, VillaSummary};
use crate::services::villa as villa_service;
use crate::AppState;

/// GET /api/villas — published villas with pagination and filters.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<VillaFilters>,
) -> Result<Json<PagedResult<VillaSummary>>, AppError> {
    let result = villa_service::list(&state.db, &filters, &pagination).await?;
    Ok(Json(result))
}

/// GET /api/villas/{slug} — villa detail page.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Villa>, AppError> {
    let villa = villa_service::find_by_slug(&state.db, &slug).await?;
    Ok(Json(villa))
}
