//! Handlers for the `/travels` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use roamer_core::error::CoreError;
use roamer_core::listing::TravelListQuery;
use roamer_core::pagination::Page;
use roamer_db::repositories::TravelRepo;

use crate::error::AppResult;
use crate::response::TravelResource;
use crate::state::AppState;

/// GET /api/v1/travels
///
/// Public travels only, 15 per page, oldest first.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<TravelListQuery>, QueryRejection>,
) -> AppResult<Json<Page<TravelResource>>> {
    let Query(query) = query?;
    let window = query.validate().map_err(CoreError::from)?;

    let travels = TravelRepo::list_public(&state.pool, &window).await?;
    let total = TravelRepo::count_public(&state.pool).await?;

    Ok(Json(Page::new(travels, window, total).map(TravelResource::from)))
}
