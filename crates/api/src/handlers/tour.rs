//! Handlers for the `/travels/{slug}/tours` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use roamer_core::error::CoreError;
use roamer_core::listing::{TourListQuery, TourQueryPlan};
use roamer_core::pagination::Page;
use roamer_db::repositories::{TourRepo, TravelRepo};

use crate::error::AppResult;
use crate::response::TourResource;
use crate::state::AppState;

/// GET /api/v1/travels/{slug}/tours
///
/// Query parameters are validated before the slug is resolved, so a bad
/// request never touches the database. Unknown and non-public slugs both
/// return 404; a known slug with no matching tours returns an empty page.
pub async fn list_for_travel(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<TourListQuery>, QueryRejection>,
) -> AppResult<Json<Page<TourResource>>> {
    let Query(query) = query?;
    let params = query.validate().map_err(CoreError::from)?;

    let travel = TravelRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Travel", &slug))?;

    let plan = TourQueryPlan::from_params(&params);
    let tours = TourRepo::list_for_travel(&state.pool, travel.id, &plan).await?;
    let total = TourRepo::count_for_travel(&state.pool, travel.id, &plan.filters).await?;

    tracing::debug!(
        travel_id = travel.id,
        page = plan.window.page,
        returned = tours.len(),
        total,
        "Listed tours"
    );

    Ok(Json(Page::new(tours, plan.window, total).map(TourResource::from)))
}
