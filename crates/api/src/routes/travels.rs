//! Route definitions for the `/travels` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{tour, travel};
use crate::state::AppState;

/// Routes mounted at `/travels`.
///
/// ```text
/// GET    /                   -> list             (?page=)
/// GET    /{slug}/tours       -> list_for_travel  (?sortBy=&sortOrder=&priceFrom=&priceTo=&dateFrom=&dateTo=&page=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(travel::list))
        .route("/{slug}/tours", get(tour::list_for_travel))
}
