pub mod health;
pub mod travels;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /travels                                         list public travels
/// /travels/{slug}/tours                            list tours of a public travel
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/travels", travels::router())
}
