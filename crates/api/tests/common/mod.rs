#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use roamer_api::config::ServerConfig;
use roamer_api::router::build_app_router;
use roamer_api::state::AppState;
use roamer_core::price::Price;
use roamer_db::models::tour::CreateTour;
use roamer_db::models::travel::{CreateTravel, Travel};
use roamer_db::repositories::{TourRepo, TravelRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        db_max_connections: 5,
        seed_demo_data: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

/// Send a GET request through the router without a TCP listener.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("accept", "application/json")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of the `data` array, in response order.
pub fn data_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id should be a number"))
        .collect()
}

/// Create a travel with `count` tours priced 100, 101, ... starting on
/// consecutive days.
pub async fn travel_with_tours(
    pool: &PgPool,
    slug: &str,
    is_public: bool,
    count: i64,
) -> Result<Travel, sqlx::Error> {
    let travel = TravelRepo::create(
        pool,
        &CreateTravel {
            slug: slug.to_string(),
            name: format!("Travel {slug}"),
            description: String::new(),
            number_of_days: 3,
            is_public,
        },
    )
    .await?;

    let base = Utc::now();
    for i in 0..count {
        let starting_date = base + Duration::days(i);
        TourRepo::create(
            pool,
            &CreateTour {
                travel_id: travel.id,
                name: format!("Tour {i}"),
                starting_date,
                ending_date: starting_date + Duration::days(1),
                price: Price::from_units(100 + i).unwrap(),
            },
        )
        .await?;
    }
    Ok(travel)
}
