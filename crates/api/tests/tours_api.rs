//! HTTP-level integration tests for `GET /api/v1/travels/{slug}/tours`.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, DurationRound, Utc};
use common::{body_json, build_test_app, data_ids, get, travel_with_tours};
use roamer_core::price::Price;
use roamer_core::types::Timestamp;
use roamer_db::models::tour::{CreateTour, Tour};
use roamer_db::models::travel::{CreateTravel, Travel};
use roamer_db::repositories::{TourRepo, TravelRepo};
use serde_json::Value;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_travel(pool: &PgPool, slug: &str, is_public: bool) -> Travel {
    TravelRepo::create(
        pool,
        &CreateTravel {
            slug: slug.to_string(),
            name: format!("Travel {slug}"),
            description: "A travel".to_string(),
            number_of_days: 5,
            is_public,
        },
    )
    .await
    .unwrap()
}

async fn create_tour(
    pool: &PgPool,
    travel: &Travel,
    price: &str,
    starting_date: Timestamp,
    ending_date: Timestamp,
) -> Tour {
    TourRepo::create(
        pool,
        &CreateTour {
            travel_id: travel.id,
            name: format!("Tour at {price}"),
            starting_date,
            ending_date,
            price: price.parse::<Price>().unwrap(),
        },
    )
    .await
    .unwrap()
}

/// Current time truncated to whole seconds, so it survives a round trip
/// through a query-string timestamp.
fn now() -> Timestamp {
    Utc::now().duration_trunc(Duration::seconds(1)).unwrap()
}

fn qs_time(ts: Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

async fn list(pool: &PgPool, slug: &str, query: &str) -> (StatusCode, Value) {
    let uri = if query.is_empty() {
        format!("/api/v1/travels/{slug}/tours")
    } else {
        format!("/api/v1/travels/{slug}/tours?{query}")
    };
    let response = get(build_test_app(pool.clone()), &uri).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Assert a 200 response containing exactly `expected` ids (any order).
fn assert_ids(status: StatusCode, json: &Value, expected: &[i64]) {
    assert_eq!(status, StatusCode::OK, "unexpected body: {json}");
    let mut ids = data_ids(json);
    ids.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

// ---------------------------------------------------------------------------
// Listing and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tours_list_by_travel_slug_returns_correct_tours(pool: PgPool) {
    let travel = create_travel(&pool, "lapland", true).await;
    let t = now();
    let tour = create_tour(&pool, &travel, "100", t, t + Duration::days(1)).await;
    let other = create_travel(&pool, "other", true).await;
    create_tour(&pool, &other, "100", t, t + Duration::days(1)).await;

    let (status, json) = list(&pool, "lapland", "").await;

    assert_ids(status, &json, &[tour.id]);
    assert_eq!(json["data"][0]["travel_id"], travel.id);
    assert_eq!(json["meta"]["current_page"], 1);
    assert_eq!(json["meta"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_price_is_shown_as_exact_decimal_string(pool: PgPool) {
    let travel = create_travel(&pool, "exact-price", true).await;
    let t = now();
    create_tour(&pool, &travel, "234.12", t, t + Duration::days(1)).await;

    let (status, json) = list(&pool, "exact-price", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["price"], "234.12");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tours_list_returns_pagination(pool: PgPool) {
    travel_with_tours(&pool, "sixteen", true, 16).await.unwrap();

    let (status, json) = list(&pool, "sixteen", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 15);
    assert_eq!(json["meta"]["current_page"], 1);
    assert_eq!(json["meta"]["per_page"], 15);
    assert_eq!(json["meta"]["total"], 16);
    assert_eq!(json["meta"]["last_page"], 2);
    assert_eq!(json["meta"]["from"], 1);
    assert_eq!(json["meta"]["to"], 15);

    let (status, second) = list(&pool, "sixteen", "page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"].as_array().unwrap().len(), 1);
    assert_eq!(second["meta"]["current_page"], 2);
    assert_eq!(second["meta"]["from"], 16);

    let first_ids = data_ids(&json);
    assert!(!first_ids.contains(&data_ids(&second)[0]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_past_the_end_is_empty_not_an_error(pool: PgPool) {
    travel_with_tours(&pool, "short", true, 2).await.unwrap();

    let (status, json) = list(&pool, "short", "page=5").await;
    assert_ids(status, &json, &[]);
    assert_eq!(json["meta"]["current_page"], 5);
    assert_eq!(json["meta"]["last_page"], 1);
    assert!(json["meta"]["from"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_travel_without_tours_returns_empty_page(pool: PgPool) {
    create_travel(&pool, "empty", true).await;

    let (status, json) = list(&pool, "empty", "").await;
    assert_ids(status, &json, &[]);
    assert_eq!(json["meta"]["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_requests_are_identical(pool: PgPool) {
    let travel = create_travel(&pool, "stable", true).await;
    let t = now();
    // Equal prices force the tie-break to decide the order.
    for _ in 0..20 {
        create_tour(&pool, &travel, "99.99", t, t + Duration::days(1)).await;
    }

    for query in ["sortBy=price", "sortBy=price&page=2", "sortBy=price&sortOrder=desc"] {
        let (_, first) = list(&pool, "stable", query).await;
        let (_, second) = list(&pool, "stable", query).await;
        assert_eq!(first, second, "responses differ for {query}");
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_sorts_by_starting_date_correctly(pool: PgPool) {
    let travel = create_travel(&pool, "by-date", true).await;
    let t = now();
    let later = create_tour(&pool, &travel, "100", t + Duration::days(2), t + Duration::days(3)).await;
    let earlier = create_tour(&pool, &travel, "100", t, t + Duration::days(1)).await;

    let (status, json) = list(&pool, "by-date", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_ids(&json), vec![earlier.id, later.id]);

    let (_, json) = list(&pool, "by-date", "sortOrder=desc").await;
    assert_eq!(data_ids(&json), vec![later.id, earlier.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_sorts_by_price_correctly(pool: PgPool) {
    let travel = create_travel(&pool, "by-price", true).await;
    let t = now();
    let expensive = create_tour(&pool, &travel, "200", t, t + Duration::days(1)).await;
    let cheap = create_tour(&pool, &travel, "100", t + Duration::days(4), t + Duration::days(5)).await;

    let (status, json) = list(&pool, "by-price", "sortBy=price&sortOrder=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_ids(&json), vec![cheap.id, expensive.id]);

    let (_, json) = list(&pool, "by-price", "sortBy=price&sortOrder=desc").await;
    assert_eq!(data_ids(&json), vec![expensive.id, cheap.id]);
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_filter_by_price_correctly(pool: PgPool) {
    let travel = create_travel(&pool, "price-filter", true).await;
    let t = now();
    let expensive = create_tour(&pool, &travel, "200", t, t + Duration::days(1)).await.id;
    let cheap = create_tour(&pool, &travel, "100", t, t + Duration::days(1)).await.id;

    let cases: [(&str, &[i64]); 11] = [
        ("priceFrom=100", &[cheap, expensive]),
        ("priceFrom=150", &[expensive]),
        ("priceFrom=250", &[]),
        ("priceTo=200", &[cheap, expensive]),
        ("priceTo=150", &[cheap]),
        ("priceTo=50", &[]),
        ("priceFrom=150&priceTo=250", &[expensive]),
        ("priceFrom=150.001", &[expensive]),
        ("priceFrom=100.001", &[expensive]),
        ("priceTo=100.009", &[cheap]),
        ("priceTo=199.999", &[cheap]),
    ];

    for (query, expected) in cases {
        let (status, json) = list(&pool, "price-filter", query).await;
        assert_ids(status, &json, expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_filter_starting_date_correctly(pool: PgPool) {
    let travel = create_travel(&pool, "date-filter", true).await;
    let t = now();
    let later = create_tour(&pool, &travel, "100", t + Duration::days(2), t + Duration::days(3))
        .await
        .id;
    let earlier = create_tour(&pool, &travel, "100", t, t + Duration::days(1)).await.id;

    let day = |n: i64| qs_time(t + Duration::days(n));
    let cases: Vec<(String, Vec<i64>)> = vec![
        (format!("dateFrom={}", day(0)), vec![earlier, later]),
        (format!("dateFrom={}", day(1)), vec![later]),
        (format!("dateFrom={}", day(5)), vec![]),
        (format!("dateTo={}", day(5)), vec![earlier, later]),
        (format!("dateTo={}", day(1)), vec![earlier]),
        (format!("dateTo={}", day(-1)), vec![]),
        (format!("dateFrom={}&dateTo={}", day(1), day(5)), vec![later]),
        (format!("dateFrom={}&dateTo={}", day(1), day(1)), vec![]),
    ];

    for (query, expected) in cases {
        let (status, json) = list(&pool, "date-filter", &query).await;
        assert_ids(status, &json, &expected);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_combine_with_sort_and_paging(pool: PgPool) {
    let travel = create_travel(&pool, "combined", true).await;
    let t = now();
    let mut cheap_to_dear = Vec::new();
    for i in 0..18 {
        let tour = create_tour(
            &pool,
            &travel,
            &format!("{}", 100 + i * 10),
            t + Duration::days(i),
            t + Duration::days(i + 1),
        )
        .await;
        cheap_to_dear.push(tour.id);
    }

    // Prices 120..=270 match 16 tours; page 2 of the descending order holds the cheapest.
    let (status, json) = list(
        &pool,
        "combined",
        "priceFrom=120&priceTo=270&sortBy=price&sortOrder=desc&page=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 16);
    assert_eq!(data_ids(&json), vec![cheap_to_dear[2]]);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tour_list_returns_validation_errors(pool: PgPool) {
    create_travel(&pool, "strict", true).await;

    let (status, json) = list(&pool, "strict", "dateFrom=abcde").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert_eq!(json["errors"]["dateFrom"][0]["rule"], "date");

    let (status, json) = list(&pool, "strict", "priceFrom=asd").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["priceFrom"][0]["rule"], "numeric");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_reports_every_bad_field(pool: PgPool) {
    create_travel(&pool, "many-errors", true).await;

    let (status, json) = list(
        &pool,
        "many-errors",
        "sortBy=name&sortOrder=sideways&priceTo=-3&dateTo=soon&page=0",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<&str> = json["errors"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(fields, vec!["dateTo", "page", "priceTo", "sortBy", "sortOrder"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_parameter_is_a_bad_request(pool: PgPool) {
    create_travel(&pool, "repeated", true).await;

    let (status, json) = list(&pool, "repeated", "page=1&page=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("page"));
    assert!(json.get("errors").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_runs_before_slug_resolution(pool: PgPool) {
    let (status, _) = list(&pool, "does-not-exist", "priceFrom=asd").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_slug_returns_404(pool: PgPool) {
    let (status, json) = list(&pool, "nowhere", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_public_travel_tours_are_hidden(pool: PgPool) {
    travel_with_tours(&pool, "private", false, 3).await.unwrap();

    let (status, json) = list(&pool, "private", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
