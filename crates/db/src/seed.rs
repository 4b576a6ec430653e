//! Demo data for local development.
//!
//! Creates one public travel with sixteen tours, one more than a page, so
//! the pagination boundary is visible straight away.

use chrono::{Duration, Utc};
use roamer_core::price::Price;

use crate::models::travel::Travel;
use crate::repositories::TravelRepo;
use crate::DbPool;

/// Slug of the seeded travel.
pub const DEMO_TRAVEL_SLUG: &str = "iceland-ring-road";

/// Number of tours attached to the seeded travel.
pub const DEMO_TOUR_COUNT: i64 = 16;

/// Insert the demo travel and its tours unless the slug already exists.
///
/// Returns the travel either way, so calling this twice is harmless.
pub async fn seed_demo_data(pool: &DbPool) -> Result<Travel, sqlx::Error> {
    if let Some(existing) = TravelRepo::find_by_slug(pool, DEMO_TRAVEL_SLUG).await? {
        tracing::info!(travel_id = existing.id, "Demo data already present, skipping seed");
        return Ok(existing);
    }

    let mut tx = pool.begin().await?;

    let travel = sqlx::query_as::<_, Travel>(
        "INSERT INTO travels (slug, name, description, number_of_days, is_public)
         VALUES ($1, $2, $3, $4, TRUE)
         RETURNING id, slug, name, description, number_of_days, is_public, created_at, updated_at",
    )
    .bind(DEMO_TRAVEL_SLUG)
    .bind("Iceland Ring Road")
    .bind("Eight days around the island on Route 1.")
    .bind(8_i32)
    .fetch_one(&mut *tx)
    .await?;

    let base = Utc::now();
    for i in 0..DEMO_TOUR_COUNT {
        let starting_date = base + Duration::days(7 * i);
        sqlx::query(
            "INSERT INTO tours (travel_id, name, starting_date, ending_date, price)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(travel.id)
        .bind(format!("Departure {}", i + 1))
        .bind(starting_date)
        .bind(starting_date + Duration::days(i64::from(travel.number_of_days)))
        .bind(Price::from_units(1_200 + 35 * i).map_or(0, Price::cents))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(travel_id = travel.id, tours = DEMO_TOUR_COUNT, "Seeded demo data");
    Ok(travel)
}
