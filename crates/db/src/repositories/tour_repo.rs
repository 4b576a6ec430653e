//! Repository for the `tours` table.
//!
//! Listing queries are rendered from a [`TourQueryPlan`] with
//! [`sqlx::QueryBuilder`]. Column names and sort keywords come from the
//! plan's enums; every user-supplied value is a bound parameter.

use roamer_core::listing::{TourFilter, TourQueryPlan};
use roamer_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::tour::{CreateTour, Tour};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, travel_id, name, starting_date, ending_date, price, created_at, updated_at";

/// Provides listing queries for tours, plus inserts for seeding.
pub struct TourRepo;

impl TourRepo {
    /// Insert a new tour, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTour) -> Result<Tour, sqlx::Error> {
        let query = format!(
            "INSERT INTO tours (travel_id, name, starting_date, ending_date, price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tour>(&query)
            .bind(input.travel_id)
            .bind(&input.name)
            .bind(input.starting_date)
            .bind(input.ending_date)
            .bind(input.price.cents())
            .fetch_one(pool)
            .await
    }

    /// Fetch the page of tours described by `plan` for one travel.
    ///
    /// Rows are ordered by the plan's sort field, then by `id` in the same
    /// direction, so consecutive pages never overlap.
    pub async fn list_for_travel(
        pool: &PgPool,
        travel_id: DbId,
        plan: &TourQueryPlan,
    ) -> Result<Vec<Tour>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tours"));
        push_predicates(&mut qb, travel_id, &plan.filters);

        let direction = plan.sort.order.keyword();
        qb.push(" ORDER BY ")
            .push(plan.sort.field.column())
            .push(" ")
            .push(direction)
            .push(", id ")
            .push(direction);

        qb.push(" LIMIT ")
            .push_bind(plan.window.limit())
            .push(" OFFSET ")
            .push_bind(plan.window.offset());

        tracing::debug!(travel_id, sql = qb.sql(), "Listing tours");
        qb.build_query_as::<Tour>().fetch_all(pool).await
    }

    /// Count the tours of one travel matching `filters`.
    pub async fn count_for_travel(
        pool: &PgPool,
        travel_id: DbId,
        filters: &[TourFilter],
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tours");
        push_predicates(&mut qb, travel_id, filters);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }
}

/// Append `WHERE travel_id = $n` and one `AND` clause per filter.
fn push_predicates(qb: &mut QueryBuilder<'_, Postgres>, travel_id: DbId, filters: &[TourFilter]) {
    qb.push(" WHERE travel_id = ").push_bind(travel_id);
    for filter in filters {
        match *filter {
            TourFilter::PriceAtLeast(price) => {
                qb.push(" AND price >= ").push_bind(price.cents());
            }
            TourFilter::PriceAtMost(price) => {
                qb.push(" AND price <= ").push_bind(price.cents());
            }
            TourFilter::StartsOnOrAfter(at) => {
                qb.push(" AND starting_date >= ").push_bind(at);
            }
            TourFilter::StartsOnOrBefore(at) => {
                qb.push(" AND starting_date <= ").push_bind(at);
            }
        }
    }
}
