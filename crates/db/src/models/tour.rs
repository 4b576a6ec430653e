//! Tour entity model and DTOs.

use roamer_core::price::Price;
use roamer_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A tour row from the `tours` table.
///
/// `price` is decoded from the cents column.
#[derive(Debug, Clone, FromRow)]
pub struct Tour {
    pub id: DbId,
    pub travel_id: DbId,
    pub name: String,
    pub starting_date: Timestamp,
    pub ending_date: Timestamp,
    #[sqlx(try_from = "i64")]
    pub price: Price,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tour.
#[derive(Debug, Clone)]
pub struct CreateTour {
    pub travel_id: DbId,
    pub name: String,
    pub starting_date: Timestamp,
    pub ending_date: Timestamp,
    pub price: Price,
}
