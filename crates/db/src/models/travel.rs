//! Travel entity model and DTOs.

use roamer_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A travel row from the `travels` table.
#[derive(Debug, Clone, FromRow)]
pub struct Travel {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub number_of_days: i32,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Travel {
    /// Nights spent on the trip; a one-day travel has none.
    pub fn number_of_nights(&self) -> i32 {
        (self.number_of_days - 1).max(0)
    }
}

/// DTO for creating a new travel.
#[derive(Debug, Clone)]
pub struct CreateTravel {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub number_of_days: i32,
    pub is_public: bool,
}
