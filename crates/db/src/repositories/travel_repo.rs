//! Repository for the `travels` table.

use roamer_core::pagination::PageWindow;
use sqlx::PgPool;

use crate::models::travel::{CreateTravel, Travel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, slug, name, description, number_of_days, is_public, created_at, updated_at";

/// Provides read access to travels, plus inserts for seeding.
pub struct TravelRepo;

impl TravelRepo {
    /// Insert a new travel, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTravel) -> Result<Travel, sqlx::Error> {
        let query = format!(
            "INSERT INTO travels (slug, name, description, number_of_days, is_public)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Travel>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.number_of_days)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a travel by slug regardless of visibility.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Travel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM travels WHERE slug = $1");
        sqlx::query_as::<_, Travel>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a slug to a public travel. Non-public travels resolve to `None`.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Travel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM travels WHERE slug = $1 AND is_public");
        sqlx::query_as::<_, Travel>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// One page of public travels, oldest first.
    pub async fn list_public(
        pool: &PgPool,
        window: &PageWindow,
    ) -> Result<Vec<Travel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM travels WHERE is_public ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Travel>(&query)
            .bind(window.limit())
            .bind(window.offset())
            .fetch_all(pool)
            .await
    }

    /// Total number of public travels.
    pub async fn count_public(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM travels WHERE is_public")
            .fetch_one(pool)
            .await
    }
}
