//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts (used by the seed and by tests)

pub mod tour;
pub mod travel;
