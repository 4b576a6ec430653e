//! Domain logic for the travel listing service.
//!
//! Pure types and functions only: no database, no HTTP. The `db` crate
//! executes what this crate plans, and the `api` crate maps its errors to
//! responses.

pub mod error;
pub mod listing;
pub mod pagination;
pub mod price;
pub mod types;
pub mod validation;
