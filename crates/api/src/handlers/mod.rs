//! Request handlers for the public listing endpoints.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate the query string first, then delegate to the
//! corresponding repository in `roamer_db` and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod tour;
pub mod travel;
