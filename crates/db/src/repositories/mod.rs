//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod tour_repo;
pub mod travel_repo;

pub use tour_repo::TourRepo;
pub use travel_repo::TravelRepo;
