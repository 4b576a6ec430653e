//! Public JSON representations of listed entities.
//!
//! Listings wrap these in [`roamer_core::pagination::Page`], giving the
//! `{ "data": [...], "meta": {...} }` envelope. Internal columns such as
//! `is_public` and row timestamps stay out of the payload.

use roamer_core::price::Price;
use roamer_core::types::{DbId, Timestamp};
use roamer_db::models::tour::Tour;
use roamer_db::models::travel::Travel;
use serde::Serialize;

/// A public travel as returned by `GET /travels`.
#[derive(Debug, Serialize)]
pub struct TravelResource {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub number_of_days: i32,
    pub number_of_nights: i32,
}

impl From<Travel> for TravelResource {
    fn from(travel: Travel) -> Self {
        Self {
            number_of_nights: travel.number_of_nights(),
            id: travel.id,
            slug: travel.slug,
            name: travel.name,
            description: travel.description,
            number_of_days: travel.number_of_days,
        }
    }
}

/// A tour as returned by `GET /travels/{slug}/tours`.
///
/// `price` serializes as a decimal string.
#[derive(Debug, Serialize)]
pub struct TourResource {
    pub id: DbId,
    pub travel_id: DbId,
    pub name: String,
    pub starting_date: Timestamp,
    pub ending_date: Timestamp,
    pub price: Price,
}

impl From<Tour> for TourResource {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id,
            travel_id: tour.travel_id,
            name: tour.name,
            starting_date: tour.starting_date,
            ending_date: tour.ending_date,
            price: tour.price,
        }
    }
}
