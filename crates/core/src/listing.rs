//! Tour listing: raw query parameters, validation, and the query plan.
//!
//! Listing runs in two phases. [`TourListQuery::validate`] turns untrusted
//! string parameters into a typed [`TourListParams`] or a field-keyed
//! [`ValidationErrors`]. [`TourQueryPlan::from_params`] then composes filter
//! clauses, a sort descriptor and a page window from the typed value only.
//! The plan names columns through fixed enums, never through user input.

use serde::Deserialize;

use crate::pagination::{parse_page, PageWindow};
use crate::price::{Price, PriceParseError, Rounding};
use crate::types::Timestamp;
use crate::validation::{non_empty, parse_timestamp, ValidationErrors};

// ---------------------------------------------------------------------------
// Sort descriptors
// ---------------------------------------------------------------------------

/// Columns a tour listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourSortField {
    #[default]
    StartingDate,
    Price,
}

impl TourSortField {
    pub const ALLOWED: [&'static str; 2] = ["starting_date", "price"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "starting_date" => Some(Self::StartingDate),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    /// Database column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            Self::StartingDate => "starting_date",
            Self::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALLOWED: [&'static str; 2] = ["asc", "desc"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw and validated parameters
// ---------------------------------------------------------------------------

/// Raw `GET /travels/{slug}/tours` query string, exactly as sent.
///
/// Every field stays a string here; coercion happens in [`Self::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub price_from: Option<String>,
    pub price_to: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<String>,
}

/// Validated tour listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourListParams {
    pub sort_by: TourSortField,
    pub sort_order: SortOrder,
    pub price_from: Option<Price>,
    pub price_to: Option<Price>,
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
    pub page: u32,
}

impl TourListQuery {
    /// Check every parameter and collect all violations.
    ///
    /// `priceFrom > priceTo` and `dateFrom > dateTo` are accepted; they
    /// select an empty range.
    pub fn validate(&self) -> Result<TourListParams, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let sort_by = match non_empty(self.sort_by.as_deref()) {
            None => TourSortField::default(),
            Some(raw) => TourSortField::parse(raw).unwrap_or_else(|| {
                errors.add("sortBy", "in", one_of("sort by", &TourSortField::ALLOWED));
                TourSortField::default()
            }),
        };

        let sort_order = match non_empty(self.sort_order.as_deref()) {
            None => SortOrder::default(),
            Some(raw) => SortOrder::parse(raw).unwrap_or_else(|| {
                errors.add("sortOrder", "in", one_of("sort order", &SortOrder::ALLOWED));
                SortOrder::default()
            }),
        };

        let price_from = price_field(
            "priceFrom",
            "price from",
            self.price_from.as_deref(),
            Rounding::Up,
            &mut errors,
        );
        let price_to = price_field(
            "priceTo",
            "price to",
            self.price_to.as_deref(),
            Rounding::Down,
            &mut errors,
        );
        let date_from = date_field("dateFrom", "date from", self.date_from.as_deref(), &mut errors);
        let date_to = date_field("dateTo", "date to", self.date_to.as_deref(), &mut errors);
        let page = parse_page(self.page.as_deref(), &mut errors);

        errors.into_result(|| TourListParams {
            sort_by,
            sort_order,
            price_from,
            price_to,
            date_from,
            date_to,
            page,
        })
    }
}

fn one_of(label: &str, allowed: &[&str]) -> String {
    format!("The selected {label} is invalid. Allowed: {}.", allowed.join(", "))
}

fn price_field(
    field: &str,
    label: &str,
    raw: Option<&str>,
    rounding: Rounding,
    errors: &mut ValidationErrors,
) -> Option<Price> {
    let raw = non_empty(raw)?;
    match Price::parse_bound(raw, rounding) {
        Ok(price) => Some(price),
        Err(PriceParseError::Negative) => {
            errors.add(field, "min", format!("The {label} field must be at least 0."));
            None
        }
        Err(_) => {
            errors.add(field, "numeric", format!("The {label} field must be a number."));
            None
        }
    }
}

fn date_field(
    field: &str,
    label: &str,
    raw: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<Timestamp> {
    let raw = non_empty(raw)?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        errors.add(field, "date", format!("The {label} field must be a valid date."));
    }
    parsed
}

/// Raw `GET /travels` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TravelListQuery {
    pub page: Option<String>,
}

impl TravelListQuery {
    pub fn validate(&self) -> Result<PageWindow, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let page = parse_page(self.page.as_deref(), &mut errors);
        errors.into_result(|| PageWindow::new(page))
    }
}

// ---------------------------------------------------------------------------
// Query plan
// ---------------------------------------------------------------------------

/// One range predicate on a tour row. All filters in a plan are ANDed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourFilter {
    PriceAtLeast(Price),
    PriceAtMost(Price),
    StartsOnOrAfter(Timestamp),
    StartsOnOrBefore(Timestamp),
}

/// Ordering for a tour listing. `id` in the same direction breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TourSort {
    pub field: TourSortField,
    pub order: SortOrder,
}

/// Everything the storage layer needs to fetch one page of tours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourQueryPlan {
    pub filters: Vec<TourFilter>,
    pub sort: TourSort,
    pub window: PageWindow,
}

impl TourQueryPlan {
    pub fn from_params(params: &TourListParams) -> Self {
        let filters = [
            params.price_from.map(TourFilter::PriceAtLeast),
            params.price_to.map(TourFilter::PriceAtMost),
            params.date_from.map(TourFilter::StartsOnOrAfter),
            params.date_to.map(TourFilter::StartsOnOrBefore),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            filters,
            sort: TourSort {
                field: params.sort_by,
                order: params.sort_order,
            },
            window: PageWindow::new(params.page),
        }
    }
}
