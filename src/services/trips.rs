use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::db::TripRepository;
use crate::errors::{Error, RuleViolation};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Serialize;
use std::collections::HashMap;

/// Validated paging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Applies defaults and refuses non-positive values
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, Error> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page <= 0 {
            return Err(Error::InvalidInput(format!(
                "page must be a positive integer, got {}",
                page
            )));
        }
        if page_size <= 0 {
            return Err(Error::InvalidInput(format!(
                "pageSize must be a positive integer, got {}",
                page_size
            )));
        }

        Ok(PageRequest { page, page_size })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of trips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPage {
    #[serde(rename = "pageNum")]
    pub page_num: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "TotalPages")]
    pub total_pages: i64,
    #[serde(rename = "Trips")]
    pub trips: Vec<TripSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripSummary {
    pub name: String,
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
    pub countries: Vec<CountryName>,
    pub clients: Vec<ClientName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientName {
    pub first_name: String,
    pub last_name: String,
}

/// Number of pages needed for `total` items, `ceil(total / page_size)`
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total - 1) / page_size + 1
    }
}

/// Lists one page of trips, most recent start date first, with their
/// countries and registered clients
///
/// # Errors
///
/// * `RuleViolation::PageTooHigh` if `request.page` exceeds the page count
/// * Database errors
pub fn list_trips(conn: &mut SqliteConnection, request: PageRequest) -> Result<TripPage, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let mut repo = TripRepository::new(conn);

        let total = repo.count_trips()?;
        let total_pages = total_pages(total, request.page_size);
        if request.page > total_pages {
            return Err(RuleViolation::PageTooHigh.into());
        }

        let offset = (request.page - 1) * request.page_size;
        let trips = repo.list_page(offset, request.page_size)?;
        let ids: Vec<i32> = trips.iter().map(|t| t.id_trip).collect();

        let mut countries: HashMap<i32, Vec<CountryName>> = HashMap::new();
        for (id_trip, name) in repo.country_names_for(&ids)? {
            countries
                .entry(id_trip)
                .or_default()
                .push(CountryName { name });
        }

        let mut clients: HashMap<i32, Vec<ClientName>> = HashMap::new();
        for (id_trip, first_name, last_name) in repo.client_names_for(&ids)? {
            clients.entry(id_trip).or_default().push(ClientName {
                first_name,
                last_name,
            });
        }

        let summaries = trips
            .into_iter()
            .map(|t| TripSummary {
                countries: countries.remove(&t.id_trip).unwrap_or_default(),
                clients: clients.remove(&t.id_trip).unwrap_or_default(),
                name: t.name,
                description: t.description,
                date_from: t.date_from,
                date_to: t.date_to,
                max_people: t.max_people,
            })
            .collect();

        Ok(TripPage {
            page_num: request.page,
            page_size: request.page_size,
            total_pages,
            trips: summaries,
        })
    })
}
