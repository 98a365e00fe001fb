use crate::api::errors::ApiError;
use crate::constants::REGISTRATION_CONFIRMATION;
use crate::db::{Client, Database};
use crate::services::{self, PageRequest, TripPage};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Query string of the trip listing
#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

/// Lists one page of trips
///
/// # Arguments
/// * `database` - Database connection pool
/// * `query` - `page` and `pageSize` from the query string
///
/// # Returns
/// * `Result<Json<TripPage>, ApiError>` - The page, or 400 when the paging is invalid or past the end
#[axum::debug_handler]
pub async fn list_trips(
    Extension(database): Extension<Database>,
    query: Result<Query<TripsQuery>, QueryRejection>,
) -> Result<Json<TripPage>, ApiError> {
    let Query(query) = query?;
    let request = PageRequest::new(query.page, query.page_size)?;

    let page = database
        .run(move |conn| services::list_trips(conn, request))
        .await
        .inspect_err(|e| warn!("Listing page {} failed: {}", request.page, e))?;

    Ok(Json(page))
}

/// Deletes a client without trip registrations
///
/// # Returns
/// * `Result<Json<Client>, ApiError>` - The deleted client, 404 if unknown, 400 if it has trips
#[axum::debug_handler]
pub async fn delete_client(
    Extension(database): Extension<Database>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Client>, ApiError> {
    let Path(id) = id?;

    let client = database
        .run(move |conn| services::delete_client(conn, id))
        .await
        .inspect_err(|e| warn!("Deleting client {} failed: {}", id, e))?;

    info!("Deleted client {}", client.id_client);
    Ok(Json(client))
}

/// Creates a client and registers it to the trip named by the body's `IdTrip`
///
/// The body is validated before any storage access. The trip id in the path
/// is only compared with the body for logging.
#[axum::debug_handler]
pub async fn register_client(
    Extension(database): Extension<Database>,
    id_trip: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Path(id_trip) = id_trip?;
    let Json(body) = body?;
    let request = services::parse_registration(body)
        .inspect_err(|e| warn!("Rejected registration body for trip {}: {}", id_trip, e))?;
    if request.id_trip != id_trip {
        warn!(
            "Path names trip {} but body names trip {}; using the body",
            id_trip, request.id_trip
        );
    }

    let request_trip = request.id_trip;
    let now = Utc::now().naive_utc();
    let registration = database
        .run(move |conn| services::register_client(conn, &request, now))
        .await
        .inspect_err(|e| warn!("Registration to trip {} failed: {}", request_trip, e))?;

    info!(
        "Registered client {} to trip {}",
        registration.id_client, registration.id_trip
    );
    Ok(REGISTRATION_CONFIRMATION)
}
