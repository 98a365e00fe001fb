//! API routes configuration module

use crate::api::handlers::{delete_client, list_trips, register_client};
use crate::db::Database;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Database connection pool to be shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database) -> Router {
    Router::new()
        .route("/trips", get(list_trips))
        .route("/trips/:id_trip/clients", post(register_client))
        .route("/clients/:id", delete(delete_client))
        .layer(Extension(database))
}
