//! HTTP API for trips, clients and client registrations to trips, stored in SQLite.

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod schema;
pub mod services;
pub mod utils;
