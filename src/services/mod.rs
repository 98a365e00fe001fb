//! Operations exposed by the API
//!
//! This module contains:
//! - Paginated trip listing with countries and registered clients
//! - Client deletion guarded by existing registrations
//! - Registration of a new client to a trip, with request shape validation

mod clients;
mod registration;
mod trips;
mod validation;

pub use clients::*;
pub use registration::*;
pub use trips::*;
pub use validation::*;
