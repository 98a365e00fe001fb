use diesel::result::Error as DieselError;

/// Business rules that refuse an otherwise well-formed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("Page number is too high")]
    PageTooHigh,
    #[error("Client has trips assigned")]
    ClientHasTrips,
    #[error("Client already exists")]
    ClientAlreadyExists,
    #[error("Client is already assigned to a trip")]
    ClientAlreadyAssigned,
    #[error("Trip has already started")]
    TripAlreadyStarted,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),
    #[error("Blocking task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Rejected(#[from] RuleViolation),
}
