/// Page returned when the query string omits `page`
pub const DEFAULT_PAGE: i64 = 1;

/// Number of trips per page when the query string omits `pageSize`
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Upper bound on the length of every text field of a registration
pub const MAX_FIELD_LENGTH: usize = 120;

/// Body returned after a client has been registered to a trip
pub const REGISTRATION_CONFIRMATION: &str = "Client created and added to the trip";

pub const DEFAULT_DATABASE_PATH: &str = "tripdesk.db";

pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Milliseconds SQLite waits on a locked database before failing a statement
pub const SQLITE_BUSY_TIMEOUT_MS: u32 = 5000;

pub const LOG_FILE_NAME: &str = "tripdesk.log";
