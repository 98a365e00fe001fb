//! Main entry point for the application.
//!
//! This module parses the command line, loads environment variables and
//! configuration, initializes logging, opens the database and serves the API.

use clap::Parser;
use tracing::{error, info, warn};
use tripdesk::{api, cli, config, db, utils};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Load environment variables and configuration
/// 3. Initialize logging system
/// 4. Open the database, seeding reference data if asked to
/// 5. Serve the API until shutdown
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let dotenv = dotenvy::dotenv();

    let app_config = config::resolve_config(&cli, std::env::var("DATABASE_PATH").ok())?;
    utils::init_logging(&app_config.logging);

    if let Err(e) = dotenv {
        warn!("Failed to load .env file: {}", e);
    }

    info!("Opening database at {}", app_config.database.path);
    let database = db::Database::from_config(&app_config.database)?;

    if let Some(seed_file) = app_config.database.seed_file.clone() {
        let data = db::seed::load_reference_data(&seed_file)?;
        let seeded = database
            .run(move |conn| db::seed::seed_reference_data(conn, &data))
            .await?;
        info!("Reference data ready: {} trips from {}", seeded.len(), seed_file);
    }

    if let Err(e) = api::server::launch_server(&app_config.server, database).await {
        error!("Server failed: {}", e);
        return Err(e);
    }
    Ok(())
}
