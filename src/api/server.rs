use crate::api::routes;
use crate::config::ServerConfig;
use crate::db::Database;
use tracing::{info, warn};

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `config` - Address and port to listen on
/// * `database` - Database connection pool shared by the handlers
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok once the server has shut down, Error if binding or serving fails
pub async fn launch_server(
    config: &ServerConfig,
    database: Database,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::app(database);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
