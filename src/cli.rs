use clap::Parser;

/// Command line interface for the application
#[derive(Parser, Debug)]
#[command(name = "tripdesk", about = "HTTP API for trips, clients and trip registrations")]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long)]
    pub logging_level: Option<String>,

    /// Also write logs to a daily rotating file
    #[arg(long, default_value_t = false)]
    pub log_to_file: bool,

    /// Port the HTTP server listens on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path of the SQLite database file
    #[arg(long)]
    pub database_path: Option<String>,

    /// YAML file of trips and countries to insert at startup
    #[arg(long)]
    pub seed_file: Option<String>,
}
