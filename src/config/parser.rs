use super::AppConfig;
use crate::cli::Cli;
use std::error::Error;
use std::fs;

use tracing::info;

/// Loads and parses the service configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Result<AppConfig, Box<dyn Error>>` - The parsed AppConfig on success, or an error if loading/parsing fails
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into an AppConfig
pub fn load_app_config(file_path: &str) -> Result<AppConfig, Box<dyn Error>> {
    let yaml_str = fs::read_to_string(file_path)?;
    let app_config: AppConfig = serde_yaml::from_str(&yaml_str)?;
    info!("Loaded configuration from {}", file_path);
    Ok(app_config)
}

/// Builds the effective configuration: defaults, then the YAML file,
/// then `DATABASE_PATH` from the environment, then command line flags
pub fn resolve_config(
    cli: &Cli,
    database_path_env: Option<String>,
) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => load_app_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(path) = database_path_env {
        config.database.path = path;
    }

    if let Some(level) = &cli.logging_level {
        config.logging.level = level.clone();
    }
    if cli.log_to_file {
        config.logging.file = true;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(path) = &cli.database_path {
        config.database.path = path.clone();
    }
    if let Some(seed) = &cli.seed_file {
        config.database.seed_file = Some(seed.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_yaml::from_str("server:\n  port: 8081\n").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "tripdesk.db");
        assert!(config.database.bootstrap_schema);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn flags_override_environment_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database:\n  path: from-file.db\n  pool_size: 2\nlogging:\n  level: warn"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from(["tripdesk", "--config", path.as_str(), "--port", "9000"]);
        let config = resolve_config(&cli, Some("from-env.db".to_string())).unwrap();
        assert_eq!(config.database.path, "from-env.db");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.server.port, 9000);

        let cli = Cli::parse_from([
            "tripdesk",
            "--config",
            path.as_str(),
            "--database-path",
            "from-flag.db",
            "--logging-level",
            "debug",
        ]);
        let config = resolve_config(&cli, Some("from-env.db".to_string())).unwrap();
        assert_eq!(config.database.path, "from-flag.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(load_app_config("/nonexistent/tripdesk.yaml").is_err());
    }
}
