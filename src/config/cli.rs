use crate::config::toml_config::SyncConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "customer-sync")]
#[command(about = "One-shot sync of customer documents from MongoDB into PostgreSQL")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override source.uri
    #[arg(long)]
    pub source_uri: Option<String>,

    /// Override source.collection
    #[arg(long)]
    pub collection: Option<String>,

    /// Override target.url
    #[arg(long)]
    pub target_url: Option<String>,

    /// Override runner.concurrency
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Validate configuration and print a summary without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub fn load_config(&self) -> Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::default(),
        };

        if let Some(uri) = &self.source_uri {
            config.source.uri = uri.clone();
        }
        if let Some(collection) = &self.collection {
            config.source.collection = collection.clone();
        }
        if let Some(url) = &self.target_url {
            config.target.url = url.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.runner.concurrency = concurrency;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let args = CliArgs::parse_from([
            "customer-sync",
            "--collection",
            "clientes",
            "--target-url",
            "postgres://sync@db/crm",
            "--concurrency",
            "8",
        ]);

        let config = args.load_config().unwrap();
        assert_eq!(config.source.collection, "clientes");
        assert_eq!(config.source.database, "demo");
        assert_eq!(config.target.url, "postgres://sync@db/crm");
        assert_eq!(config.runner.concurrency, 8);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let args = CliArgs::parse_from(["customer-sync", "--config", "/nonexistent/sync.toml"]);
        assert!(args.load_config().is_err());
    }
}
