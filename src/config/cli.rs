use super::toml_config::CatalogConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "tickerset")]
#[command(about = "Resolve ticker set identifiers from a directory of YAML definitions")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Definitions directory (overrides the configuration file)
    #[arg(short, long)]
    pub dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve one `group.set` identifier
    Resolve { id: String },
    /// List every set with its resolved tickers
    List,
    /// Load the catalog and report broken sets
    Check,
}

impl CliConfig {
    /// File configuration with command-line overrides applied.
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::default(),
        };
        if let Some(dir) = &self.dir {
            config.catalog.definitions_dir = dir.clone();
        }
        if self.json_logs {
            config.logging.format = Some("json".to_string());
        }
        Ok(config)
    }
}
