use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tickerset_catalog::utils::error::ErrorSeverity;
use tickerset_catalog::utils::{logger, validation::Validate};
use tickerset_catalog::{Catalog, CatalogError, CatalogLoader, CliConfig, Command, LocalDirectory};

#[derive(Debug, Serialize)]
struct CheckReport {
    definitions_dir: String,
    loaded_at: DateTime<Utc>,
    groups: usize,
    sets: usize,
    broken: Vec<BrokenSet>,
}

#[derive(Debug, Serialize)]
struct BrokenSet {
    id: String,
    error: String,
}

fn exit_code(e: &CatalogError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: CatalogError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CatalogError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(
    command: &Command,
    catalog: &Catalog,
    definitions_dir: &str,
    loaded_at: DateTime<Utc>,
) -> Result<(), CatalogError> {
    match command {
        Command::Resolve { id } => {
            let resolved = catalog.resolve(id)?;
            tracing::info!("Resolved {} to {} tickers", id, resolved.tickers.len());
            print_json(&resolved)
        }
        Command::List => print_json(&catalog.listing()),
        Command::Check => {
            let broken: Vec<BrokenSet> = catalog
                .broken_sets()
                .into_iter()
                .map(|(id, e)| BrokenSet {
                    id,
                    error: e.to_string(),
                })
                .collect();
            if broken.is_empty() {
                tracing::info!("✅ All {} sets resolve", catalog.set_count());
            } else {
                tracing::warn!("{} sets fail to resolve", broken.len());
            }
            print_json(&CheckReport {
                definitions_dir: definitions_dir.to_string(),
                loaded_at,
                groups: catalog.group_count(),
                sets: catalog.set_count(),
                broken,
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.catalog_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    logger::init_logger(cli.verbose, config.logging.level.as_deref(), config.log_format());
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }

    let catalog = match CatalogLoader::new(LocalDirectory::new(config.definitions_dir()))
        .with_max_include_depth(config.max_include_depth())
        .load()
        .await
    {
        Ok(catalog) => catalog,
        Err(e) => fail(e),
    };
    let loaded_at = Utc::now();

    if let Err(e) = run(&cli.command, &catalog, config.definitions_dir(), loaded_at) {
        fail(e);
    }

    Ok(())
}
