use anyhow::Context;
use clap::Parser;
use tickerset_catalog::utils::logger;
use tickerset_catalog::Catalog;

#[derive(Parser)]
#[command(name = "catalog-smoke")]
#[command(about = "Load a ticker set directory and resolve one identifier")]
struct Args {
    /// Directory of YAML definition files
    #[arg(default_value = "./ticker_sets")]
    dir: String,

    /// Identifier to resolve, as `group.set`
    #[arg(default_value = "ironcondor_friendly.all")]
    id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(false);

    let catalog = Catalog::load_dir(&args.dir)
        .await
        .with_context(|| format!("loading ticker sets from {}", args.dir))?;
    let resolved = catalog
        .resolve(&args.id)
        .with_context(|| format!("resolving {}", args.id))?;

    println!("{}", resolved.title);
    println!("{:?}", resolved.tickers);
    Ok(())
}
