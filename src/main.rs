use biel_catalog::fetch::{self, SOURCES_FILE, Sources};
use biel_catalog::types::Language;
use biel_catalog::{compare, config, output, pipeline, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "biel-catalog")]
#[command(about = "Normalize the Door43 resource catalog and serve it over HTTP")]
#[command(long_about = "\
Normalize the Door43 resource catalog and serve it over HTTP

The upstream catalog, the language names table and any supplemental sources
are fetched, reshaped into one language → content → subcontent → link tree,
and served read-only.

Stages:

  fetch    upstream + supplements   →  <temp-dir>/sources.json
  build    <temp-dir>/sources.json  →  catalog.json
  serve    fetch + build, then serve /catalog, /catalog/upstream,
           /catalog/export and /health

Supplemental sources are JSON arrays of languages in the served shape. They
only fill gaps: nothing upstream provides is ever overwritten.

Set RUST_LOG (e.g. RUST_LOG=debug) for per-stage logging.

Run 'biel-catalog gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file (stock defaults are used when it doesn't exist)
    #[arg(long, default_value = "catalog.toml", global = true)]
    config: PathBuf,

    /// Directory for intermediate files (fetched sources)
    #[arg(long, default_value = ".biel-catalog-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the upstream catalog, language names and supplemental sources
    Fetch,
    /// Run the normalization pipeline over previously fetched sources
    Build {
        /// Where to write the normalized catalog
        #[arg(long, default_value = "catalog.json")]
        output: PathBuf,
    },
    /// Fetch, build, then serve the catalog over HTTP
    Serve,
    /// Show differences between two built catalogs
    Compare {
        /// Baseline catalog
        first: PathBuf,
        /// Catalog to compare against the baseline
        second: PathBuf,
    },
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sources_path = cli.temp_dir.join(SOURCES_FILE);

    match cli.command {
        Command::Fetch => {
            let app_config = config::load_config(&cli.config)?;
            let sources = fetch::fetch_sources(&app_config.sources)?;
            sources.save(&sources_path)?;
            info!(path = %sources_path.display(), "sources saved");
            let raw_languages = sources.raw_catalog()?.languages.len();
            output::print_fetch_output(&sources, raw_languages);
        }
        Command::Build { output: output_path } => {
            let app_config = config::load_config(&cli.config)?;
            let sources = Sources::load(&sources_path)?;
            let catalog = build(&sources, &app_config.catalog)?;
            std::fs::write(&output_path, serde_json::to_string_pretty(&catalog)?)?;
            output::print_build_output(&catalog, &output_path);
        }
        Command::Serve => {
            let app_config = config::load_config(&cli.config)?;
            // No partial mode: a failed fetch means nothing is served.
            let sources = fetch::fetch_sources(&app_config.sources)?;
            let catalog = build(&sources, &app_config.catalog)?;
            let snapshot = server::Snapshot::new(
                &sources.catalog,
                &catalog,
                app_config.server.export_path.clone(),
            )?;
            info!(digest = snapshot.digest(), "snapshot ready");

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(snapshot, &app_config.server.address()))?;
        }
        Command::Compare { first, second } => {
            let first = compare::load_catalog(&first)?;
            let second = compare::load_catalog(&second)?;
            output::print_differences(&compare::compare(&first, &second));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run the pipeline over fetched sources.
fn build(
    sources: &Sources,
    catalog: &config::CatalogConfig,
) -> Result<Vec<Language>, Box<dyn std::error::Error>> {
    let raw = sources.raw_catalog()?;
    let tree = pipeline::run(&raw, &sources.supplements, &sources.language_metadata, catalog);
    info!(languages = tree.len(), "catalog built");
    Ok(tree)
}
