use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oracle_config::{ConfigLoader, OracleConfig, ProviderKind};
use oracle_core::PriceAdapter;
use oracle_feeds::{ChainlinkFetcher, PriceFetcher, PythFetcher};
use oracle_registry::{SingleAdmin, SymbolRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;

#[derive(Parser)]
#[command(name = "pip-oracle")]
#[command(about = "Canonical pip price oracle service", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "ORACLE_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the oracle service
	Start,
	/// Validate the configuration file and registry entries
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level);

	match cli.command {
		Some(Commands::Start) | None => start_service(cli).await,
		Some(Commands::Validate) => validate_config(cli).await,
	}
}

fn setup_tracing(log_level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn start_service(cli: Cli) -> Result<()> {
	info!("Starting pip-oracle service");
	info!("Loading configuration from: {:?}", cli.config);

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	info!(
		name = %config.oracle.name,
		provider = ?config.provider.kind,
		symbols = config.registry.symbols.len(),
		"Configuration loaded"
	);

	let adapter = Arc::new(build_adapter(&config)?);

	api::serve(adapter, config.oracle.http_port).await
}

async fn validate_config(cli: Cli) -> Result<()> {
	info!("Validating configuration file: {:?}", cli.config);

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	// Building the adapter applies the same per-entry registry checks a
	// real deployment would, so a bad symbol table fails here too.
	build_adapter(&config)?;

	info!("Configuration is valid");
	Ok(())
}

fn build_adapter(config: &OracleConfig) -> Result<PriceAdapter> {
	let policy = Box::new(SingleAdmin::new(config.registry.admin));
	let registry = SymbolRegistry::with_entries(
		policy,
		config.registry.symbols.clone(),
		config.registry.feeds.clone(),
	)
	.context("Failed to build symbol registry")?;

	let fetcher: Arc<dyn PriceFetcher> = match config.provider.kind {
		ProviderKind::Chainlink => Arc::new(
			ChainlinkFetcher::new(&config.provider.rpc_url)
				.context("Failed to create aggregator fetcher")?,
		),
		ProviderKind::Pyth => {
			let contract = config
				.provider
				.contract
				.as_ref()
				.context("provider.contract is required for the pyth provider")?;
			Arc::new(
				PythFetcher::new(&config.provider.rpc_url, contract)
					.context("Failed to create price-id fetcher")?,
			)
		}
	};

	Ok(PriceAdapter::new(registry, fetcher))
}
