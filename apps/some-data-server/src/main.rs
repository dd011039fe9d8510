use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use api_gateway::{ApiGateway, ApiGatewayConfig};
use apikit::RestApiCapability;
use bootstrap::AppConfig;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use some_data::{SomeDataModule, SomeDataService};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Some Data Server - demo service with hardcoded data and interactive API docs
#[derive(Parser)]
#[command(name = "some-data-server")]
#[command(about = "Some Data Server - demo service with interactive API docs")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, &cli)?;

    bootstrap::init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Some Data Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
    }
}

/// CLI flags win over every other config source.
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Result<()> {
    config.apply_verbosity(cli.verbose);

    if let Some(port) = cli.port {
        let mut gateway: ApiGatewayConfig =
            config.module_config_or_default(api_gateway::MODULE_NAME)?;
        gateway.override_port(port);
        config.modules.insert(
            api_gateway::MODULE_NAME.to_owned(),
            serde_json::json!({ "config": serde_json::to_value(&gateway)? }),
        );
    }

    Ok(())
}

struct Composition {
    gateway: ApiGateway,
    some_data: SomeDataModule,
}

impl Composition {
    fn from_config(config: &AppConfig) -> Result<Self> {
        let gateway_cfg: ApiGatewayConfig =
            config.module_config_or_default(api_gateway::MODULE_NAME)?;
        tracing::debug!(?gateway_cfg, "Effective api_gateway configuration");

        Ok(Self {
            gateway: ApiGateway::new(gateway_cfg),
            some_data: SomeDataModule::new(Arc::new(SomeDataService::new())),
        })
    }

    fn router(&self) -> Result<axum::Router> {
        let modules: [&dyn RestApiCapability; 1] = [&self.some_data];
        self.gateway.build_router(&modules)
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    // Building the router validates module sections, CORS and the OpenAPI document
    let composition = Composition::from_config(config)?;
    composition.router()?;

    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<()> {
    let composition = Composition::from_config(config)?;
    let router = composition.router()?;

    let cancel = bootstrap::shutdown_token();
    composition.gateway.serve(router, cancel).await?;

    tracing::info!("Some Data Server stopped");
    Ok(())
}
