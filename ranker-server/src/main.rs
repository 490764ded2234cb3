//! # Ranker Server
//!
//! Serves the Ranker catalog over HTTP.
//!
//! - **Listings**: every category, ranked by upvotes, with a spotlight work
//! - **Curation**: logged-in users create, edit and delete works
//! - **Upvotes**: one per user and work
//!
//! Storage is PostgreSQL through sqlx. `--in-memory` swaps in the volatile
//! store for local development.

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ranker_core::database::{
    InMemoryDatabase, PostgresDatabase, context::DatabaseContext,
};
use ranker_server::{
    AppState, create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader},
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "ranker-server")]
#[command(about = "Catalog of albums, books and movies ranked by upvotes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a ranker.toml file
    #[arg(long, env = "RANKER_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Serve from a volatile in-memory store instead of PostgreSQL
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        return run_db_migrate(&config).await;
    }

    run_server(config, cli.serve.in_memory).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

fn require_database_url(config: &Config) -> anyhow::Result<&str> {
    let url = config.database.url.as_deref().ok_or_else(|| {
        error!("DATABASE_URL or DATABASE_HOST/DATABASE_USER/DATABASE_NAME must be provided");
        anyhow::anyhow!("No PostgreSQL connection configuration found")
    })?;

    if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
        return Err(anyhow::anyhow!(
            "Invalid database URL: must start with postgres:// or postgresql://"
        ));
    }

    Ok(url)
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let url = require_database_url(config)?;
    let pg = PostgresDatabase::new(url)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    pg.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn connect_database(
    config: &Config,
    in_memory: bool,
) -> anyhow::Result<DatabaseContext> {
    if in_memory {
        warn!("serving from the in-memory store; data is lost on shutdown");
        return DatabaseContext::in_memory(&InMemoryDatabase::new())
            .context("failed to build in-memory store");
    }

    let url = require_database_url(config)?;
    let context =
        DatabaseContext::connect_postgres(url, config.database.max_connections)
            .await
            .context("failed to connect to PostgreSQL")?;
    info!("Successfully connected to PostgreSQL");

    if let Some(postgres) = context.postgres() {
        postgres
            .initialize_schema()
            .await
            .context("database migration failed")?;
    }

    Ok(context)
}

async fn run_server(config: Config, in_memory: bool) -> anyhow::Result<()> {
    let database = connect_database(&config, in_memory).await?;
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;

    let state = AppState::new(database, config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Ranker server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
