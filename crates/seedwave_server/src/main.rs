//! seedwave-server — REST server for the Seedwave catalog.
//!
//! Reads config from env vars (a `.env` file is honoured):
//!   DATABASE_URL            — Postgres connection string (required unless --in-memory)
//!   DATABASE_POOL_SIZE      — pool size (default: 10)
//!   SEEDWAVE_BIND_ADDR      — listen address (default: 0.0.0.0:5000)
//!   SEEDWAVE_RUN_MIGRATIONS — apply embedded migrations at startup (default: true)

use std::sync::Arc;

use clap::Parser;
use seedwave_core::memory::InMemoryCatalogStore;
use seedwave_core::ports::CatalogStore;
use seedwave_core::seeds::{SeedBundle, SeedOptions, Seeder};
use seedwave_postgres::{DatabaseConfig, PgCatalogStore};
use seedwave_server::config::ServerConfig;
use seedwave_server::router::build_router;
use seedwave_server::state::AppState;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "seedwave-server", version, about = "Seedwave catalog REST server")]
struct Args {
    /// Serve from a seeded in-memory store instead of Postgres.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    seedwave_server::init_tracing();

    let args = Args::parse();
    let config = ServerConfig::from_env();

    let store: Arc<dyn CatalogStore> = if args.in_memory {
        let store = InMemoryCatalogStore::new();
        Seeder::new(&store)
            .run(&SeedBundle::standard(), SeedOptions::default())
            .await?;
        tracing::warn!("serving from in-memory store; data is lost on exit");
        Arc::new(store)
    } else {
        let db_config = match DatabaseConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("{e:#}");
                std::process::exit(1);
            }
        };
        let pool = seedwave_postgres::connect(&db_config).await?;
        if config.run_migrations {
            seedwave_postgres::run_migrations(&pool).await?;
        }
        Arc::new(PgCatalogStore::new(pool))
    };

    let app = build_router(AppState::new(store));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("seedwave-server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
