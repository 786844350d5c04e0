//! seedwave-seed — populate a Seedwave database with the standard catalog.
//!
//! Safe to re-run: rows that already exist are skipped.

use clap::Parser;
use seedwave_core::seeds::{SeedBundle, SeedOptions, Seeder};
use seedwave_postgres::{DatabaseConfig, PgCatalogStore};

#[derive(Debug, Parser)]
#[command(name = "seedwave-seed", version, about = "Seed the Seedwave catalog")]
struct Args {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Leave the legal documents table untouched.
    #[arg(long)]
    skip_legal: bool,

    /// Do not apply migrations before seeding.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    seedwave_server::init_tracing();
    let args = Args::parse();

    let pool = seedwave_postgres::connect(&DatabaseConfig::new(&args.database_url)).await?;
    if !args.skip_migrations {
        seedwave_postgres::run_migrations(&pool).await?;
    }

    let store = PgCatalogStore::new(pool);
    let report = Seeder::new(&store)
        .run(
            &SeedBundle::standard(),
            SeedOptions {
                skip_legal: args.skip_legal,
            },
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
