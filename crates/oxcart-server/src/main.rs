//! Oxcart server binary.

use anyhow::Result;
use clap::Parser;
use oxcart_db::Db;
use oxcart_server::{router, AppState};
use oxcart_store::{ensure_schema, fixtures, shared};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shopping-cart backend: products, carts, and line-item merging over
/// SQLite.
#[derive(Parser)]
#[command(name = "oxcart")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// SQLite database path
    #[arg(long, default_value = "oxcart.db")]
    db: PathBuf,

    /// Seed the catalog with starter products if it is empty
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = shared(Db::open(&cli.db)?);
    ensure_schema(&db)?;

    let state = AppState::new(db);
    if cli.seed {
        let created = fixtures::seed(state.service.products())?;
        tracing::info!(created, "seed pass finished");
    }

    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    tracing::info!(addr = %cli.addr, db = %cli.db.display(), "oxcart listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
