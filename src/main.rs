//! Latinitas - learning-progress tracking backend

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use latinitas::{config::Args, db::MongoClient, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("latinitas={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Latinitas - Latin learning backend");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!("Database: {}/{}", args.mongodb_uri, args.mongodb_db);

    // Connect to MongoDB; an unreachable server degrades to per-request errors
    let mongo = MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await?;

    let seed_vocab = args.seed_vocab;
    let state = Arc::new(server::AppState::new(args, mongo).await?);

    // Seed the vocabulary catalog when empty
    if seed_vocab {
        if let Err(e) = state.vocab.seed_if_empty().await {
            warn!("Vocabulary seeding skipped: {}", e);
        }
    }

    // Run until interrupted
    tokio::select! {
        result = server::run(Arc::clone(&state)) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}
