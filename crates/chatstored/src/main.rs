//! ChatStore daemon - composition root for the table store
//!
//! Restores the store from its snapshot (or starts empty), hands it to the
//! chat repositories, then blocks until Ctrl+C. Shutdown fires the
//! cancellation token and waits for the snapshot completion channel before
//! exiting, so the final save is never lost to an early exit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chatstore::{
    fixtures, PrivateMessageRepo, PublicMessageRepo, UserRepo, NO_LIMIT,
};
use clap::Parser;
use tabledb::{save_on_shutdown, SnapshotManager};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot file path
    #[arg(short, long, default_value = "./data/chatstore.json")]
    snapshot: PathBuf,

    /// Seed the store with fixture data on startup
    #[arg(long)]
    load_fixtures: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting ChatStore daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Snapshot path: {:?}", args.snapshot);

    if let Some(dir) = args.snapshot.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let manager = SnapshotManager::new(&args.snapshot);
    let store = Arc::new(manager.load_or_empty());

    if args.load_fixtures {
        fixtures::load_fixtures(&store)?;
        info!("Fixtures loaded");
    }

    let users = UserRepo::new(Arc::clone(&store));
    let public_messages = PublicMessageRepo::new(Arc::clone(&store));
    let private_messages = PrivateMessageRepo::new(Arc::clone(&store));

    info!(
        "Store ready: {} users, {} public messages, {} private messages",
        users.get_all(0, NO_LIMIT).len(),
        public_messages.get_all(0, NO_LIMIT).len(),
        private_messages.get_all(0, NO_LIMIT).len(),
    );

    let shutdown = CancellationToken::new();
    let saved = save_on_shutdown(Arc::clone(&store), manager, shutdown.clone());

    info!("Press Ctrl+C to snapshot and exit");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    shutdown.cancel();

    // The process must observe the completion channel before exiting
    match saved.await {
        Ok(Ok(())) => info!("Snapshot saved, exiting"),
        Ok(Err(e)) => error!("Snapshot failed, recent writes are lost: {}", e),
        Err(_) => error!("Snapshot task dropped before completing"),
    }

    Ok(())
}
