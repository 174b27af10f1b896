use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};

use club_tracker_backend::storage::MemoryStore;
use club_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // In-process store; the hosted client drops in behind the same trait
    let store = Arc::new(MemoryStore::new());

    let app_state = initialize_backend(store).await?;
    let app = create_router(app_state);

    // Start the server
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
