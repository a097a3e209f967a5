use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rail_graph::config::ServerConfig;
use rail_graph::network::RailNetwork;
use rail_graph::snapshot::{InMemorySource, JsonFileSource, SnapshotSource, demo_network};
use rail_graph::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rail_graph=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let source: Arc<dyn SnapshotSource> = match &config.snapshot_path {
        Some(path) => {
            info!(path = %path.display(), "Serving snapshot file");
            Arc::new(JsonFileSource::new(path))
        }
        None => {
            info!("No snapshot configured, serving the demo network");
            Arc::new(InMemorySource::new(demo_network()))
        }
    };

    let network = RailNetwork::new(source, config.solver);

    // Fail fast on an unreadable snapshot
    let seeded = network.sync_inventory()?;
    info!(routes = seeded, "Seeded seat inventory");

    let app = create_router(AppState::new(network));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, max_iterations = config.solver.max_iterations, "Rail graph listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler; run until killed.
        std::future::pending::<()>().await;
    }
}
