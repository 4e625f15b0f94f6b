use inventory_server::{telemetry, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::setup_tracing();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        addr = %addr,
        public_dir = %config.public_dir.display(),
        seeded = config.seed,
        "inventory server listening on http://{addr}"
    );
    for endpoint in [
        "GET /api/produtos",
        "GET /api/produtos/{id}",
        "POST /api/produtos",
        "PUT /api/produtos/{id}",
        "DELETE /api/produtos/{id}",
    ] {
        info!("endpoint {endpoint}");
    }

    inventory_server::run(listener, state).await?;
    Ok(())
}
