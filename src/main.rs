use ad_lockout_backend::{
    config::{get_config, init_config},
    routes::build_router,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new()?;

    match app_state.ad_service.check_connection().await {
        Ok(()) => info!("Directory bind check passed"),
        Err(e) => tracing::warn!(error = %e, "Directory bind check failed; serving anyway"),
    }

    let app = build_router(app_state, config.admin_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
