use crate::{create_router, AppState};
use cloudaudit_core::{CloudAuditError, Result, Settings};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(settings: &Settings) -> Result<Self> {
        let ip = settings.server.host.parse().map_err(|_| {
            CloudAuditError::Config(format!("invalid server.host: {}", settings.server.host))
        })?;
        let addr = SocketAddr::new(ip, settings.server.port);
        let state = AppState::new(settings)?;
        Ok(Self { state, addr })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting CloudAudit server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;

        info!("Server listening on http://{}", self.addr);
        info!("  GET  /            - Upload form");
        info!("  POST /            - Analyze an uploaded configuration file");
        info!("  POST /api/analyze - Analyze a JSON configuration body");
        info!("  GET  /health      - Health check");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
