use crate::{create_router, AppState, DOCS_UI_PATH};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(state: AppState, addr: SocketAddr) -> Self {
        Self { state, addr }
    }

    pub async fn run(self) -> Result<()> {
        tokio::fs::create_dir_all(self.state.store.root())
            .await
            .with_context(|| format!("creating output root {:?}", self.state.store.root()))?;

        info!("Starting Legacy Modernizer API on {}", self.addr);
        info!("Artifacts stored under {:?}", self.state.store.root());
        if !self.state.llm_configured() {
            warn!("POST /docs/generate-llm will answer 503 until an LLM credential is configured");
        }

        let router = create_router(self.state);

        let listener = {
            let socket = if self.addr.is_ipv6() {
                tokio::net::TcpSocket::new_v6()
            } else {
                tokio::net::TcpSocket::new_v4()
            }?;

            // Reuse addr to improve rebind under restarts
            let _ = socket.set_reuseaddr(true);
            let _ = socket.set_keepalive(true);

            socket
                .bind(self.addr)
                .with_context(|| format!("binding {}", self.addr))?;
            socket.listen(1024)?
        };

        info!("Server listening on http://{}", self.addr);
        info!("API documentation at http://{}{}", self.addr, DOCS_UI_PATH);
        info!("  POST /ingest/legacy-code - Upload legacy files, start a session");
        info!("  POST /docs/generate?session_id=<id> - Write documentation summary");
        info!("  POST /docs/generate-llm - Document a snippet with the LLM");
        info!("  GET  /evaluation/metrics?session_id=<id> - Documentation metrics");
        info!("  POST /codegen/generate?session_id=<id>&target_lang=<java|python>");
        info!("  POST /testgen/generate?session_id=<id>&target_lang=<java|python>");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("serving HTTP")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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

    // Give in-flight file writes a moment to finish their rename.
    tokio::time::sleep(Duration::from_millis(50)).await;
}
