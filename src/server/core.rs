use log::{error, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::server::routes::router;
use crate::server::state::AppState;

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Prepares the server root and binds the listener described by `config`
    pub async fn bind(config: ServerConfig) -> Result<Self, StartupError> {
        let state = AppState::from_config(&config)?;
        let socket = config.listen_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(StartupError::Bind(socket, e));
            }
        };

        Ok(Self { listener, state })
    }

    /// Loads configuration from `config_path` (plus env overrides), then binds
    pub async fn from_config_file(config_path: &str) -> Result<Self, StartupError> {
        let config = ServerConfig::load_from(config_path)?;
        Self::bind(config).await
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until Ctrl-C, then drains in-flight requests
    pub async fn start(self) -> io::Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serves until `signal` resolves
    pub async fn start_with_shutdown<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(
            "Starting file proxy on http://{} (root {})",
            addr,
            self.state.root().display()
        );

        let app = router(self.state);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        info!("File proxy on {} stopped", addr);
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
