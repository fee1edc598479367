//! File proxy - Entry Point
//!
//! Serves filesystem operations confined to a single root directory over HTTP.

use env_logger::Env;
use log::{error, info};
use std::process;

use fileproxy_server::Server;
use fileproxy_server::config::DEFAULT_CONFIG_PATH;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Launching file proxy...");

    let server = match Server::from_config_file(DEFAULT_CONFIG_PATH).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server terminated: {}", e);
        process::exit(1);
    }
}
