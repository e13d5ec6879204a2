//! Serve command implementation
//!
//! Runs the HTTP server until Ctrl+C / SIGTERM, then drains in-flight
//! requests.

use crate::cli::resolve_config;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the listening address (e.g. 0.0.0.0:8080)
    #[arg(long)]
    pub addr: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(addr) = &self.addr {
            tracing::info!(addr = %addr, "Overriding listening address from CLI");
            config.server.entry_addr = addr.clone();
            if let Err(e) = config.validate() {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        }

        server::serve(&config, shutdown_signal).await?;
        Ok(0)
    }
}
