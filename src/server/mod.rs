pub mod api;
pub mod resp;

use crate::cli::Args;
use crate::store::ListStore;
use self::api::AppState;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use log::{ info, error };

pub struct Server {
    addr: String,
    state: AppState,
}

impl Server {
    pub fn new(args: &Args, store: Arc<dyn ListStore>) -> Self {
        Self {
            addr: args.server_addr(),
            state: AppState::new(store, args),
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let listener = TcpListener::bind(&self.addr).await.map_err(|e|
            format!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e)
        )?;
        info!("HTTP server listening on: http://{}", listener.local_addr()?);

        axum::serve(listener, api::app(self.state.clone()).into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
