pub mod models;
pub mod server;
pub mod cli;
pub mod store;

use cli::Args;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Environment: {}", args.node_env.as_deref().unwrap_or("-"));
    info!("Version: {}", args.app_version.as_deref().unwrap_or("-"));
    info!("Server Address: {}", args.server_addr());
    info!("Store Type: {}", args.store_type);
    info!("Message Key: {}", args.message_key);
    info!("-------------------------");

    let store = store::initialize_store(&args)?;
    let server = Server::new(&args, store);
    server.run().await?;

    Ok(())
}
