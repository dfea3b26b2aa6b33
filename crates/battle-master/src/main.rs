//! Master process entry point.

use anyhow::Result;

use battle_master::config::Config;
use battle_master::master;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        max_clients = config.max_clients,
        room = %config.room_id,
        "starting battle-master"
    );

    master::run(config).await
}
