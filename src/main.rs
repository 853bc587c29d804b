use clap::Parser;
use distributed_search::config::{Cli, Command};
use distributed_search::server::{run_frontend, run_shard};
use distributed_search::shutdown;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to listen for Ctrl+C: {}", e);
            // Keep the trigger alive; dropping it would stop everything.
            std::future::pending::<()>().await;
        }
        trigger.trigger();
    });

    match cli.command {
        Command::Frontend(config) => run_frontend(config, shutdown).await,
        Command::Shard(config) => run_shard(config, shutdown).await,
    }
}
