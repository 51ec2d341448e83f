use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookrun::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("HOOKRUN_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.run().await
}
