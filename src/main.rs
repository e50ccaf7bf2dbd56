use clap::Parser;
use tracing_subscriber::EnvFilter;

use driver_relay::cli::Cli;
use driver_relay::config::Settings;
use driver_relay::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Fail fast: a missing credential or webhook variable aborts here with
    // the variable named, not inside the first request.
    let mut settings = Settings::from_env()?;
    cli.apply(&mut settings);

    Server::new(settings).run().await
}
