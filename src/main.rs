//! lbenrich CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leaderboard_enrichment::cli::{self, Cli, Commands};
use leaderboard_enrichment::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_fallback_logging();
            cli::handle_error(err, cli.json);
        }
    };

    let logger = match LogConfig::try_from(&config.logging).and_then(|log| LoggerImpl::init(&log)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            init_fallback_logging();
            tracing::warn!(error = %err, "falling back to default logging");
            None
        }
    };

    let result = match cli.command {
        Commands::Enrich(args) => cli::commands::enrich::execute(args, &config, cli.json).await,
        Commands::Config => cli::commands::config::execute(&config, cli.json),
    };

    if let Err(err) = result {
        // Exiting skips destructors, so flush file logs first.
        drop(logger);
        cli::handle_error(err, cli.json);
    }
}

fn init_fallback_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
