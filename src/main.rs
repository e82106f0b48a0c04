use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lavacake::config::Config;
use lavacake::dispatcher::Dispatcher;
use lavacake::rate_limiter::RateLimiter;
use lavacake::routes;
use lavacake::server::Server;
use lavacake::upstream::HypixelClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lavacake", version, about = "Hypixel API gateway")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = Config::DEFAULT_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config).context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lavacake=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lavacake gateway");
    tracing::info!(
        hostname = %config.hostname,
        port = config.port,
        rate_limit_enabled = config.rate_limit_enabled,
        rate_limit_cap = config.rate_limit_cap,
        rate_limit_expires = config.rate_limit_expires,
        "Configuration loaded"
    );

    let token = std::env::var("API_TOKEN").unwrap_or_default();
    let client = HypixelClient::new(&token).context("Failed to create upstream client")?;

    let limiter = RateLimiter::new(
        config.rate_limit_enabled,
        config.rate_limit_cap,
        config.decay(),
    );
    let dispatcher = Arc::new(Dispatcher::new(routes::build_registry(client), limiter));

    Server::new(config, dispatcher)
        .run()
        .await
        .context("Server error")?;

    Ok(())
}
