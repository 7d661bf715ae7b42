use clap::Parser;
use tracing_subscriber::EnvFilter;

use phone_review_api::cli::{self, Cli};
use phone_review_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, API_SECRET, etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("phone_review_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting in {:?} mode", config.environment);

    if let Err(e) = cli::run(cli, config).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
