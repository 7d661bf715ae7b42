pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "phone-review-api")]
#[command(about = "Phone review REST API server and maintenance commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Use the in-memory store instead of PostgreSQL")]
        memory: bool,
    },

    #[command(about = "Apply pending database migrations")]
    Migrate,

    #[command(about = "Insert the baseline roles and accounts")]
    Seed,

    #[command(about = "Issue a token for an account id")]
    Token {
        #[arg(help = "Account id")]
        account_id: i64,

        #[arg(long, help = "Issue a refresh token instead of an access token")]
        refresh: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { memory: false }) {
        Commands::Serve { memory } => commands::serve::handle(config, memory).await,
        Commands::Migrate => commands::database::migrate(&config, output_format).await,
        Commands::Seed => commands::database::seed(&config, output_format).await,
        Commands::Token { account_id, refresh } => {
            commands::token::handle(&config, account_id, refresh, output_format)
        }
    }
}
