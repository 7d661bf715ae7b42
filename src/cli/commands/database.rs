use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::manager::DatabaseManager;
use crate::database::{seed as seed_data, PgStore};

pub async fn migrate(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    output_success(&output_format, "Migrations applied", None)
}

pub async fn seed(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    let report = seed_data::seed(&PgStore::new(pool)).await?;

    output_success(
        &output_format,
        &format!(
            "Seed complete: {} role(s), {} account(s) created",
            report.roles_created, report.accounts_created
        ),
        Some(json!({
            "roles_created": report.roles_created,
            "accounts_created": report.accounts_created,
        })),
    )
}
