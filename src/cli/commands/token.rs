use crate::auth::TokenService;
use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Signs a token with the configured secret; the account is not looked up
pub fn handle(config: &AppConfig, account_id: i64, refresh: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let tokens = TokenService::from_config(&config.security)?;
    let token = if refresh {
        tokens.issue_refresh_token(account_id)?
    } else {
        tokens.issue_access_token(account_id)?
    };
    output_value(&output_format, "token", &token)
}
