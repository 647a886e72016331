//! `adkit create` - create campaigns from a JSON definition file.

use colored::Colorize;
use std::path::Path;
use std::time::Duration;

use crate::account::AccountId;
use crate::api::{CampaignApi, GraphClient};
use crate::campaigns::types::CampaignSpec;
use crate::config::{self, Config};
use crate::errors::{AdsError, Result};

/// Pause between creations so a large batch does not hammer the API.
const ITEM_DELAY: Duration = Duration::from_millis(500);

/// Create every campaign defined in `file`, returning the failure count.
///
/// Each item is attempted independently; a failed item is reported and
/// counted but never stops the batch. The caller maps a non-zero failure
/// count to a non-zero exit code.
pub async fn run(config: &Config, account_id: &str, file: &Path) -> Result<usize> {
    let account = AccountId::parse(account_id)?;
    let specs = load_specs(file)?;
    let token = config::access_token()?;
    let client = GraphClient::new(
        &config.api.endpoint,
        &config.api.version,
        token,
        config.api.timeout_secs,
    )?;

    let mut created = 0usize;
    let mut failed = 0usize;

    for (index, spec) in specs.iter().enumerate() {
        match client.create_campaign(&account, spec).await {
            Ok(id) => {
                created += 1;
                println!(
                    "{} Created campaign {}: {} (ID: {})",
                    "✓".green(),
                    index + 1,
                    spec.name,
                    id
                );
            }
            Err(err) => {
                failed += 1;
                eprintln!(
                    "{} Failed to create campaign {} ({}): {}",
                    "✗".red(),
                    index + 1,
                    spec.name,
                    err
                );
            }
        }

        if index + 1 < specs.len() {
            tokio::time::sleep(ITEM_DELAY).await;
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("Summary: {} created, {} failed", created, failed);
    println!("{}\n", "=".repeat(80));

    Ok(failed)
}

/// Parse the JSON definition file into campaign specs.
///
/// The file must contain a JSON array of campaign objects; anything else
/// is a configuration error raised before any network activity.
fn load_specs(file: &Path) -> Result<Vec<CampaignSpec>> {
    let contents = std::fs::read_to_string(file).map_err(|e| {
        AdsError::ConfigError(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    if !value.is_array() {
        return Err(AdsError::ConfigError(format!(
            "{} must contain a JSON array of campaign objects",
            file.display()
        )));
    }

    Ok(serde_json::from_value(value)?)
}
