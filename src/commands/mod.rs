//! Subcommand implementations.
//!
//! Each driver resolves the credential, builds a [`crate::api::GraphClient`],
//! runs its flow, and formats the console output. Process exit codes are
//! decided in `main`.

pub mod adjust;
pub mod create;
pub mod list;

use crate::config::Config;
use crate::errors::Result;

/// Format a major-unit amount for display ("$12.34").
pub fn fmt_major(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Display the effective configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("\nadkit configuration\n");

    println!("API:");
    println!("  Endpoint: {}", config.api.endpoint);
    println!("  Version:  {}", config.api.version);
    println!("  Timeout:  {}s", config.api.timeout_secs);
    println!();

    println!("Defaults:");
    println!("  Adjustment: {}%", config.defaults.adjustment_percent);
    println!("  Lookback:   {} days", config.defaults.lookback_days);
    println!("  Page limit: {}", config.defaults.page_limit);
    println!();

    println!("Output:");
    println!("  Color:    {}", if config.output.color { "enabled" } else { "disabled" });
    println!("  CSV path: {}", config.output.csv_path);
    println!();

    Ok(())
}
