//! adkit - Main CLI entry point

use anyhow::Result;
use clap::Parser;

use adkit::cli::{Args, Commands};
use adkit::commands;
use adkit::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.clone())?;
    let verbosity = args.verbosity();

    if !config.output.color {
        colored::control::set_override(false);
    }

    match &args.command {
        Commands::List {
            account_id,
            limit,
            output,
            show_insights,
            lookback,
        } => {
            commands::list::run(
                &config,
                account_id,
                config.defaults.resolve_limit(*limit),
                output.as_deref(),
                *show_insights,
                config.defaults.resolve_lookback(*lookback),
                verbosity,
            )
            .await?;
        }
        Commands::Create { account_id, file } => {
            let failed = commands::create::run(&config, account_id, file).await?;
            if failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Adjust {
            account_id,
            adjustment,
            lookback,
        } => {
            // Per-campaign failures inside the run are reported and tallied;
            // only configuration or listing errors surface here.
            commands::adjust::run(
                &config,
                account_id,
                config.defaults.resolve_adjustment(*adjustment),
                config.defaults.resolve_lookback(*lookback),
                verbosity,
            )
            .await?;
        }
        Commands::Config => {
            commands::show_config(&config)?;
        }
    }

    Ok(())
}
