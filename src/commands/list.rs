//! `adkit list` - list campaigns with optional performance insights.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;

use crate::account::AccountId;
use crate::api::{CampaignApi, GraphClient};
use crate::campaigns::insights::{DateRange, InsightWindow};
use crate::campaigns::types::{format_minor_units, Campaign, CampaignStatus};
use crate::cli::Verbosity;
use crate::commands::fmt_major;
use crate::config::{self, Config};
use crate::errors::Result;

/// One campaign with its optionally fetched insight window.
type CampaignRow = (Campaign, Option<InsightWindow>);

/// List campaigns, print the table, and export the CSV.
pub async fn run(
    config: &Config,
    account_id: &str,
    limit: usize,
    output: Option<&Path>,
    show_insights: bool,
    lookback: u32,
    verbosity: Verbosity,
) -> Result<()> {
    let account = AccountId::parse(account_id)?;
    let token = config::access_token()?;
    let client = GraphClient::new(
        &config.api.endpoint,
        &config.api.version,
        token,
        config.api.timeout_secs,
    )?;

    println!("\nRetrieving campaigns for account: {}", account);

    let campaigns = client.list_campaigns(&account, None, limit).await?;
    if campaigns.is_empty() {
        println!("No campaigns found.");
        return Ok(());
    }

    println!("{} Found {} campaigns\n", "✓".green(), campaigns.len());

    let rows = if show_insights {
        fetch_insights(&client, campaigns, lookback, verbosity).await
    } else {
        campaigns.into_iter().map(|c| (c, None)).collect()
    };

    if verbosity.show_detail() {
        print_table(&rows, show_insights, lookback);
    }

    let csv_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| config.output.csv_path.clone().into());
    write_csv(&csv_path, &rows, show_insights)?;
    println!("\nExported to: {}", csv_path.display());

    print_summary(&rows);
    Ok(())
}

/// Fetch the insight window for each campaign in turn.
///
/// A per-campaign insight failure downgrades to a warning; the listing
/// itself already succeeded and the table is still useful without that
/// row's metrics.
async fn fetch_insights(
    client: &dyn CampaignApi,
    campaigns: Vec<Campaign>,
    lookback: u32,
    verbosity: Verbosity,
) -> Vec<CampaignRow> {
    let range = DateRange::lookback(lookback);

    let progress = if verbosity.show_progress() {
        let bar = ProgressBar::new(campaigns.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("Fetching insights");
        Some(bar)
    } else {
        None
    };

    let mut rows = Vec::with_capacity(campaigns.len());
    for campaign in campaigns {
        let window = match client.campaign_insights(&campaign.id, &range).await {
            Ok(window) => window,
            Err(err) => {
                eprintln!(
                    "{}: could not get insights for campaign {}: {}",
                    "Warning".yellow(),
                    campaign.id,
                    err
                );
                None
            }
        };
        rows.push((campaign, window));
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    rows
}

fn print_table(rows: &[CampaignRow], show_insights: bool, lookback: u32) {
    print!(
        "{:<18} {:<32} {:<9} {:>12} {:>12}",
        "ID", "Name", "Status", "Daily", "Lifetime"
    );
    if show_insights {
        print!(
            " {:>12} {:>12} {:>8}",
            format!("Spend ({}d)", lookback),
            "Impressions",
            "Clicks"
        );
    }
    println!();
    println!("{}", "-".repeat(if show_insights { 122 } else { 87 }));

    for (campaign, window) in rows {
        print!(
            "{:<18} {:<32} {:<9} {:>12} {:>12}",
            campaign.id,
            truncate(&campaign.name, 32),
            campaign.status,
            budget_cell(campaign.daily_budget),
            budget_cell(campaign.lifetime_budget),
        );
        if show_insights {
            match window {
                Some(window) => print!(
                    " {:>12} {:>12} {:>8}",
                    fmt_major(window.spend),
                    window.impressions,
                    window.clicks
                ),
                None => print!(" {:>12} {:>12} {:>8}", "N/A", "N/A", "N/A"),
            }
        }
        println!();
    }
}

fn print_summary(rows: &[CampaignRow]) {
    let active = rows
        .iter()
        .filter(|(c, _)| c.status == CampaignStatus::Active)
        .count();
    let paused = rows
        .iter()
        .filter(|(c, _)| c.status == CampaignStatus::Paused)
        .count();

    println!("\nSummary:");
    println!("  Total Campaigns: {}", rows.len());
    println!("  Active: {}", active);
    println!("  Paused: {}", paused);
    println!();
}

fn budget_cell(budget_minor: Option<u64>) -> String {
    match budget_minor {
        Some(minor) => format_minor_units(minor),
        None => "N/A".to_string(),
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let prefix: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", prefix)
    }
}

/// Write the campaign rows as CSV.
///
/// No pack-wide CSV dependency; the column set mirrors the console table
/// with a local quoting helper for names containing commas or quotes.
fn write_csv(path: &Path, rows: &[CampaignRow], show_insights: bool) -> Result<()> {
    let mut file = std::fs::File::create(path)?;

    let mut header = vec![
        "id",
        "name",
        "status",
        "daily_budget",
        "lifetime_budget",
        "objective",
        "buying_type",
        "created_time",
    ];
    if show_insights {
        header.extend(["spend", "impressions", "clicks"]);
    }
    writeln!(file, "{}", header.join(","))?;

    for (campaign, window) in rows {
        let mut fields = vec![
            csv_escape(&campaign.id),
            csv_escape(&campaign.name),
            csv_escape(campaign.status.as_api()),
            budget_cell(campaign.daily_budget),
            budget_cell(campaign.lifetime_budget),
            csv_escape(campaign.objective.as_deref().unwrap_or("")),
            csv_escape(campaign.buying_type.as_deref().unwrap_or("")),
            campaign
                .created_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        ];
        if show_insights {
            match window {
                Some(window) => {
                    fields.push(format!("{:.2}", window.spend));
                    fields.push(window.impressions.to_string());
                    fields.push(window.clicks.to_string());
                }
                None => fields.extend(["".to_string(), "".to_string(), "".to_string()]),
            }
        }
        writeln!(file, "{}", fields.join(","))?;
    }

    Ok(())
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
