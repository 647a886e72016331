//! `adkit adjust` - scale daily budgets of active campaigns.

use colored::Colorize;

use crate::account::AccountId;
use crate::adjust::{AdjustSummary, BudgetAdjuster, CampaignOutcome, SkipReason};
use crate::api::GraphClient;
use crate::campaigns::types::format_minor_units;
use crate::cli::Verbosity;
use crate::commands::fmt_major;
use crate::config::{self, Config};
use crate::errors::Result;

/// Run the budget adjustment and print the per-campaign report.
///
/// Per-campaign failures are reported and tallied but do not error the
/// command; only configuration problems and a failed campaign listing do.
/// Error lines go to stderr at every verbosity; quiet mode only drops the
/// per-campaign detail.
pub async fn run(
    config: &Config,
    account_id: &str,
    adjustment: i32,
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

    let adjuster = BudgetAdjuster::new(&client).with_page_limit(config.defaults.page_limit);
    let summary = adjuster.adjust_budgets(&account, adjustment, lookback).await?;

    let report = render_report(&summary, adjustment, lookback, verbosity);
    for line in &report.detail {
        println!("{}", line);
    }
    for line in &report.errors {
        eprintln!("{}", line);
    }

    println!(
        "\nSummary: {} campaigns updated, {} skipped, {} errors\n",
        summary.updated, summary.skipped, summary.errors
    );

    Ok(())
}

/// Console lines for one run: per-campaign detail destined for stdout,
/// error lines destined for stderr.
#[derive(Debug, Default)]
struct RenderedReport {
    detail: Vec<String>,
    errors: Vec<String>,
}

fn render_report(
    summary: &AdjustSummary,
    adjustment: i32,
    lookback: u32,
    verbosity: Verbosity,
) -> RenderedReport {
    let show_detail = verbosity.show_detail();
    let mut report = RenderedReport::default();

    if show_detail {
        report.detail.push(format!(
            "\nAnalyzing {} campaigns (lookback: {} days)\n",
            summary.analyzed, lookback
        ));
        report.detail.push("=".repeat(80));
    }

    for outcome in &summary.outcomes {
        match outcome {
            CampaignOutcome::Updated {
                id,
                name,
                old_budget,
                new_budget,
                spend,
                conversions,
                cpa,
            } if show_detail => {
                report
                    .detail
                    .push(format!("Campaign: {} (ID: {})", name, id));
                report
                    .detail
                    .push(format!("  Current Budget: {}", format_minor_units(*old_budget)));
                report
                    .detail
                    .push(format!("  Spend (last {}d): {}", lookback, fmt_major(*spend)));
                report.detail.push(format!("  Conversions: {}", conversions));
                report.detail.push(match cpa {
                    Some(value) => format!("  CPA: {}", fmt_major(*value)),
                    None => "  CPA: n/a (no conversions)".to_string(),
                });
                report.detail.push(format!(
                    "  {} Updated budget: {} ({:+}%)",
                    "✓".green(),
                    format_minor_units(*new_budget),
                    adjustment
                ));
            }
            CampaignOutcome::Skipped { id, name, reason } if show_detail => {
                report
                    .detail
                    .push(format!("Campaign: {} (ID: {})", name, id));
                report
                    .detail
                    .push(format!("  {} (skipped)", skip_message(reason)));
            }
            // Failures always carry the campaign identifier and are never
            // suppressed by verbosity.
            CampaignOutcome::Failed { id, name, error } => {
                report.errors.push(format!(
                    "{} Error updating campaign {} (ID: {}): {}",
                    "✗".red(),
                    name,
                    id,
                    error
                ));
            }
            _ => {}
        }
        if show_detail {
            report.detail.push("-".repeat(80));
        }
    }

    report
}

fn skip_message(reason: &SkipReason) -> &'static str {
    match reason {
        SkipReason::NoInsights => "No insight data for the window",
        SkipReason::NoSpend => "No spend data",
        SkipReason::NoDailyBudget => "No daily budget set",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(outcomes: Vec<CampaignOutcome>) -> AdjustSummary {
        let mut summary = AdjustSummary {
            analyzed: outcomes.len(),
            ..Default::default()
        };
        for outcome in &outcomes {
            match outcome {
                CampaignOutcome::Updated { .. } => summary.updated += 1,
                CampaignOutcome::Skipped { .. } => summary.skipped += 1,
                CampaignOutcome::Failed { .. } => summary.errors += 1,
            }
        }
        summary.outcomes = outcomes;
        summary
    }

    fn updated(id: &str) -> CampaignOutcome {
        CampaignOutcome::Updated {
            id: id.to_string(),
            name: format!("campaign-{}", id),
            old_budget: 10000,
            new_budget: 11000,
            spend: 50.0,
            conversions: 5,
            cpa: Some(10.0),
        }
    }

    fn failed(id: &str) -> CampaignOutcome {
        CampaignOutcome::Failed {
            id: id.to_string(),
            name: format!("campaign-{}", id),
            error: "User request limit reached".to_string(),
        }
    }

    #[test]
    fn test_quiet_mode_still_reports_failures() {
        let summary = summary_with(vec![updated("c1"), failed("c2")]);
        let report = render_report(&summary, 10, 7, Verbosity::Quiet);

        assert!(report.detail.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("(ID: c2)"));
        assert!(report.errors[0].contains("User request limit reached"));
    }

    #[test]
    fn test_normal_mode_splits_detail_and_errors() {
        let summary = summary_with(vec![updated("c1"), failed("c2")]);
        let report = render_report(&summary, 10, 7, Verbosity::Normal);

        assert!(report.detail.iter().any(|l| l.contains("(ID: c1)")));
        assert!(report.detail.iter().any(|l| l.contains("$110.00")));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("(ID: c2)"));
        // failures live on the error side, not in the detail block
        assert!(!report.detail.iter().any(|l| l.contains("(ID: c2)")));
    }

    #[test]
    fn test_skip_lines_only_in_detail() {
        let summary = summary_with(vec![CampaignOutcome::Skipped {
            id: "c3".to_string(),
            name: "Dormant".to_string(),
            reason: SkipReason::NoSpend,
        }]);

        let quiet = render_report(&summary, 10, 7, Verbosity::Quiet);
        assert!(quiet.detail.is_empty());
        assert!(quiet.errors.is_empty());

        let normal = render_report(&summary, 10, 7, Verbosity::Normal);
        assert!(normal.detail.iter().any(|l| l.contains("No spend data")));
    }

    #[test]
    fn test_undefined_cpa_rendered_as_na() {
        let outcome = CampaignOutcome::Updated {
            id: "c1".to_string(),
            name: "NoConversions".to_string(),
            old_budget: 8000,
            new_budget: 10000,
            spend: 33.0,
            conversions: 0,
            cpa: None,
        };
        let report = render_report(&summary_with(vec![outcome]), 25, 7, Verbosity::Normal);
        assert!(report
            .detail
            .iter()
            .any(|l| l.contains("n/a (no conversions)")));
    }
}
