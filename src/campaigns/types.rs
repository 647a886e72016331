//! Campaign snapshot and creation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery status of a campaign.
///
/// ACTIVE and PAUSED are the statuses the tooling acts on; anything else
/// the API reports is passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Active,
    Paused,
    Other(String),
}

impl CampaignStatus {
    /// Parse the status string the API returns.
    pub fn from_api(value: &str) -> Self {
        match value {
            "ACTIVE" => CampaignStatus::Active,
            "PAUSED" => CampaignStatus::Paused,
            other => CampaignStatus::Other(other.to_string()),
        }
    }

    /// The string form the API expects in fields and filters.
    pub fn as_api(&self) -> &str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api())
    }
}

/// Read-only snapshot of a campaign as returned by the listing call.
///
/// Budgets are integer minor currency units (cents); display layers divide
/// by 100. The vendor system is the sole source of truth, so nothing here
/// is persisted locally.
#[derive(Debug, Clone)]
pub struct Campaign {
    /// Opaque campaign identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Delivery status
    pub status: CampaignStatus,

    /// Daily budget in minor units, if the campaign has one
    pub daily_budget: Option<u64>,

    /// Lifetime budget in minor units, if the campaign has one
    pub lifetime_budget: Option<u64>,

    /// Advertising objective (e.g. "REACH")
    pub objective: Option<String>,

    /// Buying type (e.g. "AUCTION")
    pub buying_type: Option<String>,

    /// Creation timestamp
    pub created_time: Option<DateTime<Utc>>,
}

/// Campaign definition consumed by the create flow.
///
/// The JSON file carries `daily_budget` in major currency units; the API
/// takes minor units, so [`CampaignSpec::daily_budget_minor`] converts on
/// the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSpec {
    /// Campaign display name
    pub name: String,

    /// Advertising objective (e.g. "REACH", "OUTCOME_TRAFFIC")
    pub objective: String,

    /// Daily budget in major currency units
    #[serde(default)]
    pub daily_budget: Option<f64>,

    /// Initial status; new campaigns default to PAUSED
    #[serde(default = "default_spec_status")]
    pub status: String,
}

fn default_spec_status() -> String {
    "PAUSED".to_string()
}

impl CampaignSpec {
    /// Daily budget converted to integer minor units.
    pub fn daily_budget_minor(&self) -> Option<u64> {
        self.daily_budget.map(|major| (major * 100.0).round() as u64)
    }
}

/// Format an integer minor-unit amount for display ("$12.34").
pub fn format_minor_units(minor: u64) -> String {
    format!("${:.2}", minor as f64 / 100.0)
}
