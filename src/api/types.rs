//! Wire types for the Meta Marketing Graph API.
//!
//! The API reports numbers as strings ("daily_budget": "10000",
//! "spend": "49.73"); everything is parsed into typed domain snapshots
//! here so the rest of the crate never sees the raw shapes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::campaigns::insights::InsightWindow;
use crate::campaigns::types::{Campaign, CampaignStatus};

/// Paged list envelope (`{"data": [...], "paging": {...}}`).
#[derive(Debug, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,

    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Cursor-based paging metadata.
#[derive(Debug, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

/// Campaign node as returned by `GET /<account>/campaigns`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignNode {
    pub id: String,

    pub name: String,

    pub status: String,

    #[serde(default)]
    pub daily_budget: Option<String>,

    #[serde(default)]
    pub lifetime_budget: Option<String>,

    #[serde(default)]
    pub objective: Option<String>,

    #[serde(default)]
    pub buying_type: Option<String>,

    /// e.g. "2026-01-15T09:30:00+0000"
    #[serde(default)]
    pub created_time: Option<String>,
}

impl From<CampaignNode> for Campaign {
    fn from(node: CampaignNode) -> Self {
        Campaign {
            status: CampaignStatus::from_api(&node.status),
            daily_budget: parse_minor_units(node.daily_budget.as_deref()),
            lifetime_budget: parse_minor_units(node.lifetime_budget.as_deref()),
            created_time: node
                .created_time
                .as_deref()
                .and_then(parse_graph_timestamp),
            id: node.id,
            name: node.name,
            objective: node.objective,
            buying_type: node.buying_type,
        }
    }
}

/// One row from `GET /<campaign>/insights`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightRow {
    #[serde(default)]
    pub spend: Option<String>,

    #[serde(default)]
    pub impressions: Option<String>,

    #[serde(default)]
    pub clicks: Option<String>,

    #[serde(default)]
    pub actions: Vec<ActionStat>,
}

/// One action-type count inside an insight row.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionStat {
    pub action_type: String,

    #[serde(default)]
    pub value: Option<String>,
}

impl InsightRow {
    /// Collapse a wire row into the domain metrics window.
    ///
    /// Conversions are the sum of all action values; unparseable values
    /// count as zero and oversized totals saturate rather than failing
    /// the campaign.
    pub fn into_window(self) -> InsightWindow {
        let conversions = self
            .actions
            .iter()
            .filter_map(|action| action.value.as_deref())
            .filter_map(|value| value.parse::<u64>().ok())
            .fold(0u64, u64::saturating_add);

        InsightWindow {
            spend: parse_decimal(self.spend.as_deref()),
            conversions,
            impressions: parse_count(self.impressions.as_deref()),
            clicks: parse_count(self.clicks.as_deref()),
        }
    }
}

/// Response to a campaign creation (`{"id": "..."}`).
#[derive(Debug, Deserialize)]
pub struct CreateCampaignResponse {
    pub id: String,
}

/// Response to a campaign field update (`{"success": true}`).
#[derive(Debug, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub success: bool,
}

/// Graph API error envelope (`{"error": {...}}`).
#[derive(Debug, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

/// Body of a Graph API error.
#[derive(Debug, Deserialize)]
pub struct GraphErrorBody {
    #[serde(default)]
    pub message: String,

    #[serde(rename = "type", default)]
    pub error_type: String,

    #[serde(default)]
    pub code: i64,
}

fn parse_minor_units(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.parse::<u64>().ok())
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0)
}

fn parse_decimal(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0)
}

// The API emits offsets without a colon ("+0000"), which RFC 3339 parsing
// rejects, so created_time goes through an explicit format string.
fn parse_graph_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
