//! Graph API access layer.
//!
//! [`GraphClient`] is the production HTTP implementation. The
//! [`CampaignApi`] trait is the seam between command logic and transport:
//! the adjuster and the command drivers take any implementation, so tests
//! substitute scripted doubles and never touch the network.

pub mod client;
pub mod types;

pub use client::GraphClient;

use async_trait::async_trait;

use crate::account::AccountId;
use crate::campaigns::insights::{DateRange, InsightWindow};
use crate::campaigns::types::{Campaign, CampaignSpec, CampaignStatus};
use crate::errors::Result;

/// Operations the campaign tooling needs from the Marketing API.
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// List campaigns in an account with field selection.
    ///
    /// When `status_filter` is set the filtering happens server-side.
    async fn list_campaigns(
        &self,
        account: &AccountId,
        status_filter: Option<CampaignStatus>,
        limit: usize,
    ) -> Result<Vec<Campaign>>;

    /// Fetch aggregated performance metrics for one campaign over a range.
    ///
    /// Returns `None` when the API has no insight rows for the window.
    async fn campaign_insights(
        &self,
        campaign_id: &str,
        range: &DateRange,
    ) -> Result<Option<InsightWindow>>;

    /// Set a campaign's daily budget, in integer minor units.
    async fn update_daily_budget(&self, campaign_id: &str, budget_minor: u64) -> Result<()>;

    /// Create a campaign, returning its new id.
    async fn create_campaign(&self, account: &AccountId, spec: &CampaignSpec) -> Result<String>;
}
