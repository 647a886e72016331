//! HTTP client for the Meta Marketing Graph API.
//!
//! A thin reqwest wrapper: every method builds one URL, issues one
//! request, and decodes either the typed payload or the Graph error
//! envelope. No retries; a failed attempt is final for the run.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use crate::account::AccountId;
use crate::api::types::{
    CampaignNode, CreateCampaignResponse, GraphErrorEnvelope, InsightRow, Paged, UpdateResponse,
};
use crate::api::CampaignApi;
use crate::campaigns::insights::{DateRange, InsightWindow};
use crate::campaigns::types::{Campaign, CampaignSpec, CampaignStatus};
use crate::errors::{AdsError, Result};

use async_trait::async_trait;

/// Fields requested from the campaign listing endpoint.
const CAMPAIGN_FIELDS: &str =
    "id,name,status,daily_budget,lifetime_budget,objective,buying_type,created_time";

/// Fields requested from the insights endpoint.
const INSIGHT_FIELDS: &str = "spend,impressions,clicks,actions";

/// Authenticated Graph API client.
pub struct GraphClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    /// Build a client for `endpoint` (e.g. "https://graph.facebook.com")
    /// and `version` (e.g. "v19.0").
    pub fn new(
        endpoint: &str,
        version: &str,
        access_token: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/{}", endpoint.trim_end_matches('/'), version),
            access_token,
        })
    }

    /// Decode a successful payload or map the Graph error envelope.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<GraphErrorEnvelope>(&body) {
            Ok(envelope) => Err(AdsError::ApiError {
                code: envelope.error.code,
                message: envelope.error.message,
            }),
            Err(_) => Err(AdsError::ApiError {
                code: i64::from(status.as_u16()),
                message: format!("HTTP {}: {}", status, body),
            }),
        }
    }
}

#[async_trait]
impl CampaignApi for GraphClient {
    async fn list_campaigns(
        &self,
        account: &AccountId,
        status_filter: Option<CampaignStatus>,
        limit: usize,
    ) -> Result<Vec<Campaign>> {
        let url = format!("{}/{}/campaigns", self.base_url, account.as_str());

        let mut query: Vec<(&str, String)> = vec![
            ("fields", CAMPAIGN_FIELDS.to_string()),
            ("limit", limit.to_string()),
            ("access_token", self.access_token.clone()),
        ];

        if let Some(status) = status_filter {
            let filtering = json!([{
                "field": "status",
                "operator": "IN",
                "value": [status.as_api()],
            }]);
            query.push(("filtering", filtering.to_string()));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let page: Paged<CampaignNode> = Self::decode(response).await?;

        Ok(page.data.into_iter().map(Campaign::from).collect())
    }

    async fn campaign_insights(
        &self,
        campaign_id: &str,
        range: &DateRange,
    ) -> Result<Option<InsightWindow>> {
        let url = format!("{}/{}/insights", self.base_url, campaign_id);
        let time_range = json!({
            "since": range.since_str(),
            "until": range.until_str(),
        });

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", INSIGHT_FIELDS.to_string()),
                ("time_range", time_range.to_string()),
                ("access_token", self.access_token.clone()),
            ])
            .send()
            .await?;

        let page: Paged<InsightRow> = Self::decode(response).await?;
        Ok(page.data.into_iter().next().map(InsightRow::into_window))
    }

    async fn update_daily_budget(&self, campaign_id: &str, budget_minor: u64) -> Result<()> {
        let url = format!("{}/{}", self.base_url, campaign_id);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("daily_budget", budget_minor.to_string()),
                ("access_token", self.access_token.clone()),
            ])
            .send()
            .await?;

        let result: UpdateResponse = Self::decode(response).await?;
        if result.success {
            Ok(())
        } else {
            Err(AdsError::ApiError {
                code: 0,
                message: format!("budget update rejected for campaign {}", campaign_id),
            })
        }
    }

    async fn create_campaign(&self, account: &AccountId, spec: &CampaignSpec) -> Result<String> {
        let url = format!("{}/{}/campaigns", self.base_url, account.as_str());

        let mut form: Vec<(&str, String)> = vec![
            ("name", spec.name.clone()),
            ("objective", spec.objective.clone()),
            ("status", spec.status.clone()),
            ("special_ad_categories", "[]".to_string()),
            ("access_token", self.access_token.clone()),
        ];

        if let Some(budget) = spec.daily_budget_minor() {
            form.push(("daily_budget", budget.to_string()));
        }

        let response = self.client.post(&url).form(&form).send().await?;
        let created: CreateCampaignResponse = Self::decode(response).await?;
        Ok(created.id)
    }
}
