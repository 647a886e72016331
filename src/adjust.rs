//! Daily-budget adjustment for active campaigns.
//!
//! For every ACTIVE campaign in an account: fetch spend and conversion
//! metrics over a trailing window, skip the campaign when it has no spend,
//! otherwise scale its daily budget by a fixed percentage and push the
//! update. Campaigns are processed one at a time, in enumeration order;
//! one campaign's failure is counted and never aborts the batch.

use std::time::Duration;

use crate::account::AccountId;
use crate::api::CampaignApi;
use crate::campaigns::insights::DateRange;
use crate::campaigns::types::{Campaign, CampaignStatus};
use crate::errors::{AdsError, Result};

/// Largest allowed budget adjustment, as an absolute percentage.
pub const MAX_ADJUSTMENT_PERCENT: u32 = 50;

/// Pause between campaigns so large accounts do not hammer the API.
const ITEM_DELAY: Duration = Duration::from_millis(500);

/// Default page size for the campaign listing.
const DEFAULT_PAGE_LIMIT: usize = 100;

/// Scale a minor-unit budget by `adjustment_percent`, rounding half up.
///
/// Pure integer arithmetic: `round((budget * (100 + pct)) / 100)` with the
/// half-up rule, so results are deterministic and reproducible. The caller
/// guarantees `|pct| <= 50`, keeping the factor positive. Results beyond
/// the u64 budget domain saturate at `u64::MAX`.
pub fn scaled_budget(current_budget: u64, adjustment_percent: i32) -> u64 {
    let factor = (100 + i64::from(adjustment_percent)) as u128;
    let scaled = (u128::from(current_budget) * factor + 50) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Why a campaign was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The insights endpoint returned no rows for the window
    NoInsights,
    /// Metrics exist but spend over the window is zero
    NoSpend,
    /// Nothing to scale: the campaign carries no daily budget
    NoDailyBudget,
}

/// Per-campaign result of one adjustment run.
#[derive(Debug, Clone)]
pub enum CampaignOutcome {
    Updated {
        id: String,
        name: String,
        old_budget: u64,
        new_budget: u64,
        spend: f64,
        conversions: u64,
        /// Undefined (None) when conversions = 0
        cpa: Option<f64>,
    },
    Skipped {
        id: String,
        name: String,
        reason: SkipReason,
    },
    Failed {
        id: String,
        name: String,
        error: String,
    },
}

/// Tally of one adjustment run.
#[derive(Debug, Default)]
pub struct AdjustSummary {
    /// Campaigns returned by the listing
    pub analyzed: usize,

    /// Budgets successfully updated
    pub updated: usize,

    /// Campaigns left untouched (no insights, no spend, no daily budget)
    pub skipped: usize,

    /// Per-campaign failures (insight fetch or update)
    pub errors: usize,

    /// Per-campaign detail, in enumeration order
    pub outcomes: Vec<CampaignOutcome>,
}

/// Runs the spend-gated percentage adjustment over an account.
pub struct BudgetAdjuster<'a> {
    client: &'a dyn CampaignApi,
    item_delay: Duration,
    page_limit: usize,
}

impl<'a> BudgetAdjuster<'a> {
    pub fn new(client: &'a dyn CampaignApi) -> Self {
        Self {
            client,
            item_delay: ITEM_DELAY,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Override the inter-campaign pause (tests run with zero delay).
    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Override the listing page size.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    /// Adjust the daily budget of every ACTIVE campaign in `account`.
    ///
    /// Fails before any network activity when `|adjustment_percent|`
    /// exceeds [`MAX_ADJUSTMENT_PERCENT`] or `lookback_days` is zero. A
    /// failure while listing campaigns aborts the whole run; a failure on
    /// an individual campaign is tallied in `errors` and the loop moves on.
    pub async fn adjust_budgets(
        &self,
        account: &AccountId,
        adjustment_percent: i32,
        lookback_days: u32,
    ) -> Result<AdjustSummary> {
        if adjustment_percent.unsigned_abs() > MAX_ADJUSTMENT_PERCENT {
            return Err(AdsError::AdjustmentOutOfRange {
                requested: adjustment_percent,
                max: MAX_ADJUSTMENT_PERCENT,
            });
        }
        if lookback_days == 0 {
            return Err(AdsError::ConfigError(
                "lookback must be at least 1 day".to_string(),
            ));
        }

        let campaigns = self
            .client
            .list_campaigns(account, Some(CampaignStatus::Active), self.page_limit)
            .await?;

        let range = DateRange::lookback(lookback_days);
        let mut summary = AdjustSummary {
            analyzed: campaigns.len(),
            ..AdjustSummary::default()
        };

        for (index, campaign) in campaigns.iter().enumerate() {
            let outcome = match self.adjust_one(campaign, adjustment_percent, &range).await {
                Ok(outcome) => outcome,
                Err(err) => CampaignOutcome::Failed {
                    id: campaign.id.clone(),
                    name: campaign.name.clone(),
                    error: err.to_string(),
                },
            };

            match &outcome {
                CampaignOutcome::Updated { .. } => summary.updated += 1,
                CampaignOutcome::Skipped { .. } => summary.skipped += 1,
                CampaignOutcome::Failed { .. } => summary.errors += 1,
            }
            summary.outcomes.push(outcome);

            if index + 1 < campaigns.len() && !self.item_delay.is_zero() {
                tokio::time::sleep(self.item_delay).await;
            }
        }

        Ok(summary)
    }

    async fn adjust_one(
        &self,
        campaign: &Campaign,
        adjustment_percent: i32,
        range: &DateRange,
    ) -> Result<CampaignOutcome> {
        let window = match self.client.campaign_insights(&campaign.id, range).await? {
            Some(window) => window,
            None => return Ok(Self::skip(campaign, SkipReason::NoInsights)),
        };

        // Spend over the window is the only gating condition; a campaign
        // with spend but zero conversions is still scaled.
        if window.spend <= 0.0 {
            return Ok(Self::skip(campaign, SkipReason::NoSpend));
        }

        let current_budget = match campaign.daily_budget {
            Some(budget) => budget,
            None => return Ok(Self::skip(campaign, SkipReason::NoDailyBudget)),
        };

        let new_budget = scaled_budget(current_budget, adjustment_percent);
        self.client
            .update_daily_budget(&campaign.id, new_budget)
            .await?;

        Ok(CampaignOutcome::Updated {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            old_budget: current_budget,
            new_budget,
            spend: window.spend,
            conversions: window.conversions,
            cpa: window.cpa(),
        })
    }

    fn skip(campaign: &Campaign, reason: SkipReason) -> CampaignOutcome {
        CampaignOutcome::Skipped {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::insights::InsightWindow;
    use crate::campaigns::types::CampaignSpec;
    use async_trait::async_trait;
    use quickcheck_macros::quickcheck;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn campaign(id: &str, daily_budget: Option<u64>) -> Campaign {
        Campaign {
            id: id.to_string(),
            name: format!("campaign-{}", id),
            status: CampaignStatus::Active,
            daily_budget,
            lifetime_budget: None,
            objective: Some("REACH".to_string()),
            buying_type: None,
            created_time: None,
        }
    }

    /// Scripted in-memory stand-in for the Graph API.
    struct FakeApi {
        campaigns: Vec<Campaign>,
        insights: HashMap<String, Option<InsightWindow>>,
        failing_updates: Vec<String>,
        updates: Mutex<Vec<(String, u64)>>,
        list_calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(campaigns: Vec<Campaign>) -> Self {
            Self {
                campaigns,
                insights: HashMap::new(),
                failing_updates: Vec::new(),
                updates: Mutex::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
            }
        }

        fn with_insights(mut self, id: &str, window: Option<InsightWindow>) -> Self {
            self.insights.insert(id.to_string(), window);
            self
        }

        fn failing_update(mut self, id: &str) -> Self {
            self.failing_updates.push(id.to_string());
            self
        }

        fn recorded_updates(&self) -> Vec<(String, u64)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CampaignApi for FakeApi {
        async fn list_campaigns(
            &self,
            _account: &AccountId,
            status_filter: Option<CampaignStatus>,
            _limit: usize,
        ) -> Result<Vec<Campaign>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(status_filter, Some(CampaignStatus::Active));
            Ok(self.campaigns.clone())
        }

        async fn campaign_insights(
            &self,
            campaign_id: &str,
            _range: &DateRange,
        ) -> Result<Option<InsightWindow>> {
            match self.insights.get(campaign_id) {
                Some(window) => Ok(window.clone()),
                None => Err(AdsError::ApiError {
                    code: 100,
                    message: format!("no scripted insights for {}", campaign_id),
                }),
            }
        }

        async fn update_daily_budget(&self, campaign_id: &str, budget_minor: u64) -> Result<()> {
            if self.failing_updates.iter().any(|id| id == campaign_id) {
                return Err(AdsError::ApiError {
                    code: 17,
                    message: "User request limit reached".to_string(),
                });
            }
            self.updates
                .lock()
                .unwrap()
                .push((campaign_id.to_string(), budget_minor));
            Ok(())
        }

        async fn create_campaign(
            &self,
            _account: &AccountId,
            _spec: &CampaignSpec,
        ) -> Result<String> {
            unreachable!("adjuster never creates campaigns")
        }
    }

    fn spend(amount: f64, conversions: u64) -> InsightWindow {
        InsightWindow {
            spend: amount,
            conversions,
            ..Default::default()
        }
    }

    fn account() -> AccountId {
        AccountId::parse("1234567890").unwrap()
    }

    // --- scaled_budget -----------------------------------------------------

    #[test]
    fn test_worked_example() {
        // $100.00 budget, +10% -> $110.00
        assert_eq!(scaled_budget(10000, 10), 11000);
    }

    #[test]
    fn test_negative_adjustment_decreases() {
        assert_eq!(scaled_budget(10000, -10), 9000);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 5 * 1.10 = 5.5 -> 6
        assert_eq!(scaled_budget(5, 10), 6);
        // 999 * 1.10 = 1098.9 -> 1099
        assert_eq!(scaled_budget(999, 10), 1099);
        // 31 * 0.95 = 29.45 -> 29
        assert_eq!(scaled_budget(31, -5), 29);
    }

    #[test]
    fn test_zero_budget_stays_zero() {
        assert_eq!(scaled_budget(0, 50), 0);
    }

    #[test]
    fn test_huge_budget_saturates_instead_of_truncating() {
        assert_eq!(scaled_budget(u64::MAX, 50), u64::MAX);
        assert_eq!(scaled_budget(u64::MAX, 1), u64::MAX);
        assert_eq!(scaled_budget(u64::MAX, 0), u64::MAX);
    }

    #[quickcheck]
    fn prop_zero_adjustment_is_identity(budget: u32) -> bool {
        scaled_budget(u64::from(budget), 0) == u64::from(budget)
    }

    #[quickcheck]
    fn prop_scaling_monotone_in_budget(a: u32, b: u32, pct: i32) -> bool {
        let pct = pct % 51;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        scaled_budget(u64::from(lo), pct) <= scaled_budget(u64::from(hi), pct)
    }

    #[quickcheck]
    fn prop_adjustment_sign_matches_direction(budget: u32, pct: i32) -> bool {
        let pct = pct % 51;
        let budget = u64::from(budget);
        let scaled = scaled_budget(budget, pct);
        if pct >= 0 {
            scaled >= budget
        } else {
            scaled <= budget
        }
    }

    // --- adjust_budgets ----------------------------------------------------

    #[tokio::test]
    async fn test_spend_gates_the_update() {
        let api = FakeApi::new(vec![campaign("1", Some(10000))])
            .with_insights("1", Some(spend(0.0, 0)));

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.updated, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 0);
        assert!(api.recorded_updates().is_empty());
        assert!(matches!(
            summary.outcomes[0],
            CampaignOutcome::Skipped {
                reason: SkipReason::NoSpend,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_insights_counts_as_skip() {
        let api = FakeApi::new(vec![campaign("1", Some(10000))]).with_insights("1", None);

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 0);
        assert!(matches!(
            summary.outcomes[0],
            CampaignOutcome::Skipped {
                reason: SkipReason::NoInsights,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_spend_without_conversions_still_scales() {
        let api = FakeApi::new(vec![campaign("1", Some(10000))])
            .with_insights("1", Some(spend(42.5, 0)));

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.updated, 1);
        match &summary.outcomes[0] {
            CampaignOutcome::Updated { new_budget, cpa, .. } => {
                assert_eq!(*new_budget, 11000);
                assert_eq!(*cpa, None);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_adjustment_fails_before_listing() {
        let api = FakeApi::new(vec![campaign("1", Some(10000))]);

        let result = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 51, 7)
            .await;

        assert!(matches!(
            result,
            Err(AdsError::AdjustmentOutOfRange { requested: 51, .. })
        ));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_negative_magnitude_checked_too() {
        let api = FakeApi::new(vec![]);
        let result = BudgetAdjuster::new(&api)
            .adjust_budgets(&account(), -51, 7)
            .await;
        assert!(result.is_err());
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_one_failure_never_aborts_the_batch() {
        let api = FakeApi::new(vec![
            campaign("1", Some(10000)),
            campaign("2", Some(20000)),
            campaign("3", Some(30000)),
        ])
        .with_insights("1", Some(spend(50.0, 5)))
        .with_insights("2", Some(spend(75.0, 3)))
        .with_insights("3", Some(spend(20.0, 1)))
        .failing_update("2");

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.analyzed, 3);
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(
            api.recorded_updates(),
            vec![("1".to_string(), 11000), ("3".to_string(), 33000)]
        );
    }

    #[tokio::test]
    async fn test_insight_failure_is_a_per_campaign_error() {
        // No scripted insights for "1" -> the fetch fails, but the run
        // completes and tallies it.
        let api = FakeApi::new(vec![campaign("1", Some(10000))]);

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.updated, 0);
    }

    #[tokio::test]
    async fn test_campaign_without_daily_budget_is_skipped() {
        let api =
            FakeApi::new(vec![campaign("1", None)]).with_insights("1", Some(spend(10.0, 2)));

        let summary = BudgetAdjuster::new(&api)
            .with_item_delay(Duration::ZERO)
            .adjust_budgets(&account(), 10, 7)
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(matches!(
            summary.outcomes[0],
            CampaignOutcome::Skipped {
                reason: SkipReason::NoDailyBudget,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_zero_lookback_rejected() {
        let api = FakeApi::new(vec![]);
        let result = BudgetAdjuster::new(&api)
            .adjust_budgets(&account(), 10, 0)
            .await;
        assert!(matches!(result, Err(AdsError::ConfigError(_))));
    }
}
