//! Campaign domain model.
//!
//! Read-only snapshots of campaigns and their performance metrics,
//! decoupled from the Graph API wire shapes in [`crate::api::types`].

pub mod insights;
pub mod types;

pub use insights::{DateRange, InsightWindow};
pub use types::{Campaign, CampaignSpec, CampaignStatus};
