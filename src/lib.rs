//! adkit - Campaign tooling for the Meta Marketing API
//!
//! A command-line toolkit that lists campaigns with performance metrics,
//! creates campaigns from JSON definitions, and scales campaign daily
//! budgets with a spend-gated percentage heuristic.
//!
//! # Architecture
//!
//! - `api` - Graph API client behind a [`api::CampaignApi`] trait seam
//! - `campaigns` - domain snapshots decoupled from wire shapes
//! - `adjust` - the budget adjustment loop and its arithmetic
//! - `commands` - one driver per CLI subcommand

pub mod account;
pub mod adjust;
pub mod api;
pub mod campaigns;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

// Re-export commonly used types
pub use errors::{AdsError, Result};
