// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing and API usage accounting for the Colloquy book-club service.
//!
//! This crate provides:
//! - **Pricing**: exact integer cost calculation from a static per-model
//!   rate table, denominated in nanodollars
//! - **Usage ledger**: one persisted row per provider call, with the
//!   aggregation queries behind the admin usage report
//! - **Usage recorder**: a fire-and-forget channel front so accounting
//!   stays off the request path

pub mod ledger;
pub mod pricing;
pub mod recorder;

pub use ledger::{
    DailyUsage, Feature, FeatureUsage, RecentUsage, UsageEntry, UsageLedger, UsageTotals,
};
pub use pricing::{Cost, ModelRates, cost_for, format_usd, rates_for};
pub use recorder::UsageRecorder;
