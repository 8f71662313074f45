// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-facing usage report.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use colloquy_cost::{DailyUsage, FeatureUsage, RecentUsage, UsageTotals};

use crate::handlers::internal;
use crate::state::AppState;

/// Days of history in the daily breakdown.
const DAILY_WINDOW_DAYS: u32 = 30;

/// Rows in the recent-calls list.
const RECENT_LIMIT: u32 = 20;

/// Response body for GET /api/admin/usage.
#[derive(Debug, Serialize)]
pub struct UsageReport {
    /// All-time totals.
    pub totals: UsageTotals,
    /// Per-feature breakdown, costliest first.
    pub by_feature: Vec<FeatureUsage>,
    /// Per-day breakdown for the last thirty days, newest first.
    pub daily: Vec<DailyUsage>,
    /// Most recent calls with club names where the club still exists.
    pub recent: Vec<RecentUsage>,
}

/// GET /api/admin/usage
///
/// Aggregated provider spend: totals, per-feature, per-day, and recent calls.
pub async fn get_usage(State(state): State<AppState>) -> Response {
    let totals = match state.ledger.totals().await {
        Ok(totals) => totals,
        Err(e) => return internal(e),
    };
    let by_feature = match state.ledger.totals_by_feature().await {
        Ok(rows) => rows,
        Err(e) => return internal(e),
    };
    let daily = match state.ledger.daily(DAILY_WINDOW_DAYS).await {
        Ok(rows) => rows,
        Err(e) => return internal(e),
    };
    let recent = match state.ledger.recent(RECENT_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => return internal(e),
    };
    Json(UsageReport {
        totals,
        by_feature,
        daily,
        recent,
    })
    .into_response()
}
