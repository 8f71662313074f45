// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage ledger persisting one row per provider API call.
//!
//! Each call is recorded with its token breakdown and itemized cost in
//! nanodollars. Aggregation queries back the admin usage report: all-time
//! totals, per-feature totals, a daily series, and the newest calls.

use colloquy_core::{ColloquyError, TokenUsage};
use colloquy_storage::Database;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::pricing;

/// The feature that triggered a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// An author-persona reply generated into a club conversation.
    AuthorResponse,
}

/// One provider call to be recorded.
#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub feature: Feature,
    /// Club the call was made for, when there is one.
    pub club_id: Option<String>,
    pub model: String,
    pub usage: TokenUsage,
}

/// All-time totals across every recorded call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageTotals {
    pub total_calls: i64,
    pub total_input_tokens: i64,
    pub total_output_tokens: i64,
    pub total_cost_nanos: i64,
    pub total_cost_usd: String,
}

/// Totals for one feature bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureUsage {
    pub feature: String,
    pub calls: i64,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_cost_nanos: i64,
    pub total_cost_usd: String,
}

/// Totals for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUsage {
    pub date: String,
    pub calls: i64,
    pub total_cost_nanos: i64,
    pub total_cost_usd: String,
}

/// One recorded call, joined with its club's name where the club still
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentUsage {
    pub id: String,
    pub feature: String,
    pub model: String,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_cost_nanos: i64,
    pub total_cost_usd: String,
    pub created_at: String,
    pub club_name: Option<String>,
}

/// Convert a tokio-rusqlite error into ColloquyError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> ColloquyError {
    ColloquyError::Storage {
        source: Box::new(e),
    }
}

/// Persistent usage ledger backed by the service database.
///
/// All writes go through the shared single-writer connection.
#[derive(Clone)]
pub struct UsageLedger {
    db: Database,
}

impl UsageLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record one provider call.
    ///
    /// Returns the new row's id, or `Ok(None)` without writing anything when
    /// the model has no rate table entry.
    pub async fn record(&self, entry: &UsageEntry) -> Result<Option<String>, ColloquyError> {
        let Some(cost) = pricing::cost_for(&entry.model, &entry.usage) else {
            warn!(model = %entry.model, "no rate table entry for model; usage not recorded");
            return Ok(None);
        };

        let id = uuid::Uuid::new_v4().to_string();
        let row_id = id.clone();
        let feature = entry.feature.to_string();
        let club_id = entry.club_id.clone();
        let model = entry.model.clone();
        let input_tokens = entry.usage.input_tokens;
        let output_tokens = entry.usage.output_tokens;
        let created_at = colloquy_storage::now_utc();

        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO api_usage (id, feature, club_id, model, input_tokens, \
                     output_tokens, input_cost_nanos, output_cost_nanos, total_cost_nanos, \
                     created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    rusqlite::params![
                        row_id,
                        feature,
                        club_id,
                        model,
                        input_tokens,
                        output_tokens,
                        cost.input_nanos,
                        cost.output_nanos,
                        cost.total_nanos,
                        created_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        info!(
            feature = %entry.feature,
            model = %entry.model,
            input_tokens = entry.usage.input_tokens,
            output_tokens = entry.usage.output_tokens,
            total_cost_nanos = cost.total_nanos,
            "api usage recorded"
        );

        Ok(Some(id))
    }

    /// All-time totals.
    pub async fn totals(&self) -> Result<UsageTotals, ColloquyError> {
        self.db
            .connection()
            .call(|conn| {
                conn.query_row(
                    "SELECT COUNT(*), COALESCE(SUM(input_tokens), 0), \
                     COALESCE(SUM(output_tokens), 0), COALESCE(SUM(total_cost_nanos), 0) \
                     FROM api_usage",
                    [],
                    |row| {
                        let total_cost_nanos: i64 = row.get(3)?;
                        Ok(UsageTotals {
                            total_calls: row.get(0)?,
                            total_input_tokens: row.get(1)?,
                            total_output_tokens: row.get(2)?,
                            total_cost_nanos,
                            total_cost_usd: pricing::format_usd(total_cost_nanos),
                        })
                    },
                )
            })
            .await
            .map_err(map_tr_err)
    }

    /// Totals grouped by feature, most expensive bucket first.
    pub async fn totals_by_feature(&self) -> Result<Vec<FeatureUsage>, ColloquyError> {
        self.db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT feature, COUNT(*), COALESCE(SUM(input_tokens), 0), \
                     COALESCE(SUM(output_tokens), 0), COALESCE(SUM(total_cost_nanos), 0) \
                     FROM api_usage GROUP BY feature ORDER BY SUM(total_cost_nanos) DESC",
                )?;
                let rows = stmt.query_map([], |row| {
                    let total_cost_nanos: i64 = row.get(4)?;
                    Ok(FeatureUsage {
                        feature: row.get(0)?,
                        calls: row.get(1)?,
                        input_tokens: row.get(2)?,
                        output_tokens: row.get(3)?,
                        total_cost_nanos,
                        total_cost_usd: pricing::format_usd(total_cost_nanos),
                    })
                })?;
                let mut buckets = Vec::new();
                for row in rows {
                    buckets.push(row?);
                }
                Ok(buckets)
            })
            .await
            .map_err(map_tr_err)
    }

    /// Per-day totals over the trailing `days` days, newest day first.
    pub async fn daily(&self, days: u32) -> Result<Vec<DailyUsage>, ColloquyError> {
        let window = format!("-{days} days");
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT DATE(created_at), COUNT(*), COALESCE(SUM(total_cost_nanos), 0) \
                     FROM api_usage WHERE DATE(created_at) >= DATE('now', ?1) \
                     GROUP BY DATE(created_at) ORDER BY DATE(created_at) DESC",
                )?;
                let rows = stmt.query_map(rusqlite::params![window], |row| {
                    let total_cost_nanos: i64 = row.get(2)?;
                    Ok(DailyUsage {
                        date: row.get(0)?,
                        calls: row.get(1)?,
                        total_cost_nanos,
                        total_cost_usd: pricing::format_usd(total_cost_nanos),
                    })
                })?;
                let mut series = Vec::new();
                for row in rows {
                    series.push(row?);
                }
                Ok(series)
            })
            .await
            .map_err(map_tr_err)
    }

    /// The newest `limit` recorded calls with club names where available.
    pub async fn recent(&self, limit: u32) -> Result<Vec<RecentUsage>, ColloquyError> {
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT au.id, au.feature, au.model, au.input_tokens, au.output_tokens, \
                     au.total_cost_nanos, au.created_at, c.name \
                     FROM api_usage au LEFT JOIN clubs c ON au.club_id = c.id \
                     ORDER BY au.created_at DESC, au.rowid DESC LIMIT ?1",
                )?;
                let rows = stmt.query_map(rusqlite::params![limit], |row| {
                    let total_cost_nanos: i64 = row.get(5)?;
                    Ok(RecentUsage {
                        id: row.get(0)?,
                        feature: row.get(1)?,
                        model: row.get(2)?,
                        input_tokens: row.get(3)?,
                        output_tokens: row.get(4)?,
                        total_cost_nanos,
                        total_cost_usd: pricing::format_usd(total_cost_nanos),
                        created_at: row.get(6)?,
                        club_name: row.get(7)?,
                    })
                })?;
                let mut calls = Vec::new();
                for row in rows {
                    calls.push(row?);
                }
                Ok(calls)
            })
            .await
            .map_err(map_tr_err)
    }
}
