// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model rate table and cost calculation.
//!
//! Rates verified from <https://docs.anthropic.com/en/docs/about-claude/pricing>
//! on 2026-08-01.
//!
//! Claude Haiku 3.5:  input=$0.80/MTok, output=$4.00/MTok
//! Claude Sonnet 4:   input=$3.00/MTok, output=$15.00/MTok
//! Claude Opus 4:     input=$15.00/MTok, output=$75.00/MTok
//!
//! All money here is integer nanodollars (1e-9 USD). At published per-MTok
//! prices every per-token rate is a whole number of nanodollars, so cost
//! arithmetic stays exact with no floating point anywhere.

use colloquy_core::TokenUsage;
use serde::Serialize;

/// Per-token rates for one model, in nanodollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelRates {
    pub input_nanos_per_token: i64,
    pub output_nanos_per_token: i64,
}

const RATE_TABLE: &[(&str, ModelRates)] = &[
    (
        "claude-sonnet-4-20250514",
        ModelRates {
            input_nanos_per_token: 3_000,
            output_nanos_per_token: 15_000,
        },
    ),
    (
        "claude-opus-4-20250514",
        ModelRates {
            input_nanos_per_token: 15_000,
            output_nanos_per_token: 75_000,
        },
    ),
    (
        "claude-haiku-3-5-20241022",
        ModelRates {
            input_nanos_per_token: 800,
            output_nanos_per_token: 4_000,
        },
    ),
];

/// Look up rates for a model identifier. The match is exact; an unknown
/// model returns `None`, which callers treat as "skip cost recording",
/// never as a failure.
pub fn rates_for(model: &str) -> Option<ModelRates> {
    RATE_TABLE
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, rates)| *rates)
}

/// Itemized cost of one completion call, in nanodollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cost {
    pub input_nanos: i64,
    pub output_nanos: i64,
    pub total_nanos: i64,
}

impl Cost {
    /// Total as a display string in US dollars.
    pub fn total_usd(&self) -> String {
        format_usd(self.total_nanos)
    }
}

/// Cost of a call, or `None` for a model with no table entry.
pub fn cost_for(model: &str, usage: &TokenUsage) -> Option<Cost> {
    let rates = rates_for(model)?;
    let input_nanos = i64::from(usage.input_tokens) * rates.input_nanos_per_token;
    let output_nanos = i64::from(usage.output_tokens) * rates.output_nanos_per_token;
    Some(Cost {
        input_nanos,
        output_nanos,
        total_nanos: input_nanos + output_nanos,
    })
}

/// Format a non-negative nanodollar amount as "$D.DDDDDD", truncated to
/// microdollar precision.
pub fn format_usd(nanos: i64) -> String {
    let dollars = nanos / 1_000_000_000;
    let micros = (nanos % 1_000_000_000) / 1_000;
    format!("${dollars}.{micros:06}")
}
