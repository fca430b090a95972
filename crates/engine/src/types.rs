//! Types for the risk engine

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single risk-bearing trade
///
/// Built by the boundary layer from a validated request; the engine reads
/// it and never mutates it. `client_id` is absent for classification-only
/// batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub value: Decimal,
    pub client_sector: String,
    pub client_id: Option<String>,
}

/// Risk tier assigned to a trade
///
/// Serializes as the wire tokens `LOWRISK` / `MEDIUMRISK` / `HIGHRISK`.
/// The enum carries no ordering of its own; evaluation order comes from
/// rule priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl RiskCategory {
    /// All categories, in reporting order
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::LowRisk,
        RiskCategory::MediumRisk,
        RiskCategory::HighRisk,
    ];

    /// Wire token for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::LowRisk => "LOWRISK",
            RiskCategory::MediumRisk => "MEDIUMRISK",
            RiskCategory::HighRisk => "HIGHRISK",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category aggregate produced by one analysis call
///
/// `top_client` is empty when no trade in the category carried a client id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub count: u64,
    pub total_value: Decimal,
    pub top_client: String,
}

/// Result of analyzing one batch of trades
///
/// `categories` preserves input order index-for-index. `summary` always
/// holds exactly one entry per known category, zeroed for categories that
/// received no trades.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub categories: Vec<RiskCategory>,
    pub summary: HashMap<RiskCategory, CategorySummary>,
    pub processing_time_ms: u64,
}
