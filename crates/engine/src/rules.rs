//! Classification rules for trade risk tiers
//!
//! Three fixed rules evaluated in priority order. The rule set is not
//! exhaustive on its own: a trade at or above the threshold with an
//! unrecognized sector matches no rule and is resolved by the
//! classifier's Low fallback.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{RiskCategory, Trade};

/// Value threshold separating low-risk trades from the sector-based tiers
pub const RISK_THRESHOLD: Decimal = dec!(1_000_000);

const PUBLIC_SECTOR: &str = "Public";
const PRIVATE_SECTOR: &str = "Private";

/// A single classification rule: priority, predicate, assigned category
///
/// Rules are stateless and `Copy`; one fixed set is built at startup and
/// shared across all classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskRule {
    /// Priority 1: any trade under the threshold, sector irrelevant
    Low,
    /// Priority 2: at or above the threshold in the public sector
    Medium,
    /// Priority 3: at or above the threshold in the private sector
    High,
}

impl RiskRule {
    /// Evaluation priority; lower evaluates first
    pub fn priority(&self) -> u8 {
        match self {
            RiskRule::Low => 1,
            RiskRule::Medium => 2,
            RiskRule::High => 3,
        }
    }

    /// Category assigned when this rule matches
    pub fn category(&self) -> RiskCategory {
        match self {
            RiskRule::Low => RiskCategory::LowRisk,
            RiskRule::Medium => RiskCategory::MediumRisk,
            RiskRule::High => RiskCategory::HighRisk,
        }
    }

    /// Whether this rule matches the given trade. Pure and infallible;
    /// sector comparison is ASCII case-insensitive.
    pub fn matches(&self, trade: &Trade) -> bool {
        match self {
            RiskRule::Low => trade.value < RISK_THRESHOLD,
            RiskRule::Medium => {
                trade.value >= RISK_THRESHOLD
                    && trade.client_sector.eq_ignore_ascii_case(PUBLIC_SECTOR)
            }
            RiskRule::High => {
                trade.value >= RISK_THRESHOLD
                    && trade.client_sector.eq_ignore_ascii_case(PRIVATE_SECTOR)
            }
        }
    }
}

/// The built-in rule set, in declaration order
pub fn default_rules() -> Vec<RiskRule> {
    vec![RiskRule::Low, RiskRule::Medium, RiskRule::High]
}
