//! First-match-wins trade classifier

use crate::rules::{default_rules, RiskRule};
use crate::types::{RiskCategory, Trade};

/// Category returned when no rule matches a trade
const FALLBACK_CATEGORY: RiskCategory = RiskCategory::LowRisk;

/// Applies the rule set to trades in priority order
///
/// The rule list is sorted once at construction and never mutated, so a
/// single classifier can be shared across threads and reused for any
/// number of calls.
pub struct TradeClassifier {
    rules: Vec<RiskRule>,
}

impl TradeClassifier {
    /// Build a classifier from an unordered rule collection.
    ///
    /// Rules are stable-sorted ascending by priority; rules sharing a
    /// priority keep their insertion order.
    pub fn new(mut rules: Vec<RiskRule>) -> Self {
        rules.sort_by_key(|r| r.priority());
        Self { rules }
    }

    /// Classifier over the built-in Low/Medium/High rule set
    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// Resolve exactly one category for a trade.
    ///
    /// The first rule whose predicate holds wins; Low is the fallback when
    /// no rule matches (the rule set alone is not exhaustive). Total over
    /// any well-typed trade.
    pub fn classify(&self, trade: &Trade) -> RiskCategory {
        for rule in &self.rules {
            if rule.matches(trade) {
                return rule.category();
            }
        }
        FALLBACK_CATEGORY
    }

    /// Classify each trade in input order.
    ///
    /// Output index i corresponds to input index i; no reordering, no
    /// deduplication.
    pub fn classify_batch(&self, trades: &[Trade]) -> Vec<RiskCategory> {
        trades.iter().map(|t| self.classify(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trade(value: Decimal, sector: &str) -> Trade {
        Trade {
            value,
            client_sector: sector.to_string(),
            client_id: None,
        }
    }

    #[test]
    fn test_classify_below_threshold_is_low() {
        let classifier = TradeClassifier::with_default_rules();
        assert_eq!(
            classifier.classify(&trade(dec!(400_000), "Public")),
            RiskCategory::LowRisk
        );
        assert_eq!(
            classifier.classify(&trade(dec!(999_999.99), "Private")),
            RiskCategory::LowRisk
        );
    }

    #[test]
    fn test_classify_at_threshold_by_sector() {
        let classifier = TradeClassifier::with_default_rules();
        assert_eq!(
            classifier.classify(&trade(dec!(1_000_000), "Public")),
            RiskCategory::MediumRisk
        );
        assert_eq!(
            classifier.classify(&trade(dec!(1_000_000), "Private")),
            RiskCategory::HighRisk
        );
    }

    #[test]
    fn test_rules_are_sorted_regardless_of_insertion_order() {
        let classifier =
            TradeClassifier::new(vec![RiskRule::High, RiskRule::Low, RiskRule::Medium]);
        assert_eq!(
            classifier.classify(&trade(dec!(500_000), "Private")),
            RiskCategory::LowRisk
        );
        assert_eq!(
            classifier.classify(&trade(dec!(2_000_000), "Private")),
            RiskCategory::HighRisk
        );
    }

    #[test]
    fn test_unknown_sector_at_threshold_falls_back_to_low() {
        // No rule matches here; the fallback keeps classification total.
        let classifier = TradeClassifier::with_default_rules();
        assert_eq!(
            classifier.classify(&trade(dec!(1_500_000), "Municipal")),
            RiskCategory::LowRisk
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = TradeClassifier::with_default_rules();
        let t = trade(dec!(2_000_000), "Private");
        assert_eq!(classifier.classify(&t), classifier.classify(&t));
    }

    #[test]
    fn test_classify_batch_preserves_order_and_length() {
        let classifier = TradeClassifier::with_default_rules();
        let trades = vec![
            trade(dec!(2_000_000), "Private"),
            trade(dec!(400_000), "Public"),
            trade(dec!(500_000), "Public"),
            trade(dec!(3_000_000), "Public"),
        ];

        let categories = classifier.classify_batch(&trades);

        assert_eq!(
            categories,
            vec![
                RiskCategory::HighRisk,
                RiskCategory::LowRisk,
                RiskCategory::LowRisk,
                RiskCategory::MediumRisk,
            ]
        );
    }

    #[test]
    fn test_classify_batch_empty_input() {
        let classifier = TradeClassifier::with_default_rules();
        assert!(classifier.classify_batch(&[]).is_empty());
    }
}
