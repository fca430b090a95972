//! Single-pass batch analyzer
//!
//! Classifies a batch and aggregates per-category statistics in one
//! traversal, then reduces each category's client totals to a top client.

use std::collections::HashMap;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::info;

use crate::classifier::TradeClassifier;
use crate::types::{AnalysisReport, CategorySummary, RiskCategory, Trade};

/// Running totals for one category, built during the pass
#[derive(Default)]
struct CategoryAccumulator {
    count: u64,
    total_value: Decimal,
    client_totals: HashMap<String, Decimal>,
    /// Client ids in first-seen order; keeps the top-client tie-break
    /// deterministic
    client_order: Vec<String>,
}

impl CategoryAccumulator {
    fn record(&mut self, trade: &Trade) {
        self.count += 1;
        self.total_value += trade.value;

        if let Some(client_id) = trade.client_id.as_deref().filter(|c| !c.is_empty()) {
            if !self.client_totals.contains_key(client_id) {
                self.client_order.push(client_id.to_string());
            }
            *self
                .client_totals
                .entry(client_id.to_string())
                .or_insert(Decimal::ZERO) += trade.value;
        }
    }

    /// Client with the highest running total, or empty when the category
    /// saw no client ids. Strict comparison in first-seen order: the first
    /// client to reach the maximum wins a tie.
    fn top_client(&self) -> String {
        let mut best: Option<(&str, Decimal)> = None;
        for client_id in &self.client_order {
            let Some(&total) = self.client_totals.get(client_id.as_str()) else {
                continue;
            };
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((client_id, total)),
            }
        }
        best.map(|(client_id, _)| client_id.to_string())
            .unwrap_or_default()
    }

    fn into_summary(self) -> CategorySummary {
        let top_client = self.top_client();
        CategorySummary {
            count: self.count,
            total_value: self.total_value,
            top_client,
        }
    }
}

/// Batch analyzer built directly on top of the classifier
///
/// Stateless across calls: every `analyze` builds fresh accumulators, so
/// concurrent callers with independent batches need no coordination.
pub struct TradeAnalyzer {
    classifier: TradeClassifier,
}

impl TradeAnalyzer {
    pub fn new(classifier: TradeClassifier) -> Self {
        Self { classifier }
    }

    /// Analyzer over the built-in rule set
    pub fn with_default_rules() -> Self {
        Self::new(TradeClassifier::with_default_rules())
    }

    /// Classify and aggregate a batch in one pass.
    ///
    /// The report carries the per-trade category list in input order, one
    /// summary per known category (zeroed for categories that received no
    /// trades), and the wall-clock milliseconds spent classifying and
    /// aggregating. Empty input is valid. Assumes validated trades; no
    /// input checks happen here.
    pub fn analyze(&self, trades: &[Trade]) -> AnalysisReport {
        let started = Instant::now();

        info!(trades = trades.len(), "Starting trade analysis");

        let mut categories = Vec::with_capacity(trades.len());
        let mut accumulators: HashMap<RiskCategory, CategoryAccumulator> = RiskCategory::ALL
            .iter()
            .map(|c| (*c, CategoryAccumulator::default()))
            .collect();

        for trade in trades {
            let category = self.classifier.classify(trade);
            categories.push(category);
            accumulators.entry(category).or_default().record(trade);
        }

        let summary: HashMap<RiskCategory, CategorySummary> = accumulators
            .into_iter()
            .map(|(category, acc)| (category, acc.into_summary()))
            .collect();

        let processing_time_ms = started.elapsed().as_millis() as u64;

        info!(
            trades = trades.len(),
            elapsed_ms = processing_time_ms,
            "Trade analysis complete"
        );

        AnalysisReport {
            categories,
            summary,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(value: Decimal, sector: &str, client_id: &str) -> Trade {
        Trade {
            value,
            client_sector: sector.to_string(),
            client_id: Some(client_id.to_string()),
        }
    }

    fn sample_trades() -> Vec<Trade> {
        vec![
            trade(dec!(2_000_000), "Private", "CLI001"),
            trade(dec!(400_000), "Public", "CLI002"),
            trade(dec!(500_000), "Public", "CLI003"),
            trade(dec!(3_000_000), "Public", "CLI004"),
        ]
    }

    #[test]
    fn test_analyze_returns_categories_in_input_order() {
        let analyzer = TradeAnalyzer::with_default_rules();

        let report = analyzer.analyze(&sample_trades());

        assert_eq!(
            report.categories,
            vec![
                RiskCategory::HighRisk,
                RiskCategory::LowRisk,
                RiskCategory::LowRisk,
                RiskCategory::MediumRisk,
            ]
        );
    }

    #[test]
    fn test_analyze_builds_per_category_summary() {
        let analyzer = TradeAnalyzer::with_default_rules();

        let report = analyzer.analyze(&sample_trades());

        let low = &report.summary[&RiskCategory::LowRisk];
        assert_eq!(low.count, 2);
        assert_eq!(low.total_value, dec!(900_000));
        assert_eq!(low.top_client, "CLI003");

        let medium = &report.summary[&RiskCategory::MediumRisk];
        assert_eq!(medium.count, 1);
        assert_eq!(medium.total_value, dec!(3_000_000));
        assert_eq!(medium.top_client, "CLI004");

        let high = &report.summary[&RiskCategory::HighRisk];
        assert_eq!(high.count, 1);
        assert_eq!(high.total_value, dec!(2_000_000));
        assert_eq!(high.top_client, "CLI001");
    }

    #[test]
    fn test_top_client_sums_across_trades() {
        let analyzer = TradeAnalyzer::with_default_rules();
        let trades = vec![
            trade(dec!(500_000), "Public", "CLI001"),
            trade(dec!(300_000), "Public", "CLI002"),
            trade(dec!(100_000), "Public", "CLI001"),
        ];

        let report = analyzer.analyze(&trades);

        let low = &report.summary[&RiskCategory::LowRisk];
        assert_eq!(low.count, 3);
        assert_eq!(low.total_value, dec!(900_000));
        // CLI001 totals 600k against CLI002's 300k
        assert_eq!(low.top_client, "CLI001");
    }

    #[test]
    fn test_top_client_tie_goes_to_first_seen() {
        let analyzer = TradeAnalyzer::with_default_rules();
        let trades = vec![
            trade(dec!(300_000), "Public", "CLI001"),
            trade(dec!(300_000), "Public", "CLI002"),
        ];

        let report = analyzer.analyze(&trades);

        assert_eq!(report.summary[&RiskCategory::LowRisk].top_client, "CLI001");
    }

    #[test]
    fn test_top_client_empty_without_client_ids() {
        let analyzer = TradeAnalyzer::with_default_rules();
        let trades = vec![Trade {
            value: dec!(400_000),
            client_sector: "Public".to_string(),
            client_id: None,
        }];

        let report = analyzer.analyze(&trades);

        let low = &report.summary[&RiskCategory::LowRisk];
        assert_eq!(low.count, 1);
        assert_eq!(low.top_client, "");
    }

    #[test]
    fn test_analyze_empty_batch() {
        let analyzer = TradeAnalyzer::with_default_rules();

        let report = analyzer.analyze(&[]);

        assert!(report.categories.is_empty());
        assert_eq!(report.summary.len(), 3);
        for category in RiskCategory::ALL {
            let summary = &report.summary[&category];
            assert_eq!(summary.count, 0);
            assert_eq!(summary.total_value, Decimal::ZERO);
            assert_eq!(summary.top_client, "");
        }
    }

    #[test]
    fn test_analyze_conserves_counts_and_totals() {
        let analyzer = TradeAnalyzer::with_default_rules();
        let trades: Vec<Trade> = (0..10_000)
            .map(|i| {
                let value = if i % 2 == 0 {
                    dec!(500_000)
                } else {
                    dec!(2_000_000)
                };
                let sector = if i % 3 == 0 { "Public" } else { "Private" };
                trade(value, sector, &format!("CLI{:03}", i % 100))
            })
            .collect();
        let expected_total: Decimal = trades.iter().map(|t| t.value).sum();

        let report = analyzer.analyze(&trades);

        assert_eq!(report.categories.len(), 10_000);
        let count_sum: u64 = report.summary.values().map(|s| s.count).sum();
        let value_sum: Decimal = report.summary.values().map(|s| s.total_value).sum();
        assert_eq!(count_sum, 10_000);
        assert_eq!(value_sum, expected_total);
    }
}
