//! Trade Risk Engine — rule-based classification and batch analysis
//!
//! Self-contained crate holding the risk engine and its boundary:
//! - Ordered threshold/sector classification rules (Low, Medium, High)
//! - First-match-wins classifier with a Low fallback
//! - Single-pass batch analyzer producing per-category summaries
//! - Request DTOs and validation guarding the engine boundary

pub mod analyzer;
pub mod classifier;
pub mod request;
pub mod rules;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use analyzer::TradeAnalyzer;
pub use classifier::TradeClassifier;
pub use request::{AnalyzeRequest, ClassifyRequest, TradeDto, TradeWithClientDto};
pub use rules::{default_rules, RiskRule, RISK_THRESHOLD};
pub use types::{AnalysisReport, CategorySummary, RiskCategory, Trade};
pub use validation::{
    validate_analyze, validate_classify, FieldError, ValidationError, MAX_ANALYZE_TRADES,
};
