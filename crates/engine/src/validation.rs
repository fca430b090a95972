//! Request validation for the engine boundary
//!
//! All malformed input is rejected here, before the classifier or analyzer
//! run. The engine itself assumes validated trades and performs no checks
//! of its own.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::request::{AnalyzeRequest, ClassifyRequest};

/// Maximum number of trades accepted by one analysis request
pub const MAX_ANALYZE_TRADES: usize = 100_000;

const VALID_SECTORS: [&str; 2] = ["Public", "Private"];

/// A single violated request field
#[derive(Debug, Clone, Error, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation failure carrying one entry per violated field
#[derive(Debug, Clone, Error)]
#[error("request validation failed with {} error(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn is_valid_sector(sector: &str) -> bool {
    VALID_SECTORS.iter().any(|s| sector.eq_ignore_ascii_case(s))
}

fn push_error(errors: &mut Vec<FieldError>, field: String, message: &str) {
    errors.push(FieldError {
        field,
        message: message.to_string(),
    });
}

fn check_trade_fields(errors: &mut Vec<FieldError>, index: usize, value: Decimal, sector: &str) {
    if value < Decimal::ZERO {
        push_error(
            errors,
            format!("trades[{index}].value"),
            "Trade value must be non-negative",
        );
    }
    if sector.is_empty() {
        push_error(
            errors,
            format!("trades[{index}].clientSector"),
            "Client sector is required",
        );
    } else if !is_valid_sector(sector) {
        push_error(
            errors,
            format!("trades[{index}].clientSector"),
            "Client sector must be 'Public' or 'Private'",
        );
    }
}

fn check_not_empty(errors: &mut Vec<FieldError>, len: usize) {
    if len == 0 {
        push_error(
            errors,
            "trades".to_string(),
            "Trades list cannot be empty",
        );
    }
}

/// Validate a classification request
pub fn validate_classify(request: &ClassifyRequest) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    check_not_empty(&mut errors, request.trades.len());
    for (index, trade) in request.trades.iter().enumerate() {
        check_trade_fields(&mut errors, index, trade.value, &trade.client_sector);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Validate an analysis request
///
/// Same per-trade rules as classification, plus a mandatory non-empty
/// client id per trade and the batch size ceiling.
pub fn validate_analyze(request: &AnalyzeRequest) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    check_not_empty(&mut errors, request.trades.len());
    if request.trades.len() > MAX_ANALYZE_TRADES {
        push_error(
            &mut errors,
            "trades".to_string(),
            &format!("Maximum of {MAX_ANALYZE_TRADES} trades allowed per request"),
        );
    }
    for (index, trade) in request.trades.iter().enumerate() {
        check_trade_fields(&mut errors, index, trade.value, &trade.client_sector);
        if trade.client_id.is_empty() {
            push_error(
                &mut errors,
                format!("trades[{index}].clientId"),
                "Client ID is required for analysis",
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}
