//! Wire-level request shapes for the classification and analysis operations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Trade;

/// A trade as submitted for classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDto {
    pub value: Decimal,
    pub client_sector: String,
}

/// A trade as submitted for analysis; the client id is mandatory here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeWithClientDto {
    pub value: Decimal,
    pub client_sector: String,
    pub client_id: String,
}

/// Body of a classification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub trades: Vec<TradeDto>,
}

/// Body of an analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub trades: Vec<TradeWithClientDto>,
}

impl ClassifyRequest {
    /// Convert into engine trades. Call after validation.
    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
            .into_iter()
            .map(|t| Trade {
                value: t.value,
                client_sector: t.client_sector,
                client_id: None,
            })
            .collect()
    }
}

impl AnalyzeRequest {
    /// Convert into engine trades. Call after validation.
    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
            .into_iter()
            .map(|t| Trade {
                value: t.value,
                client_sector: t.client_sector,
                client_id: Some(t.client_id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_requests_deserialize_camel_case() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"trades":[{"value":2000000,"clientSector":"Private","clientId":"CLI001"}]}"#,
        )
        .unwrap();

        assert_eq!(request.trades.len(), 1);
        assert_eq!(request.trades[0].value, dec!(2_000_000));
        assert_eq!(request.trades[0].client_sector, "Private");
        assert_eq!(request.trades[0].client_id, "CLI001");
    }

    #[test]
    fn test_classify_trades_carry_no_client_id() {
        let request = ClassifyRequest {
            trades: vec![TradeDto {
                value: dec!(400_000),
                client_sector: "Public".to_string(),
            }],
        };

        let trades = request.into_trades();

        assert_eq!(trades.len(), 1);
        assert!(trades[0].client_id.is_none());
    }

    #[test]
    fn test_analyze_trades_keep_client_id() {
        let request = AnalyzeRequest {
            trades: vec![TradeWithClientDto {
                value: dec!(400_000),
                client_sector: "Public".to_string(),
                client_id: "CLI002".to_string(),
            }],
        };

        let trades = request.into_trades();

        assert_eq!(trades[0].client_id.as_deref(), Some("CLI002"));
    }
}
