use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use rust_decimal::Decimal;
use uuid::Uuid;
use super::transaction::Transaction;

/// 출금 요청
/// Withdraw request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    /// Amount to withdraw (decimal string)
    /// 출금 금액 (문자열, 예: "100.00")
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
}

/// 출금 응답
/// Withdraw response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WithdrawResponse {
    pub success: bool,

    /// 생성된 원장 기록 ID
    /// Ledger entry id
    pub transaction_id: Uuid,

    #[schema(value_type = String, example = "1000.00")]
    pub balance_before: Decimal,

    #[schema(value_type = String, example = "900.00")]
    pub balance_after: Decimal,
}

/// 출금 결과 (서비스 내부 반환값)
/// Result of a committed withdraw
#[derive(Debug, Clone)]
pub struct WithdrawResult {
    pub transaction: Transaction,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
}

impl From<WithdrawResult> for WithdrawResponse {
    fn from(result: WithdrawResult) -> Self {
        Self {
            success: true,
            transaction_id: result.transaction.id,
            balance_before: result.balance_before,
            balance_after: result.balance_after,
        }
    }
}

/// 잔고 조회 응답
/// Balance response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub user_id: i64,

    #[schema(value_type = String, example = "900.00")]
    pub balance: Decimal,
}

/// 원장 조회 쿼리 파라미터
/// Ledger page query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionHistoryQuery {
    /// 최대 개수 (기본 50, 1..=100)
    pub limit: Option<i64>,
    /// 건너뛸 개수 (기본 0)
    pub offset: Option<i64>,
}

impl TransactionHistoryQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    /// (limit, offset) 정규화
    /// Normalize to a (limit, offset) pair
    pub fn page(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// 원장 조회 응답
/// Ledger page response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionHistoryResponse {
    pub user_id: i64,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_request_accepts_decimal_string() {
        let req: WithdrawRequest = serde_json::from_str(r#"{"amount":"100.00"}"#).unwrap();
        assert_eq!(req.amount, Decimal::from_str("100.00").unwrap());
    }

    #[test]
    fn test_response_serializes_decimals_as_strings() {
        let tx = Transaction::new_withdraw(
            1,
            Decimal::from_str("100.00").unwrap(),
            Decimal::from_str("1000.00").unwrap(),
            Decimal::from_str("900.00").unwrap(),
        );
        let result = WithdrawResult {
            balance_before: tx.balance_before,
            balance_after: tx.balance_after,
            transaction: tx.clone(),
        };

        let json = serde_json::to_value(WithdrawResponse::from(result)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["transaction_id"], tx.id.to_string());
        assert_eq!(json["balance_before"], "1000.00");
        assert_eq!(json["balance_after"], "900.00");
    }

    #[test]
    fn test_history_page_defaults_and_clamps() {
        assert_eq!(TransactionHistoryQuery::default().page(), (50, 0));

        let q = TransactionHistoryQuery { limit: Some(1000), offset: Some(-5) };
        assert_eq!(q.page(), (100, 0));

        let q = TransactionHistoryQuery { limit: Some(0), offset: Some(20) };
        assert_eq!(q.page(), (1, 20));
    }
}
