use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 출금 거래 설명 (고정값)
pub const WITHDRAW_DESCRIPTION: &str = "withdraw";

// =====================================================
// Transaction 모델 (원장 기록)
// =====================================================
// 역할: 잔고 변경 1건의 불변 기록 (transactions 테이블)
//
// 규칙:
// - 성공한 출금마다 정확히 1건
// - balance_before - amount = balance_after
// - 한 번 저장되면 수정/삭제하지 않음
// =====================================================

/// 원장 기록
/// Ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = Transaction)]
pub struct Transaction {
    /// Transaction ID (UUID v4)
    /// 거래 ID
    pub id: Uuid,

    /// Owner of the debited balance
    /// 사용자 ID
    pub user_id: i64,

    /// Debited amount (always positive)
    /// 차감 금액 (항상 양수)
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,

    /// 차감 전 잔고
    #[schema(value_type = String, example = "1000.00")]
    pub balance_before: Decimal,

    /// 차감 후 잔고
    #[schema(value_type = String, example = "900.00")]
    pub balance_after: Decimal,

    #[schema(example = "withdraw")]
    pub description: String,

    /// Created timestamp (UTC)
    /// 생성 시간 (UTC)
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: i64,
        amount: Decimal,
        balance_before: Decimal,
        balance_after: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            balance_before,
            balance_after,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// 출금 기록 생성
    /// Build a withdraw ledger entry
    pub fn new_withdraw(
        user_id: i64,
        amount: Decimal,
        balance_before: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self::new(user_id, amount, balance_before, balance_after, WITHDRAW_DESCRIPTION)
    }
}
