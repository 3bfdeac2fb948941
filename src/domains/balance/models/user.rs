use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use rust_decimal::Decimal;
use crate::shared::errors::BalanceError;

// =====================================================
// User 모델
// =====================================================
// 역할: 잔고를 가진 사용자 (이 서비스는 생성/삭제하지 않음)
//
// 불변식:
// - balance는 이 서비스의 어떤 연산으로도 음수가 되지 않음
// - 잔고 변경은 withdraw()를 통해서만 (실패 시 상태 변경 없음)
// =====================================================

/// 사용자 (users 테이블 한 행)
/// User row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = User)]
pub struct User {
    /// User ID (BIGINT)
    /// 사용자 ID
    pub id: i64,

    /// Current balance (never negative)
    /// 현재 잔고 (음수 불가)
    #[schema(value_type = String, example = "1000.00")]
    pub balance: Decimal,
}

impl User {
    pub fn new(id: i64, balance: Decimal) -> Self {
        Self { id, balance }
    }

    /// 출금 가능 여부
    /// Whether `amount` could be withdrawn right now
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        amount > Decimal::ZERO && self.balance >= amount
    }

    /// 잔고 차감
    /// Withdraw `amount` from the balance
    ///
    /// # Returns
    /// * `Ok(balance_before)` - 차감 전 잔고 (self.balance는 차감 후 값으로 변경됨)
    /// * `Err(InvalidAmount)` - amount <= 0 (상태 변경 없음)
    /// * `Err(InsufficientBalance)` - balance < amount (상태 변경 없음)
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, BalanceError> {
        if amount <= Decimal::ZERO {
            return Err(BalanceError::InvalidAmount);
        }

        if self.balance < amount {
            return Err(BalanceError::InsufficientBalance);
        }

        let balance_before = self.balance;
        self.balance -= amount;

        Ok(balance_before)
    }
}
