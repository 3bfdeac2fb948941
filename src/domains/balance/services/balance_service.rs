use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::BalanceStore;
use crate::domains::balance::models::{Transaction, WithdrawResult};
use crate::shared::errors::BalanceError;

/// 핸들러가 사용하는 잔고 연산 (저장소 타입을 숨김)
/// Balance operations exposed to handlers
#[async_trait]
pub trait BalanceOperations: Send + Sync {
    async fn withdraw_balance(&self, user_id: i64, amount: Decimal) -> Result<WithdrawResult, BalanceError>;

    async fn get_balance(&self, user_id: i64) -> Result<Decimal, BalanceError>;

    async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError>;
}

/// 잔고 차감 서비스
/// Balance debit service
///
/// 역할:
/// - 행 잠금 + SERIALIZABLE 트랜잭션 안에서 잔고 차감과 원장 기록을 함께 커밋
/// - 어떤 에러 경로에서도 트랜잭션을 롤백
///
/// 재시도하지 않음 (SerializationFailure는 호출자에게 그대로 전달)
pub struct BalanceService<S> {
    store: Arc<S>,
}

impl<S> Clone for BalanceService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: BalanceStore> BalanceService<S> {
    /// 생성자
    /// Constructor
    ///
    /// # Arguments
    /// * `store` - 사용자 / 원장 저장소
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// 잔고 차감
    /// Withdraw `amount` from the user's balance
    ///
    /// # 처리 과정
    /// 1. 트랜잭션 시작
    /// 2. 사용자 행 잠금 조회
    /// 3. 도메인 규칙으로 차감 (InvalidAmount / InsufficientBalance)
    /// 4. 원장 기록 생성 및 저장
    /// 5. 잔고 갱신
    /// 6. 커밋
    ///
    /// # Returns
    /// * `Ok(WithdrawResult)` - 커밋 완료
    /// * `Err(BalanceError)` - 롤백 완료, 상태 변경 없음
    pub async fn withdraw_balance(&self, user_id: i64, amount: Decimal) -> Result<WithdrawResult, BalanceError> {
        let mut tx = self.store.begin_tx().await?;

        let result = match self.debit_in_tx(&mut tx, user_id, amount).await {
            Ok(result) => result,
            Err(err) => {
                if let Err(rollback_err) = self.store.rollback(tx).await {
                    tracing::error!(user_id, error = %rollback_err, "failed to rollback withdraw");
                }
                return Err(err);
            }
        };

        self.store.commit(tx).await?;

        tracing::info!(
            user_id,
            transaction_id = %result.transaction.id,
            amount = %amount,
            balance_after = %result.balance_after,
            "withdraw committed"
        );

        Ok(result)
    }

    async fn debit_in_tx(
        &self,
        tx: &mut S::Tx,
        user_id: i64,
        amount: Decimal,
    ) -> Result<WithdrawResult, BalanceError> {
        let mut user = self.store.get_user_for_update(tx, user_id).await?;

        let balance_before = user.withdraw(amount)?;
        let balance_after = user.balance;

        let transaction = Transaction::new_withdraw(user_id, amount, balance_before, balance_after);

        self.store.save_transaction(tx, &transaction).await?;
        self.store.update_balance(tx, user_id, balance_after).await?;

        Ok(WithdrawResult {
            transaction,
            balance_before,
            balance_after,
        })
    }

    /// 현재 잔고 조회
    /// Get current balance
    pub async fn get_balance(&self, user_id: i64) -> Result<Decimal, BalanceError> {
        let user = self.store.get_user(user_id).await?;
        Ok(user.balance)
    }

    /// 원장 조회 (최신순)
    /// List ledger entries, newest first
    pub async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError> {
        // 존재하지 않는 사용자는 빈 목록 대신 404
        self.store.get_user(user_id).await?;
        self.store.list_transactions(user_id, limit, offset).await
    }
}

#[async_trait]
impl<S: BalanceStore> BalanceOperations for BalanceService<S> {
    async fn withdraw_balance(&self, user_id: i64, amount: Decimal) -> Result<WithdrawResult, BalanceError> {
        BalanceService::withdraw_balance(self, user_id, amount).await
    }

    async fn get_balance(&self, user_id: i64) -> Result<Decimal, BalanceError> {
        BalanceService::get_balance(self, user_id).await
    }

    async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError> {
        BalanceService::list_transactions(self, user_id, limit, offset).await
    }
}
