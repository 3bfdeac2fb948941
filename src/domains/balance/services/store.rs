use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domains::balance::models::{Transaction, User};
use crate::shared::database::{Database, PgTx, TransactionRepository, UserRepository};
use crate::shared::errors::BalanceError;

// =====================================================
// BalanceStore - 사용자 / 원장 저장소 추상화
// =====================================================
// 역할: 출금 서비스가 의존하는 트랜잭션 단위 저장소 연산
//
// 구현체:
// - PgBalanceStore: PostgreSQL (SERIALIZABLE + SELECT ... FOR UPDATE)
// - MemoryBalanceStore: 테스트용 인메모리 구현 (사용자별 async 락)
//
// 트랜잭션 핸들(Tx)은 명시적인 소유 값으로 전달됨
// commit / rollback은 핸들을 소비하므로 이후 사용은 컴파일 에러
// =====================================================

#[async_trait]
pub trait BalanceStore: Send + Sync + 'static {
    /// 트랜잭션 핸들 타입
    type Tx: Send;

    /// 트랜잭션 시작 (SERIALIZABLE)
    async fn begin_tx(&self) -> Result<Self::Tx, BalanceError>;

    /// 사용자 조회 (락 없음)
    async fn get_user(&self, id: i64) -> Result<User, BalanceError>;

    /// 사용자 조회 + 행 잠금 (트랜잭션 종료까지 유지)
    async fn get_user_for_update(&self, tx: &mut Self::Tx, id: i64) -> Result<User, BalanceError>;

    /// 잔고 갱신
    async fn update_balance(
        &self,
        tx: &mut Self::Tx,
        id: i64,
        balance: Decimal,
    ) -> Result<(), BalanceError>;

    /// 원장 기록 저장
    async fn save_transaction(&self, tx: &mut Self::Tx, entry: &Transaction) -> Result<(), BalanceError>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), BalanceError>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), BalanceError>;

    /// 사용자별 원장 조회 (최신순)
    async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError>;
}

/// PostgreSQL 저장소
/// PostgreSQL-backed store (users + transactions repositories)
pub struct PgBalanceStore {
    db: Database,
    users: UserRepository,
    transactions: TransactionRepository,
}

impl PgBalanceStore {
    pub fn new(db: Database) -> Self {
        Self {
            users: UserRepository::new(db.pool().clone()),
            transactions: TransactionRepository::new(db.pool().clone()),
            db,
        }
    }
}

#[async_trait]
impl BalanceStore for PgBalanceStore {
    type Tx = PgTx;

    async fn begin_tx(&self) -> Result<PgTx, BalanceError> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| BalanceError::from_sqlx("failed to begin transaction", e))?;

        // 첫 쿼리 전에 격리 수준 지정
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| BalanceError::from_sqlx("failed to set isolation level", e))?;

        Ok(tx)
    }

    async fn get_user(&self, id: i64) -> Result<User, BalanceError> {
        self.users.get_by_id(id).await
    }

    async fn get_user_for_update(&self, tx: &mut PgTx, id: i64) -> Result<User, BalanceError> {
        self.users.get_for_update(tx, id).await
    }

    async fn update_balance(&self, tx: &mut PgTx, id: i64, balance: Decimal) -> Result<(), BalanceError> {
        self.users.update_balance(tx, id, balance).await
    }

    async fn save_transaction(&self, tx: &mut PgTx, entry: &Transaction) -> Result<(), BalanceError> {
        self.transactions.create(tx, entry).await
    }

    async fn commit(&self, tx: PgTx) -> Result<(), BalanceError> {
        tx.commit()
            .await
            .map_err(|e| BalanceError::from_sqlx("failed to commit transaction", e))
    }

    async fn rollback(&self, tx: PgTx) -> Result<(), BalanceError> {
        tx.rollback()
            .await
            .map_err(|e| BalanceError::from_sqlx("failed to rollback transaction", e))
    }

    async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError> {
        self.transactions.list_by_user(user_id, limit, offset).await
    }
}
