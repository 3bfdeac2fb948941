use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::{Mutex as RowLock, OwnedMutexGuard};

use super::BalanceStore;
use crate::domains::balance::models::{Transaction, User};
use crate::shared::errors::BalanceError;

/// 인메모리 저장소 (테스트 / 로컬 실행용)
/// In-memory balance store
///
/// 사용자 행마다 tokio Mutex 하나 (SELECT ... FOR UPDATE 역할)
/// 변경은 트랜잭션에 쌓아두고 commit 시점에만 반영
#[derive(Default)]
pub struct MemoryBalanceStore {
    rows: Mutex<HashMap<i64, Arc<RowLock<Decimal>>>>,
    ledger: Mutex<Vec<Transaction>>,
    fail_saves: AtomicBool,
}

/// 인메모리 트랜잭션 핸들
pub struct MemoryTx {
    locked: HashMap<i64, LockedRow>,
    pending: Vec<Transaction>,
}

struct LockedRow {
    guard: OwnedMutexGuard<Decimal>,
    staged: Option<Decimal>,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 사용자 목록으로 생성
    pub fn with_users(users: impl IntoIterator<Item = (i64, Decimal)>) -> Self {
        let store = Self::new();
        for (id, balance) in users {
            store.insert_user(id, balance);
        }
        store
    }

    /// 사용자 추가 (이미 있으면 덮어씀)
    pub fn insert_user(&self, id: i64, balance: Decimal) {
        self.rows.lock().insert(id, Arc::new(RowLock::new(balance)));
    }

    /// 이후 save_transaction을 실패시킴 (롤백 경로 테스트용)
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// 커밋된 원장 전체 (사용자 필터)
    pub fn ledger_for(&self, user_id: i64) -> Vec<Transaction> {
        self.ledger
            .lock()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    fn row(&self, id: i64) -> Result<Arc<RowLock<Decimal>>, BalanceError> {
        self.rows
            .lock()
            .get(&id)
            .cloned()
            .ok_or(BalanceError::UserNotFound { id })
    }

    async fn lock_row<'a>(&self, tx: &'a mut MemoryTx, id: i64) -> Result<&'a mut LockedRow, BalanceError> {
        if !tx.locked.contains_key(&id) {
            let guard = self.row(id)?.lock_owned().await;
            tx.locked.insert(id, LockedRow { guard, staged: None });
        }

        tx.locked
            .get_mut(&id)
            .ok_or(BalanceError::UserNotFound { id })
    }
}

#[async_trait]
impl BalanceStore for MemoryBalanceStore {
    type Tx = MemoryTx;

    async fn begin_tx(&self) -> Result<MemoryTx, BalanceError> {
        Ok(MemoryTx {
            locked: HashMap::new(),
            pending: Vec::new(),
        })
    }

    async fn get_user(&self, id: i64) -> Result<User, BalanceError> {
        let row = self.row(id)?;
        let balance = *row.lock().await;
        Ok(User::new(id, balance))
    }

    async fn get_user_for_update(&self, tx: &mut MemoryTx, id: i64) -> Result<User, BalanceError> {
        let row = self.lock_row(tx, id).await?;
        let balance = row.staged.unwrap_or(*row.guard);
        Ok(User::new(id, balance))
    }

    async fn update_balance(&self, tx: &mut MemoryTx, id: i64, balance: Decimal) -> Result<(), BalanceError> {
        let row = self.lock_row(tx, id).await?;
        row.staged = Some(balance);
        Ok(())
    }

    async fn save_transaction(&self, tx: &mut MemoryTx, entry: &Transaction) -> Result<(), BalanceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BalanceError::DatabaseError("save disabled".to_string()));
        }

        let duplicate = tx.pending.iter().any(|t| t.id == entry.id)
            || self.ledger.lock().iter().any(|t| t.id == entry.id);
        if duplicate {
            tracing::error!(transaction_id = %entry.id, "duplicate transaction id");
            return Err(BalanceError::DuplicateTransaction { id: entry.id });
        }

        tx.pending.push(entry.clone());
        Ok(())
    }

    async fn commit(&self, tx: MemoryTx) -> Result<(), BalanceError> {
        let MemoryTx { mut locked, pending } = tx;

        // 락을 놓기 전에 잔고와 원장을 함께 반영
        for row in locked.values_mut() {
            if let Some(balance) = row.staged.take() {
                *row.guard = balance;
            }
        }
        self.ledger.lock().extend(pending);

        drop(locked);
        Ok(())
    }

    async fn rollback(&self, tx: MemoryTx) -> Result<(), BalanceError> {
        drop(tx);
        Ok(())
    }

    async fn list_transactions(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError> {
        let mut entries = self.ledger_for(user_id);
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(entries
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
