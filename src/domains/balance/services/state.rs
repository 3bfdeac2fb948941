// Balance domain state
// 잔고 도메인 상태
use std::sync::Arc;

use crate::domains::balance::services::{BalanceOperations, BalanceService, BalanceStore, PgBalanceStore};
use crate::shared::database::Database;

/// Balance domain state
/// 잔고 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct BalanceState {
    pub balance_service: Arc<dyn BalanceOperations>,
}

impl BalanceState {
    /// Create BalanceState with database
    /// BalanceState 생성 (PostgreSQL 저장소)
    pub fn new(db: Database) -> Self {
        Self::with_store(Arc::new(PgBalanceStore::new(db)))
    }

    /// 임의의 저장소로 생성 (인메모리 저장소 등)
    pub fn with_store<S: BalanceStore>(store: Arc<S>) -> Self {
        Self {
            balance_service: Arc::new(BalanceService::new(store)),
        }
    }
}
