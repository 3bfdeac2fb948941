use std::sync::Arc;
use std::time::Duration;

use crate::domains::balance::services::state::BalanceState;
use crate::domains::items::services::state::ItemsState;
use crate::domains::items::services::{Catalogue, ItemFetcher};
use crate::shared::cache::TtlCache;
use crate::shared::database::Database;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    pub items_state: ItemsState,
    pub balance_state: BalanceState,
}

impl AppState {
    /// 이미 구성된 도메인 State로 생성 (테스트에서 mock 주입)
    pub fn new(items_state: ItemsState, balance_state: BalanceState) -> Self {
        Self {
            items_state,
            balance_state,
        }
    }

    /// Create AppState with database and upstream fetcher
    /// 운영 구성: PostgreSQL 저장소 + upstream 공급자 + 공유 캐시
    pub fn with_database(
        db: Database,
        fetcher: Arc<dyn ItemFetcher>,
        cache: Arc<TtlCache<Catalogue>>,
        cache_ttl: Duration,
    ) -> Self {
        Self::new(
            ItemsState::new(fetcher, cache, cache_ttl),
            BalanceState::new(db),
        )
    }
}
