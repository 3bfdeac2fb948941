// Items domain state
// 아이템 도메인 상태
use std::sync::Arc;
use std::time::Duration;

use crate::domains::items::services::{Catalogue, ItemFetcher, ItemService};
use crate::shared::cache::TtlCache;

/// Items domain state
/// 아이템 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct ItemsState {
    pub item_service: ItemService,
}

impl ItemsState {
    /// Create ItemsState with an upstream fetcher and shared cache
    /// ItemsState 생성 (upstream 공급자 + 공유 캐시 필요)
    pub fn new(fetcher: Arc<dyn ItemFetcher>, cache: Arc<TtlCache<Catalogue>>, ttl: Duration) -> Self {
        Self {
            item_service: ItemService::new(fetcher, cache, ttl),
        }
    }
}
