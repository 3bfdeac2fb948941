use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domains::items::models::Item;
use crate::shared::cache::TtlCache;
use crate::shared::errors::ItemError;
use crate::shared::utils::SingleFlight;

/// 캐시 / single-flight 공용 키
pub const ITEMS_CACHE_KEY: &str = "items";

/// 합쳐진 카탈로그 (캐시에 저장되는 값)
pub type Catalogue = Arc<Vec<Item>>;

/// 카탈로그 공급자
/// Source of the merged item catalogue
///
/// 실제 구현은 SkinportClient, 테스트에서는 카운팅 mock 사용
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Item>, ItemError>;
}

/// 아이템 카탈로그 서비스
/// Item catalogue service
///
/// 역할:
/// - TTL 캐시에서 카탈로그 조회
/// - 캐시 miss 시 single-flight로 upstream 호출을 1회로 합침
/// - 성공한 결과만 캐시 (실패는 캐시하지 않음)
#[derive(Clone)]
pub struct ItemService {
    fetcher: Arc<dyn ItemFetcher>,
    cache: Arc<TtlCache<Catalogue>>,
    flight: Arc<SingleFlight<Catalogue, ItemError>>,
    ttl: Duration,
}

impl ItemService {
    /// 생성자
    /// Constructor
    ///
    /// # Arguments
    /// * `fetcher` - upstream 카탈로그 공급자
    /// * `cache` - 공유 TTL 캐시 (종료 시 close 책임은 호출자)
    /// * `ttl` - 캐시 유지 시간
    pub fn new(fetcher: Arc<dyn ItemFetcher>, cache: Arc<TtlCache<Catalogue>>, ttl: Duration) -> Self {
        Self {
            fetcher,
            cache,
            flight: Arc::new(SingleFlight::new()),
            ttl,
        }
    }

    /// 카탈로그 조회
    /// Get the merged catalogue
    ///
    /// # Returns
    /// * `Ok(Catalogue)` - 캐시 또는 upstream 결과
    /// * `Err(ItemError)` - upstream 실패 (동시 대기자 모두 같은 에러)
    pub async fn get_items(&self) -> Result<Catalogue, ItemError> {
        if let Some(items) = self.cache.get(ITEMS_CACHE_KEY) {
            tracing::debug!("items cache hit");
            return Ok(items);
        }

        let fetcher = self.fetcher.clone();
        let cache = self.cache.clone();
        let ttl = self.ttl;

        self.flight
            .run(ITEMS_CACHE_KEY, move || async move {
                // 앞선 로더가 방금 채웠을 수 있음
                if let Some(items) = cache.get(ITEMS_CACHE_KEY) {
                    return Ok(items);
                }

                tracing::debug!("items cache miss, fetching from upstream");
                let items: Catalogue = Arc::new(fetcher.fetch_items().await?);
                cache.set(ITEMS_CACHE_KEY, items.clone(), ttl);

                tracing::info!(count = items.len(), "items cache refreshed");
                Ok(items)
            })
            .await
    }

    /// 시작 시 캐시 예열 (실패해도 서버는 계속 시작)
    /// Pre-populate the cache; failure is logged and ignored
    pub async fn warm_up(&self) {
        match self.get_items().await {
            Ok(items) => tracing::info!(count = items.len(), "items cache warmed up"),
            Err(err) => tracing::warn!(error = %err, "failed to warm up items cache"),
        }
    }
}
