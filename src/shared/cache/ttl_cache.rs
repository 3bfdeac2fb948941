// =====================================================
// TtlCache - 메모리 기반 TTL 캐시
// =====================================================
// 역할: 키별 만료 시간을 가진 인메모리 저장소
//
// 핵심 설계:
// 1. HashMap + RwLock (get/len은 읽기 락, 나머지는 쓰기 락)
// 2. get 시점에 만료 여부를 직접 확인 (reaper와 무관하게 만료 값은 반환하지 않음)
// 3. 백그라운드 reaper가 cleanup_interval마다 만료 항목 삭제
// 4. close()는 reaper를 정확히 한 번만 정지
// =====================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// 캐시 항목 (값 + 만료 시각)
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

type Entries<V> = RwLock<HashMap<String, Entry<V>>>;

/// 키별 TTL을 가진 인메모리 캐시
/// In-memory cache with per-entry expiry
///
/// 값 타입으로 파라미터화되어 있으므로 타입 불일치는 컴파일 에러
/// V는 보통 `Arc<...>` (clone 비용이 참조 복사)
pub struct TtlCache<V> {
    entries: Arc<Entries<V>>,
    stop: CancellationToken,
    closed: AtomicBool,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// 새 캐시 생성 + reaper 시작
    /// Create a cache and start the background reaper
    ///
    /// tokio 런타임 안에서 호출해야 함 (reaper는 tokio 태스크)
    pub fn new(cleanup_interval: Duration) -> Self {
        let entries: Arc<Entries<V>> = Arc::new(RwLock::new(HashMap::new()));
        let stop = CancellationToken::new();

        Self::spawn_reaper(Arc::downgrade(&entries), stop.clone(), cleanup_interval);

        Self {
            entries,
            stop,
            closed: AtomicBool::new(false),
        }
    }

    /// 값 조회 (없거나 만료되었으면 None)
    /// Get a live value
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        if entry.is_expired(Instant::now()) {
            return None;
        }

        Some(entry.value.clone())
    }

    /// 값 저장 (기존 값 덮어쓰기, 만료 = now + ttl)
    /// Insert or overwrite a value
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.into(), entry);
    }

    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// 저장된 항목 수 (reaper가 아직 지우지 않은 만료 항목 포함)
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// reaper 정지 (여러 번 호출해도 한 번만 동작)
    /// Stop the reaper; later calls are no-ops
    pub fn close(&self) {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.stop.cancel();
            tracing::debug!("cache reaper stopped");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// 만료 항목 일괄 삭제, 삭제한 개수 반환
    fn purge_expired(entries: &Entries<V>) -> usize {
        let now = Instant::now();
        let mut entries = entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    fn spawn_reaper(entries: Weak<Entries<V>>, stop: CancellationToken, every: Duration) {
        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // 첫 tick은 즉시 발생하므로 건너뜀
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        // 캐시가 이미 drop되었으면 종료
                        let Some(entries) = entries.upgrade() else { break };
                        let removed = Self::purge_expired(&entries);
                        if removed > 0 {
                            tracing::debug!(removed, "expired cache entries purged");
                        }
                    }
                }
            }
        });
    }
}

impl<V> Drop for TtlCache<V> {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
