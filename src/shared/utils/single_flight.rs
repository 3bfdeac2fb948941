/// Single-flight 그룹
/// Single-flight group
///
/// 역할:
/// - 같은 키로 동시에 들어온 요청들을 하나의 로더 실행으로 합침
/// - 모든 대기자는 같은 결과(값 또는 에러)를 받음
///
/// 동작:
/// 1. 키에 진행 중인 호출이 있으면 그 Shared future에 합류
/// 2. 없으면 로더를 tokio 태스크로 실행하고 Shared future를 등록
/// 3. 로더가 끝나면 태스크가 직접 키를 제거 (이후 miss는 새로 실행)
///
/// 로더는 별도 태스크에서 실행되므로 대기자가 취소(drop)되어도 로더는 계속 진행됨.
/// 대기자는 자신의 future가 drop되는 순간 분리됨.
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::task::JoinError;

type Call<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

pub struct SingleFlight<T, E> {
    calls: Arc<Mutex<HashMap<String, Call<T, E>>>>,
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + From<JoinError> + 'static,
{
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 키 단위로 로더 실행을 합침
    /// Run `loader` once per key among concurrent callers
    ///
    /// # Arguments
    /// * `key` - 합칠 기준 키
    /// * `loader` - 진행 중인 호출이 없을 때만 실행되는 로더
    pub async fn run<F, Fut>(&self, key: &str, loader: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let call = {
            let mut calls = self.calls.lock();

            match calls.get(key) {
                Some(call) => call.clone(),
                None => {
                    let registry = self.calls.clone();
                    let owned_key = key.to_string();
                    let load = loader();

                    // 락을 잡은 상태에서 spawn + insert 하므로
                    // 태스크의 remove는 항상 insert 이후에 실행됨
                    let task = tokio::spawn(async move {
                        // 패닉으로 끝나도 키가 제거되도록 guard 사용
                        let _release = Release {
                            registry,
                            key: owned_key,
                        };
                        load.await
                    });

                    let call: Call<T, E> = async move {
                        match task.await {
                            Ok(result) => result,
                            Err(join_err) => Err(E::from(join_err)),
                        }
                    }
                    .boxed()
                    .shared();

                    calls.insert(key.to_string(), call.clone());
                    call
                }
            }
        };

        call.await
    }

    /// 현재 진행 중인 키 개수
    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}

/// 로더 종료 시 (정상/패닉 모두) 키를 제거
struct Release<T, E> {
    registry: Arc<Mutex<HashMap<String, Call<T, E>>>>,
    key: String,
}

impl<T, E> Drop for Release<T, E> {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.key);
    }
}

impl<T, E> Default for SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + From<JoinError> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
