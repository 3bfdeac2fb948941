// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: HTTP 통합 테스트에서 공통으로 사용하는 셋업 함수 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let fetcher = CountingFetcher::new(Duration::ZERO);
//     let (app, store) = memory_app(&[(1, "1000.00")], fetcher.clone());
//     let (status, body) = send(&app, get("/items")).await;
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use market_api::domains::balance::services::{BalanceState, MemoryBalanceStore};
use market_api::domains::items::models::Item;
use market_api::domains::items::services::{ItemFetcher, ItemsState};
use market_api::routes::build_app;
use market_api::shared::cache::TtlCache;
use market_api::shared::config::ServerConfig;
use market_api::shared::errors::ItemError;
use market_api::shared::services::AppState;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// 호출 횟수를 세는 upstream mock
pub struct CountingFetcher {
    calls: AtomicUsize,
    latency: Duration,
    failing: AtomicBool,
}

impl CountingFetcher {
    pub fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            latency,
            failing: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemFetcher for CountingFetcher {
    async fn fetch_items(&self) -> Result<Vec<Item>, ItemError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(ItemError::for_list("tradable", ItemError::UpstreamStatus(502)));
        }

        Ok(sample_items())
    }
}

pub fn sample_items() -> Vec<Item> {
    vec![
        Item {
            market_hash_name: "AK-47 | Redline (Field-Tested)".to_string(),
            currency: "USD".to_string(),
            suggested_price: Some(dec("14.20")),
            item_page: "https://skinport.com/item/ak-47-redline-field-tested".to_string(),
            market_page: "https://skinport.com/market?item=AK-47%20Redline".to_string(),
            tradable_min_price: Some(dec("12.50")),
            non_tradable_min_price: Some(dec("10.20")),
            max_price: Some(dec("40.01")),
            mean_price: Some(dec("15.33")),
            quantity: 25,
            created_at: 1535988253,
            updated_at: 1700000000,
        },
        Item {
            market_hash_name: "AWP | Asiimov (Battle-Scarred)".to_string(),
            currency: "USD".to_string(),
            suggested_price: None,
            item_page: String::new(),
            market_page: String::new(),
            tradable_min_price: Some(dec("100.50")),
            non_tradable_min_price: None,
            max_price: None,
            mean_price: None,
            quantity: 3,
            created_at: 1535988253,
            updated_at: 1700000000,
        },
    ]
}

pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        read_timeout: Duration::from_secs(10),
        write_timeout: Duration::from_secs(10),
        shutdown_timeout: Duration::from_secs(5),
    }
}

/// 인메모리 저장소 + mock upstream으로 전체 라우터 구성
pub fn memory_app(
    users: &[(i64, &str)],
    fetcher: Arc<CountingFetcher>,
) -> (Router, Arc<MemoryBalanceStore>) {
    memory_app_with_server(users, fetcher, test_server_config())
}

/// 서버 설정(타임아웃 등)을 지정해서 라우터 구성
pub fn memory_app_with_server(
    users: &[(i64, &str)],
    fetcher: Arc<CountingFetcher>,
    server: ServerConfig,
) -> (Router, Arc<MemoryBalanceStore>) {
    let store = Arc::new(MemoryBalanceStore::with_users(
        users.iter().map(|(id, balance)| (*id, dec(balance))),
    ));
    let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));

    let app_state = AppState::new(
        ItemsState::new(fetcher, cache, Duration::from_secs(300)),
        BalanceState::with_store(store.clone()),
    );

    (build_app(app_state, &server), store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 요청 1건 실행 → (상태 코드, 원본 바이트)
pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// 요청 1건 실행 → (상태 코드, JSON 본문)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, request).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
