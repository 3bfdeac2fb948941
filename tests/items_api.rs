// =====================================================
// 아이템 카탈로그 API 통합 테스트
// =====================================================

mod common;
use common::*;
use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;
use market_api::shared::config::ServerConfig;

/// 테스트: 두 번 연속 조회 시 upstream은 1회만 호출
///
/// 두 응답은 바이트 단위로 동일해야 합니다.
#[tokio::test]
async fn test_cache_hit_serves_identical_body() {
    let fetcher = CountingFetcher::new(Duration::ZERO);
    let (app, _) = memory_app(&[], fetcher.clone());

    let (status1, body1) = send_raw(&app, get("/items")).await;
    let (status2, body2) = send_raw(&app, get("/items")).await;

    assert_eq!(status1, StatusCode::OK);
    assert_eq!(status2, StatusCode::OK);
    assert_eq!(body1, body2);
    assert_eq!(fetcher.calls(), 1);
}

/// 테스트: 응답 형식 (가격은 문자열, 없는 가격은 null)
#[tokio::test]
async fn test_items_payload_shape() {
    let fetcher = CountingFetcher::new(Duration::ZERO);
    let (app, _) = memory_app(&[], fetcher);

    let (status, body) = send(&app, get("/items")).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let awp = items
        .iter()
        .find(|i| i["market_hash_name"] == "AWP | Asiimov (Battle-Scarred)")
        .unwrap();
    assert_eq!(awp["tradable_min_price"], "100.50");
    assert!(awp["non_tradable_min_price"].is_null());
    assert_eq!(awp["quantity"], 3);
}

/// 테스트: 콜드 캐시에 100개 동시 요청 → upstream 1회
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_cold_cache_storm_collapses_to_one_upstream_call() {
    let fetcher = CountingFetcher::new(Duration::from_millis(200));
    let (app, _) = memory_app(&[], fetcher.clone());

    let mut handles = Vec::new();
    for _ in 0..100 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { send_raw(&app, get("/items")).await }));
    }

    let mut bodies = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert_eq!(fetcher.calls(), 1);
    assert!(bodies.iter().all(|b| b == &bodies[0]));
}

/// 테스트: upstream 실패 → 500, 실패는 캐시하지 않음
#[tokio::test]
async fn test_upstream_failure_is_500_and_not_cached() {
    let fetcher = CountingFetcher::new(Duration::ZERO);
    fetcher.set_failing(true);
    let (app, _) = memory_app(&[], fetcher.clone());

    let (status, body) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "failed to fetch items" }));

    fetcher.set_failing(false);
    let (status, _) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetcher.calls(), 2);
}

/// 테스트: 헬스 체크
#[tokio::test]
async fn test_health() {
    let (app, _) = memory_app(&[], CountingFetcher::new(Duration::ZERO));

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

/// 테스트: OpenAPI 문서에 모든 경로 노출
#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (app, _) = memory_app(&[], CountingFetcher::new(Duration::ZERO));

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/items",
        "/users/{id}/balance",
        "/users/{id}/withdraw",
        "/users/{id}/transactions",
        "/health",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

/// 테스트: 처리 시간이 write_timeout을 넘으면 JSON 500
///
/// 로더는 별도 태스크라 계속 진행되고, 이후 요청은 캐시에서 응답
#[tokio::test]
async fn test_slow_upstream_past_write_timeout_is_json_500() {
    let fetcher = CountingFetcher::new(Duration::from_millis(300));
    let server = ServerConfig {
        write_timeout: Duration::from_millis(100),
        ..test_server_config()
    };
    let (app, _) = memory_app_with_server(&[], fetcher.clone(), server);

    let (status, body) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));

    tokio::time::sleep(Duration::from_millis(400)).await;

    let (status, _) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetcher.calls(), 1);
}
