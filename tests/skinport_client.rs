// =====================================================
// Skinport 클라이언트 통합 테스트
// =====================================================
// 로컬 axum 서버가 Skinport /items 응답을 흉내냄 (Brotli / plain JSON)

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_compression::tokio::write::BrotliEncoder;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use market_api::shared::clients::SkinportClient;
use market_api::shared::errors::ItemError;

const TRADABLE: &str = r#"[
    {"market_hash_name":"AK-47 | Redline (Field-Tested)","currency":"USD","suggested_price":14.2,
     "item_page":"https://skinport.com/item/ak","market_page":"https://skinport.com/market/ak",
     "min_price":12.5,"max_price":40.01,"mean_price":15.33,"quantity":20,
     "created_at":1535988253,"updated_at":1700000000},
    {"market_hash_name":"AWP | Asiimov (Battle-Scarred)","currency":"USD","min_price":100.5,"quantity":3}
]"#;

const NON_TRADABLE: &str = r#"[
    {"market_hash_name":"AK-47 | Redline (Field-Tested)","currency":"USD","min_price":10.2,"quantity":5,
     "item_page":"https://skinport.com/item/ak-nt"},
    {"market_hash_name":"Sticker | Crown (Foil)","currency":"USD","min_price":null,"quantity":1}
]"#;

/// mock 서버 동작 방식
#[derive(Clone, Copy)]
enum Mode {
    Brotli,
    Plain,
    FailNonTradable,
    Garbage,
}

#[derive(Clone)]
struct MockState {
    mode: Mode,
    seen: Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>,
}

async fn brotli(body: &str) -> Vec<u8> {
    let mut encoder = BrotliEncoder::new(Vec::new());
    encoder.write_all(body.as_bytes()).await.unwrap();
    encoder.shutdown().await.unwrap();
    encoder.into_inner()
}

async fn items(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let accept = headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.seen.lock().push((params.clone(), accept));

    let tradable = params.get("tradable").map(String::as_str) == Some("true");
    let payload = if tradable { TRADABLE } else { NON_TRADABLE };

    match state.mode {
        Mode::Brotli => (
            [(header::CONTENT_ENCODING, "br"), (header::CONTENT_TYPE, "application/json")],
            brotli(payload).await,
        )
            .into_response(),
        Mode::Plain => ([(header::CONTENT_TYPE, "application/json")], payload.to_string()).into_response(),
        Mode::FailNonTradable if !tradable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Mode::FailNonTradable => ([(header::CONTENT_TYPE, "application/json")], payload.to_string()).into_response(),
        Mode::Garbage => ([(header::CONTENT_TYPE, "application/json")], "{not an array").into_response(),
    }
}

/// mock 서버 시작 → (base url, 요청 기록)
async fn start_mock(mode: Mode) -> (String, MockState) {
    let state = MockState {
        mode,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new().route("/v1/items", get(items)).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), state)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// 테스트: Brotli 응답 두 목록을 받아 병합
#[tokio::test]
async fn test_fetches_and_merges_brotli_lists() {
    let (base, state) = start_mock(Mode::Brotli).await;
    let client = SkinportClient::new(base, Duration::from_secs(5)).unwrap();

    let items = client.fetch_catalogue().await.unwrap();
    assert_eq!(items.len(), 3);

    let ak = items
        .iter()
        .find(|i| i.market_hash_name == "AK-47 | Redline (Field-Tested)")
        .unwrap();
    assert_eq!(ak.tradable_min_price, Some(dec("12.5")));
    assert_eq!(ak.non_tradable_min_price, Some(dec("10.2")));
    assert_eq!(ak.max_price, Some(dec("40.01")));
    assert_eq!(ak.quantity, 25);
    assert_eq!(ak.item_page, "https://skinport.com/item/ak");

    let sticker = items
        .iter()
        .find(|i| i.market_hash_name == "Sticker | Crown (Foil)")
        .unwrap();
    assert_eq!(sticker.tradable_min_price, None);
    assert_eq!(sticker.non_tradable_min_price, None);

    // 요청 형식 확인
    let seen = state.seen.lock().clone();
    assert_eq!(seen.len(), 2);
    for (params, accept) in &seen {
        assert_eq!(params.get("app_id").map(String::as_str), Some("730"));
        assert_eq!(params.get("currency").map(String::as_str), Some("USD"));
        assert_eq!(accept.as_deref(), Some("br"));
    }
    let mut flags: Vec<_> = seen.iter().filter_map(|(p, _)| p.get("tradable").cloned()).collect();
    flags.sort();
    assert_eq!(flags, vec!["false".to_string(), "true".to_string()]);
}

/// 테스트: Content-Encoding이 없으면 plain JSON으로 디코딩
#[tokio::test]
async fn test_plain_json_response() {
    let (base, _) = start_mock(Mode::Plain).await;
    let client = SkinportClient::new(base, Duration::from_secs(5)).unwrap();

    let items = client.fetch_catalogue().await.unwrap();

    assert_eq!(items.len(), 3);
}

/// 테스트: 200이 아닌 응답 → 어느 목록인지 표시된 에러
#[tokio::test]
async fn test_non_200_is_attributed_to_its_list() {
    let (base, _) = start_mock(Mode::FailNonTradable).await;
    let client = SkinportClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client.fetch_catalogue().await.unwrap_err();

    match &err {
        ItemError::List { list, source } => {
            assert_eq!(*list, "non-tradable");
            assert!(matches!(**source, ItemError::UpstreamStatus(503)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "failed to fetch non-tradable items: unexpected status code: 503"
    );
}

/// 테스트: 잘못된 JSON → Decode 에러
#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (base, _) = start_mock(Mode::Garbage).await;
    let client = SkinportClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client.fetch_catalogue().await.unwrap_err();

    match err {
        ItemError::List { source, .. } => assert!(matches!(*source, ItemError::Decode(_))),
        other => panic!("unexpected error: {other:?}"),
    }
}
