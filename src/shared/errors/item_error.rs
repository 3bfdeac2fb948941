use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 아이템 카탈로그 조회 에러
/// Item catalogue errors
///
/// Clone이 필요: single-flight로 같은 결과를 여러 대기자에게 전달
#[derive(Error, Debug, Clone)]
pub enum ItemError {
    /// 요청 전송 실패 (네트워크, 타임아웃)
    /// Request could not be sent or timed out
    #[error("failed to execute request: {0}")]
    Request(String),

    /// 200이 아닌 응답
    /// Upstream answered with a non-200 status
    #[error("unexpected status code: {0}")]
    UpstreamStatus(u16),

    /// 응답 본문 디코딩 실패 (Brotli / JSON)
    /// Body could not be decompressed or parsed
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// 어느 목록(tradable / non-tradable)에서 실패했는지 표시
    /// Failure attributed to one of the two upstream lists
    #[error("failed to fetch {list} items: {source}")]
    List {
        list: &'static str,
        source: Box<ItemError>,
    },

    /// 로더 태스크가 패닉/취소됨
    /// The loader task panicked or was aborted
    #[error("item loader aborted: {0}")]
    LoaderAborted(String),
}

impl ItemError {
    pub fn for_list(list: &'static str, err: ItemError) -> Self {
        ItemError::List {
            list,
            source: Box::new(err),
        }
    }
}

impl From<tokio::task::JoinError> for ItemError {
    fn from(err: tokio::task::JoinError) -> Self {
        ItemError::LoaderAborted(err.to_string())
    }
}

/// ItemError를 HTTP 응답으로 변환 (모두 500)
impl From<ItemError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: ItemError) -> Self {
        tracing::error!(error = %err, "failed to fetch items");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "failed to fetch items" })),
        )
    }
}
