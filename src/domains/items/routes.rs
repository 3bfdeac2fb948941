use axum::{routing::get, Router};
use crate::shared::services::AppState;

use super::handlers;

/// Items 라우터 생성
/// Create items router
///
/// # Routes
/// - `GET /items` - 카탈로그 조회
pub fn create_items_router() -> Router<AppState> {
    Router::new().route("/items", get(handlers::get_items))
}
