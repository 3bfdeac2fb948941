use axum::{
    routing::{get, post},
    Router,
};
use crate::shared::services::AppState;

use super::handlers;

/// Balance 라우터 생성
/// Create balance router
///
/// # Routes
/// - `GET  /users/:id/balance` - 잔고 조회
/// - `POST /users/:id/withdraw` - 출금
/// - `GET  /users/:id/transactions` - 원장 조회
pub fn create_balance_router() -> Router<AppState> {
    Router::new()
        .route("/users/:id/balance", get(handlers::get_balance))
        .route("/users/:id/withdraw", post(handlers::withdraw))
        .route("/users/:id/transactions", get(handlers::get_transactions))
}
