// Balance Handler
// 잔고 핸들러
// 역할: 잔고 조회 / 출금 / 원장 조회 API 엔드포인트 처리

use crate::shared::services::AppState;
use crate::domains::balance::models::{
    BalanceResponse, TransactionHistoryQuery, TransactionHistoryResponse, WithdrawRequest,
    WithdrawResponse,
};
use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// 경로의 사용자 ID 파싱 (정수가 아니면 400)
fn parse_user_id(raw: &str) -> Result<i64, (StatusCode, Json<serde_json::Value>)> {
    raw.parse::<i64>().map_err(|_| bad_request("invalid user id"))
}

/// 잔고 조회 핸들러
/// Get user balance
///
/// 경로: GET /users/{id}/balance
///
/// # Returns
/// * `200 OK` - 현재 잔고
/// * `400 Bad Request` - 정수가 아닌 사용자 ID
/// * `404 Not Found` - 사용자 없음
/// * `500 Internal Server Error` - 서버 오류
#[utoipa::path(
    get,
    path = "/users/{id}/balance",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Balance"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user_id = parse_user_id(&id)?;

    let balance = app_state
        .balance_state
        .balance_service
        .get_balance(user_id)
        .await?;

    Ok(Json(BalanceResponse { user_id, balance }))
}

/// 출금 핸들러
/// Withdraw from user balance
///
/// 경로: POST /users/{id}/withdraw
///
/// # Request Body
/// ```json
/// { "amount": "100.00" }
/// ```
///
/// # Returns
/// * `200 OK` - 출금 완료 (원장 기록 ID, 차감 전/후 잔고)
/// * `400 Bad Request` - 잘못된 요청 본문, 0 이하 금액, 잔고 부족
/// * `404 Not Found` - 사용자 없음
/// * `500 Internal Server Error` - 서버 오류
#[utoipa::path(
    post,
    path = "/users/{id}/withdraw",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Withdraw committed", body = WithdrawResponse),
        (status = 400, description = "Invalid request, non-positive amount or insufficient balance"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Balance"
)]
pub async fn withdraw(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> Result<Json<WithdrawResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user_id = parse_user_id(&id)?;

    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected withdraw body");
        bad_request("invalid request body")
    })?;

    if request.amount <= Decimal::ZERO {
        return Err(bad_request("amount must be positive"));
    }

    let result = app_state
        .balance_state
        .balance_service
        .withdraw_balance(user_id, request.amount)
        .await?;

    Ok(Json(result.into()))
}

/// 원장 조회 핸들러
/// List ledger entries for a user (newest first)
///
/// 경로: GET /users/{id}/transactions?limit=&offset=
///
/// # Query Parameters
/// * `limit` - 최대 개수 (기본 50, 1..=100으로 보정)
/// * `offset` - 건너뛸 개수 (기본 0)
#[utoipa::path(
    get,
    path = "/users/{id}/transactions",
    params(
        ("id" = i64, Path, description = "User ID"),
        TransactionHistoryQuery
    ),
    responses(
        (status = 200, description = "Ledger page", body = TransactionHistoryResponse),
        (status = 400, description = "Invalid user id or query"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Balance"
)]
pub async fn get_transactions(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<TransactionHistoryQuery>, QueryRejection>,
) -> Result<Json<TransactionHistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user_id = parse_user_id(&id)?;
    let Query(query) = query.map_err(|_| bad_request("invalid query parameters"))?;
    let (limit, offset) = query.page();

    let transactions = app_state
        .balance_state
        .balance_service
        .list_transactions(user_id, limit, offset)
        .await?;

    Ok(Json(TransactionHistoryResponse {
        user_id,
        transactions,
    }))
}
