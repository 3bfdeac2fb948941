use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// 잔고 차감 관련 에러
/// Balance / withdraw errors
#[derive(Error, Debug)]
pub enum BalanceError {
    /// 금액이 0 이하
    /// Amount is zero or negative
    #[error("invalid amount: must be positive")]
    InvalidAmount,

    /// 잔고 부족
    /// Balance is lower than the requested amount
    #[error("insufficient balance")]
    InsufficientBalance,

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("user not found: id={id}")]
    UserNotFound { id: i64 },

    /// 같은 ID의 거래 내역이 이미 존재 (UUID 충돌, 프로그래밍 에러)
    /// Ledger entry with the same id already exists
    #[error("duplicate transaction id: {id}")]
    DuplicateTransaction { id: Uuid },

    /// 직렬화 실패 (SERIALIZABLE 충돌, 재시도 가능)
    /// Serialization failure reported by the database (caller may retry)
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl BalanceError {
    /// sqlx 에러 분류
    /// Classify a sqlx error (SQLSTATE 40001 → serialization failure)
    pub fn from_sqlx(context: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("40001") {
                return BalanceError::SerializationFailure(format!("{}: {}", context, db_err));
            }
        }
        BalanceError::DatabaseError(format!("{}: {}", context, err))
    }

    /// 클라이언트에게 노출 가능한 에러인지 (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BalanceError::InvalidAmount
                | BalanceError::InsufficientBalance
                | BalanceError::UserNotFound { .. }
        )
    }
}

/// BalanceError를 HTTP 응답으로 변환
impl From<BalanceError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: BalanceError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "balance request rejected");
        } else {
            tracing::error!(error = %err, "balance operation failed");
        }

        let (status, message) = match &err {
            BalanceError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid amount"),
            BalanceError::InsufficientBalance => (StatusCode::BAD_REQUEST, "insufficient balance"),
            BalanceError::UserNotFound { .. } => (StatusCode::NOT_FOUND, "user not found"),
            BalanceError::DuplicateTransaction { .. }
            | BalanceError::SerializationFailure(_)
            | BalanceError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message })))
    }
}
