use sqlx::{PgPool, Postgres, Row, Transaction as PgTransaction};
use sqlx::postgres::PgRow;
use rust_decimal::Decimal;
use crate::domains::balance::models::User;
use crate::shared::errors::BalanceError;

/// 트랜잭션 핸들 (풀에서 시작, 'static)
pub type PgTx = PgTransaction<'static, Postgres>;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 사용자 조회 (락 없음)
    /// Get user by id (plain read)
    pub async fn get_by_id(&self, id: i64) -> Result<User, BalanceError> {
        let row = sqlx::query(
            r#"
            SELECT id, balance
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BalanceError::from_sqlx("failed to get user", e))?;

        match row {
            Some(row) => map_user(&row),
            None => Err(BalanceError::UserNotFound { id }),
        }
    }

    /// 사용자 조회 + 행 잠금 (커밋/롤백까지 유지)
    /// Get user by id and lock the row until the transaction ends
    pub async fn get_for_update(&self, tx: &mut PgTx, id: i64) -> Result<User, BalanceError> {
        let row = sqlx::query(
            r#"
            SELECT id, balance
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| BalanceError::from_sqlx("failed to get user for update", e))?;

        match row {
            Some(row) => map_user(&row),
            None => Err(BalanceError::UserNotFound { id }),
        }
    }

    /// 잔고 갱신 (영향받은 행이 0이면 UserNotFound)
    /// Update balance inside the transaction
    pub async fn update_balance(
        &self,
        tx: &mut PgTx,
        id: i64,
        balance: Decimal,
    ) -> Result<(), BalanceError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET balance = $1
            WHERE id = $2
            "#,
        )
        .bind(balance)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(|e| BalanceError::from_sqlx("failed to update balance", e))?;

        if result.rows_affected() == 0 {
            return Err(BalanceError::UserNotFound { id });
        }

        Ok(())
    }
}

fn map_user(row: &PgRow) -> Result<User, BalanceError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| BalanceError::from_sqlx("failed to decode user", e))?;
    let balance: Decimal = row
        .try_get("balance")
        .map_err(|e| BalanceError::from_sqlx("failed to decode user", e))?;

    Ok(User::new(id, balance))
}
