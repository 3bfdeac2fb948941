use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use crate::domains::balance::models::Transaction;
use crate::shared::errors::BalanceError;
use super::PgTx;

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 원장 기록 저장 (트랜잭션 내부)
    /// Insert a ledger entry inside the transaction
    ///
    /// 같은 id가 이미 있으면 DuplicateTransaction
    pub async fn create(&self, tx: &mut PgTx, entry: &Transaction) -> Result<(), BalanceError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, amount, balance_before, balance_after, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.amount)
        .bind(entry.balance_before)
        .bind(entry.balance_after)
        .bind(&entry.description)
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    tracing::error!(transaction_id = %entry.id, "duplicate transaction id");
                    return BalanceError::DuplicateTransaction { id: entry.id };
                }
            }
            BalanceError::from_sqlx("failed to save transaction", e)
        })?;

        Ok(())
    }

    /// 사용자별 원장 조회 (최신순)
    /// List ledger entries for a user, newest first
    pub async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, BalanceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, balance_before, balance_after, description, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BalanceError::from_sqlx("failed to list transactions", e))?;

        rows.iter().map(map_transaction).collect()
    }
}

fn map_transaction(row: &PgRow) -> Result<Transaction, BalanceError> {
    let decode = |e| BalanceError::from_sqlx("failed to decode transaction", e);

    Ok(Transaction {
        id: row.try_get("id").map_err(decode)?,
        user_id: row.try_get("user_id").map_err(decode)?,
        amount: row.try_get("amount").map_err(decode)?,
        balance_before: row.try_get("balance_before").map_err(decode)?,
        balance_after: row.try_get("balance_after").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        created_at: row.try_get("created_at").map_err(decode)?,
    })
}
