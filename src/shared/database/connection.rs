use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use anyhow::{Context, Result};

use crate::shared::config::DatabaseConfig;

// 데이터베이스 연결 풀
// Database connection pool for PostgreSQL
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    // 데이터베이스 연결 생성 (기본 풀 설정)
    // Create database connection with default pool options
    pub async fn new(db_url: &str) -> Result<Self> {
        let pool = PgPool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    // 설정 기반 연결 생성
    // Create database connection from configuration
    // max_open_conns → max_connections, max_idle_conns → min_connections
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_open_conns)
            .min_connections(config.max_idle_conns)
            .max_lifetime(config.conn_max_lifetime)
            .connect(&config.url)
            .await
            .context("Failed to connect to database")?;

        tracing::info!(
            max_open_conns = config.max_open_conns,
            max_idle_conns = config.max_idle_conns,
            "database pool created"
        );

        Ok(Self { pool })
    }

    // 연결 풀 반환
    // Get connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // 테이블 생성 (초기화) - 마이그레이션 실행
    // Run migrations from migrations/ folder
    pub async fn initialize(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.pool())
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("database migrations completed");
        Ok(())
    }

    // 풀 종료 (진행 중인 연결 반환 대기)
    // Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}
