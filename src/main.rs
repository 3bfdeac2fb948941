use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use market_api::routes::build_app;
use market_api::shared::cache::TtlCache;
use market_api::shared::clients::SkinportClient;
use market_api::shared::config::AppConfig;
use market_api::shared::database::Database;
use market_api::shared::logging::init_logging;
use market_api::shared::services::AppState;

/// Market API server
#[derive(Debug, Parser)]
#[command(name = "market_api", version, about = "Skinport item catalogue and user balance API")]
struct Args {
    /// 설정 파일 경로 (기본: config/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env는 있으면 로드 (없어도 무시)
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.log)?;
    tracing::info!(port = config.server.port, "starting market api");

    // DB 연결 + 마이그레이션
    let db = Database::connect(&config.database).await?;
    db.initialize().await?;

    // 캐시 / upstream 클라이언트 / 서비스
    let cache = Arc::new(TtlCache::new(config.cache.cleanup_interval));
    let skinport = SkinportClient::new(config.skinport.api_url.clone(), config.skinport.timeout)?;
    let app_state = AppState::with_database(
        db.clone(),
        Arc::new(skinport),
        cache.clone(),
        config.cache.ttl,
    );

    // 캐시 예열 (실패해도 계속)
    app_state.items_state.item_service.warm_up().await;

    let app = build_app(app_state, &config.server);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, "server listening");
    tracing::info!("Swagger UI available at http://localhost:{}/api", config.server.port);

    // 서버 실행 (종료 신호 시 새 연결 수락 중단 후 진행 중 요청 처리)
    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        }
    });

    tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
            shutdown.cancel();

            match tokio::time::timeout(config.server.shutdown_timeout, &mut server).await {
                Ok(Ok(Ok(()))) => tracing::info!("server drained"),
                Ok(Ok(Err(err))) => tracing::error!(error = %err, "server error during shutdown"),
                Ok(Err(err)) => tracing::error!(error = %err, "server task failed"),
                Err(_) => {
                    tracing::warn!("graceful shutdown timed out, aborting in-flight requests");
                    server.abort();
                }
            }
        }
        result = &mut server => {
            match result {
                Ok(Ok(())) => tracing::info!("server stopped"),
                Ok(Err(err)) => tracing::error!(error = %err, "server error"),
                Err(err) => tracing::error!(error = %err, "server task failed"),
            }
        }
    }

    cache.close();
    db.close().await;

    tracing::info!("shutdown complete");
    Ok(())
}

/// SIGINT / SIGTERM 대기
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
