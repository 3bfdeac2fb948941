// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

pub mod health;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::shared::config::ServerConfig;
use crate::shared::middleware::apply_middleware;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::items::routes::create_items_router;
use crate::domains::balance::routes::create_balance_router;

use crate::domains::items::models::*;
use crate::domains::balance::models::*;
use health::HealthResponse;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::items::handlers::item_handler::get_items,
        crate::domains::balance::handlers::balance_handler::get_balance,
        crate::domains::balance::handlers::balance_handler::withdraw,
        crate::domains::balance::handlers::balance_handler::get_transactions,
        health::health_check
    ),
    components(schemas(
        Item,
        WithdrawRequest,
        WithdrawResponse,
        BalanceResponse,
        Transaction,
        TransactionHistoryResponse,
        HealthResponse
    )),
    tags(
        (name = "Items", description = "Skinport item catalogue (cached)"),
        (name = "Balance", description = "User balance and withdraw endpoints"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Market API",
        description = "Skinport item catalogue and user balance debits",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(create_items_router())
        .merge(create_balance_router())
        .route("/health", get(health::health_check))
}

/// 미들웨어 + Swagger UI까지 포함한 전체 앱
/// Full application router with state, docs and middleware
pub fn build_app(app_state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    apply_middleware(router, server)
}
