// HTTP middleware stack
// HTTP 미들웨어 (요청 로그, 패닉 복구, CORS, 타임아웃)

use std::any::Any;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    BoxError, Json, Router,
};
use serde_json::json;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::RequestBodyTimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::shared::config::ServerConfig;

/// 라우터에 공통 미들웨어 적용
/// Wrap the router with the shared middleware stack
///
/// 바깥쪽부터: Trace → CatchPanic → CORS → Timeout(write) → RequestBodyTimeout(read)
pub fn apply_middleware<S>(router: Router<S>, server: &ServerConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(RequestBodyTimeoutLayer::new(server.read_timeout))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(server.write_timeout)),
        )
        .layer(cors_layer())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// CORS 설정 (모든 origin 허용)
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// 처리 시간 초과 등 미들웨어 에러 → 500 JSON
async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::error!("request exceeded write timeout");
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
    }

    internal_error()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}

/// 핸들러 패닉 → 500 JSON
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(panic = detail, "handler panicked");

    internal_error()
}
