// Items Handler
// 아이템 카탈로그 핸들러

use crate::shared::services::AppState;
use crate::domains::items::models::Item;
use crate::domains::items::services::Catalogue;
use axum::{extract::State, http::StatusCode, Json};

/// 카탈로그 조회 핸들러
/// Get merged item catalogue
///
/// 경로: GET /items
///
/// # Returns
/// * `200 OK` - 아이템 배열 (캐시 또는 upstream)
/// * `500 Internal Server Error` - upstream 조회 실패 (캐시하지 않음)
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Merged Skinport catalogue", body = Vec<Item>),
        (status = 500, description = "Failed to fetch items")
    ),
    tag = "Items"
)]
pub async fn get_items(
    State(app_state): State<AppState>,
) -> Result<Json<Catalogue>, (StatusCode, Json<serde_json::Value>)> {
    let items = app_state
        .items_state
        .item_service
        .get_items()
        .await?;

    // 캐시된 Arc를 그대로 직렬화 (복사 없음)
    Ok(Json(items))
}
