use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use rust_decimal::Decimal;

// =====================================================
// Item 모델
// =====================================================
// 역할: Skinport 두 목록(tradable / non-tradable)을 합친 카탈로그 항목
//
// 가격 구분:
// - tradable_min_price: 거래 가능 목록의 최저가 (목록에 없으면 null)
// - non_tradable_min_price: 거래 불가 목록의 최저가 (목록에 없으면 null)
//
// 나머지 필드는 upstream에서 그대로 전달되는 표시용 정보
// =====================================================

/// 카탈로그 아이템 (API 응답)
/// Catalogue item (API response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = Item)]
pub struct Item {
    /// Market hash name (unique item key)
    /// 아이템 고유 이름
    #[schema(example = "AK-47 | Redline (Field-Tested)")]
    pub market_hash_name: String,

    /// Currency of all prices
    /// 가격 통화
    #[schema(example = "USD")]
    pub currency: String,

    #[schema(value_type = Option<String>, example = "14.20")]
    pub suggested_price: Option<Decimal>,

    pub item_page: String,

    pub market_page: String,

    /// Minimum price among tradable listings
    /// 거래 가능 매물 최저가
    #[schema(value_type = Option<String>, example = "12.50")]
    pub tradable_min_price: Option<Decimal>,

    /// Minimum price among non-tradable listings
    /// 거래 불가 매물 최저가
    #[schema(value_type = Option<String>, example = "10.20")]
    pub non_tradable_min_price: Option<Decimal>,

    #[schema(value_type = Option<String>)]
    pub max_price: Option<Decimal>,

    #[schema(value_type = Option<String>)]
    pub mean_price: Option<Decimal>,

    /// Listings on both lists combined
    /// 두 목록 매물 수 합계
    pub quantity: u64,

    /// Unix seconds (upstream)
    pub created_at: i64,

    /// Unix seconds (upstream)
    pub updated_at: i64,
}

// =====================================================
// Skinport 원시 응답 (내부용)
// =====================================================
/// Skinport `/items` 응답 배열의 한 행
/// One row of the Skinport `/items` response array
///
/// 가격은 JSON 숫자로 오지만 Decimal로 바로 파싱 (float 오차 없음)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamItem {
    pub market_hash_name: String,
    pub currency: Option<String>,
    pub suggested_price: Option<Decimal>,
    pub item_page: Option<String>,
    pub market_page: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub mean_price: Option<Decimal>,
    pub quantity: Option<u64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}
