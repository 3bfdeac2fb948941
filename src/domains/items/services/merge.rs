use std::collections::HashMap;

use crate::domains::items::models::{Item, UpstreamItem};

/// Skinport 목록 1개 (market_hash_name → 행)
pub type ItemIndex = HashMap<String, UpstreamItem>;

/// 두 목록을 market_hash_name 기준으로 outer-join
/// Outer-join the tradable and non-tradable lists on `market_hash_name`
///
/// 규칙:
/// - tradable_min_price ← tradable 쪽 min_price (없으면 None)
/// - non_tradable_min_price ← non-tradable 쪽 min_price (없으면 None)
/// - 표시용 필드는 tradable 행 우선, 없으면 non-tradable 행
/// - quantity는 양쪽 합
///
/// 결과 순서는 보장하지 않음
pub fn merge_items(mut tradable: ItemIndex, mut non_tradable: ItemIndex) -> Vec<Item> {
    let mut items = Vec::with_capacity(tradable.len().max(non_tradable.len()));

    for (name, row) in tradable.drain() {
        let other = non_tradable.remove(&name);
        items.push(merge_one(name, Some(row), other));
    }

    for (name, row) in non_tradable.drain() {
        items.push(merge_one(name, None, Some(row)));
    }

    items
}

fn merge_one(
    name: String,
    tradable: Option<UpstreamItem>,
    non_tradable: Option<UpstreamItem>,
) -> Item {
    let quantity = tradable.as_ref().and_then(|r| r.quantity).unwrap_or(0)
        + non_tradable.as_ref().and_then(|r| r.quantity).unwrap_or(0);
    let tradable_min_price = tradable.as_ref().and_then(|r| r.min_price);
    let non_tradable_min_price = non_tradable.as_ref().and_then(|r| r.min_price);

    // 둘 중 하나는 항상 존재
    let base = tradable.or(non_tradable).unwrap_or_default();

    Item {
        market_hash_name: name,
        currency: base.currency.unwrap_or_default(),
        suggested_price: base.suggested_price,
        item_page: base.item_page.unwrap_or_default(),
        market_page: base.market_page.unwrap_or_default(),
        tradable_min_price,
        non_tradable_min_price,
        max_price: base.max_price,
        mean_price: base.mean_price,
        quantity,
        created_at: base.created_at.unwrap_or_default(),
        updated_at: base.updated_at.unwrap_or_default(),
    }
}
