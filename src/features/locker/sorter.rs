//! 确定性排序：三键稳定排序 (分组序, 稀有度优先级, 创始子序)。

use super::catalog::founder_sub_rank;
use super::category::Category;
use super::models::CosmeticItem;

/// 按调用方给定的分组顺序稳定排序。不在顺序表中的分组统一排最后
/// （rank = 顺序表长度），并列时保持输入顺序。
pub fn sort_items(items: &mut [CosmeticItem], category_order: &[Category]) {
    items.sort_by_key(|item| sort_key(item, category_order));
}

fn sort_key(item: &CosmeticItem, category_order: &[Category]) -> (usize, u32, u32) {
    let category_rank = category_order
        .iter()
        .position(|c| *c == item.category)
        .unwrap_or(category_order.len());
    (
        category_rank,
        item.rarity.priority(),
        founder_sub_rank(&item.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locker::category::DEFAULT_CATEGORY_ORDER;
    use crate::features::locker::rarity::Rarity;

    fn skin(id: &str, rarity: Rarity) -> CosmeticItem {
        CosmeticItem::new(format!("cid_{id}"), id, rarity)
    }

    #[test]
    fn six_skins_order_by_rarity_priority() {
        let mut items = vec![
            skin("a", Rarity::Common),
            skin("b", Rarity::Mythic),
            skin("c", Rarity::Rare),
            skin("d", Rarity::Epic),
            skin("e", Rarity::Legendary),
            skin("f", Rarity::Uncommon),
        ];
        sort_items(&mut items, DEFAULT_CATEGORY_ORDER);

        let rarities: Vec<_> = items.iter().map(|i| i.rarity.clone()).collect();
        assert_eq!(
            rarities,
            vec![
                Rarity::Mythic,
                Rarity::Legendary,
                Rarity::Epic,
                Rarity::Rare,
                Rarity::Uncommon,
                Rarity::Common,
            ]
        );
    }

    #[test]
    fn ties_preserve_input_order() {
        let mut items = vec![
            skin("first", Rarity::Common),
            skin("second", Rarity::Common),
            skin("third", Rarity::Common),
        ];
        sort_items(&mut items, DEFAULT_CATEGORY_ORDER);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["cid_first", "cid_second", "cid_third"]);
    }

    #[test]
    fn categories_follow_caller_order_and_absent_sink() {
        let mut items = vec![
            CosmeticItem::new("spray_tag", "Tag", Rarity::Mythic),
            CosmeticItem::new("eid_floss", "Floss", Rarity::Common),
            CosmeticItem::new("cid_hero", "Hero", Rarity::Common),
        ];
        // Sprays 不在顺序表里，即便 Mythic 也排最后。
        sort_items(&mut items, &[Category::Skins, Category::Emotes]);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["cid_hero", "eid_floss", "spray_tag"]);
    }

    #[test]
    fn founder_sub_order_breaks_rarity_ties() {
        let mut items = vec![
            CosmeticItem::new("cid_028_athena_commando_f", "Renegade", Rarity::Mythic),
            CosmeticItem::new("cid_017_athena_commando_m", "Aerial", Rarity::Mythic),
        ];
        sort_items(&mut items, DEFAULT_CATEGORY_ORDER);
        assert_eq!(items[0].id, "cid_017_athena_commando_m");
        assert_eq!(items[1].id, "cid_028_athena_commando_f");
    }
}
