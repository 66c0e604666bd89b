use serde::{Deserialize, Serialize};

/// 饰品大类。分类只依赖标识符本身，与元数据服务无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Category {
    Banners,
    Skins,
    Backpacks,
    Pickaxe,
    Emotes,
    Gliders,
    Wraps,
    Sprays,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Banners => "Banners",
            Category::Skins => "Skins",
            Category::Backpacks => "Backpacks",
            Category::Pickaxe => "Pickaxe",
            Category::Emotes => "Emotes",
            Category::Gliders => "Gliders",
            Category::Wraps => "Wraps",
            Category::Sprays => "Sprays",
            Category::Others => "Others",
        }
    }
}

/// 分类规则的匹配方式（对小写化后的 id 判断）。
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// id 以该 token 开头
    Prefix(&'static str),
    /// id 含有该 token
    Contains(&'static str),
}

impl Pattern {
    fn matches(&self, id_lower: &str) -> bool {
        match self {
            Pattern::Prefix(token) => id_lower.starts_with(token),
            Pattern::Contains(token) => id_lower.contains(token),
        }
    }
}

/// 分类规则表。各大类的 token 并不互斥（例如同时含 "banner_" 与 "cid_" 的 id），
/// 因此按固定优先级顺序求值，命中即停。调整顺序属于行为变更，必须连同测试一起改。
pub const CLASSIFY_RULES: &[(Category, &[Pattern])] = &[
    (Category::Banners, &[Pattern::Prefix("banner_")]),
    (
        Category::Skins,
        &[Pattern::Contains("character_"), Pattern::Contains("cid_")],
    ),
    (
        Category::Backpacks,
        &[Pattern::Contains("bid_"), Pattern::Contains("backpack")],
    ),
    (
        Category::Pickaxe,
        &[
            Pattern::Contains("pickaxe_"),
            Pattern::Contains("defaultpickaxe"),
            Pattern::Contains("halloweenscythe"),
        ],
    ),
    (
        Category::Emotes,
        &[Pattern::Contains("eid"), Pattern::Contains("emote")],
    ),
    (
        Category::Gliders,
        &[
            Pattern::Contains("glider"),
            Pattern::Contains("founderumbrella"),
            Pattern::Contains("founderglider"),
            Pattern::Contains("solo_umbrella"),
        ],
    ),
    (Category::Wraps, &[Pattern::Contains("wrap")]),
    (Category::Sprays, &[Pattern::Contains("spray")]),
];

/// 完整账号渲染时的默认分组顺序。
pub const DEFAULT_CATEGORY_ORDER: &[Category] = &[
    Category::Skins,
    Category::Backpacks,
    Category::Pickaxe,
    Category::Emotes,
    Category::Gliders,
    Category::Banners,
];

/// 标识符 → 大类。纯函数、全函数：未命中任何规则的 id 归入 Others。
pub fn classify(id: &str) -> Category {
    let id_lower = id.to_ascii_lowercase();
    for (category, patterns) in CLASSIFY_RULES {
        if patterns.iter().any(|p| p.matches(&id_lower)) {
            return *category;
        }
    }
    Category::Others
}

#[cfg(test)]
mod tests {
    use super::{Category, classify};

    #[test]
    fn classify_basic_tokens() {
        assert_eq!(classify("cid_028_athena_commando_f"), Category::Skins);
        assert_eq!(classify("character_sahara"), Category::Skins);
        assert_eq!(classify("bid_001_bluesquire"), Category::Backpacks);
        assert_eq!(classify("pickaxe_id_013_teslacoil"), Category::Pickaxe);
        assert_eq!(classify("halloweenscythe"), Category::Pickaxe);
        assert_eq!(classify("eid_floss"), Category::Emotes);
        assert_eq!(classify("glider_id_001"), Category::Gliders);
        assert_eq!(classify("founderumbrella"), Category::Gliders);
        assert_eq!(classify("wrap_044_rustlord"), Category::Wraps);
        assert_eq!(classify("spid_066_llama"), Category::Others);
        assert_eq!(classify("spray_atlantis"), Category::Sprays);
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify("CID_028_ATHENA_COMMANDO_F"), Category::Skins);
        assert_eq!(classify("Banner_OT1Banner"), Category::Banners);
    }

    #[test]
    fn banner_prefix_wins_over_skin_token() {
        // "banner_" 规则排在最前，含 "cid_" 的横幅 id 也必须归入 Banners。
        assert_eq!(classify("banner_cid_special"), Category::Banners);
    }

    #[test]
    fn classify_is_total_and_deterministic() {
        let ids = ["", "unknown_token_42", "loadingscreen_lineup", "cid_x"];
        for id in ids {
            let first = classify(id);
            let second = classify(id);
            assert_eq!(first, second);
        }
        assert_eq!(classify(""), Category::Others);
    }
}
