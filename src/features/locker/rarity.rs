use serde::{Deserialize, Serialize};

/// 稀有度层级。16 个固定层级 + 未收录层级（Other）。
///
/// `display_value` 与元数据服务返回的 `rarity.displayValue` 原文一一对应，
/// 底板选择与排序优先级都以该层级为键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    Mythic,
    Legendary,
    DarkSeries,
    SlurpSeries,
    StarWarsSeries,
    MarvelSeries,
    LavaSeries,
    FrozenSeries,
    GamingLegendsSeries,
    ShadowSeries,
    IconSeries,
    DcSeries,
    Epic,
    Rare,
    Uncommon,
    Common,
    /// 上游返回的未收录稀有度，原文保留，排序时沉底。
    Other(String),
}

/// (层级, 上游原文, 排序优先级) 对照表，1 为最高。
const RARITY_TABLE: &[(Rarity, &str, u32)] = &[
    (Rarity::Mythic, "Mythic", 1),
    (Rarity::Legendary, "Legendary", 2),
    (Rarity::DarkSeries, "DARK SERIES", 3),
    (Rarity::SlurpSeries, "Slurp Series", 4),
    (Rarity::StarWarsSeries, "Star Wars Series", 5),
    (Rarity::MarvelSeries, "MARVEL SERIES", 6),
    (Rarity::LavaSeries, "Lava Series", 7),
    (Rarity::FrozenSeries, "Frozen Series", 8),
    (Rarity::GamingLegendsSeries, "Gaming Legends Series", 9),
    (Rarity::ShadowSeries, "Shadow Series", 10),
    (Rarity::IconSeries, "Icon Series", 11),
    (Rarity::DcSeries, "DC SERIES", 12),
    (Rarity::Epic, "Epic", 13),
    (Rarity::Rare, "Rare", 14),
    (Rarity::Uncommon, "Uncommon", 15),
    (Rarity::Common, "Common", 16),
];

/// 未收录稀有度的排序优先级（强制沉底）。
pub const UNKNOWN_RARITY_PRIORITY: u32 = 999;

impl Rarity {
    /// 从上游 `displayValue` 原文解析（大小写不敏感），未收录则原文保留为 Other。
    pub fn from_display_value(value: &str) -> Self {
        for (rarity, display, _) in RARITY_TABLE {
            if display.eq_ignore_ascii_case(value) {
                return rarity.clone();
            }
        }
        Rarity::Other(value.to_string())
    }

    /// 上游原文（Other 返回其内部字符串）。
    pub fn display_value(&self) -> &str {
        for (rarity, display, _) in RARITY_TABLE {
            if rarity == self {
                return display;
            }
        }
        match self {
            Rarity::Other(raw) => raw,
            // RARITY_TABLE 覆盖全部非 Other 变体。
            _ => unreachable!(),
        }
    }

    /// 排序优先级，1 最高；未收录层级固定 999。
    pub fn priority(&self) -> u32 {
        for (rarity, _, priority) in RARITY_TABLE {
            if rarity == self {
                return *priority;
            }
        }
        UNKNOWN_RARITY_PRIORITY
    }

    /// 是否属于"特殊系列"（瓦片标题起始字号 80pt 而非 40pt 的 10 个系列层级）。
    pub fn is_special_series(&self) -> bool {
        matches!(
            self,
            Rarity::IconSeries
                | Rarity::DarkSeries
                | Rarity::StarWarsSeries
                | Rarity::GamingLegendsSeries
                | Rarity::MarvelSeries
                | Rarity::DcSeries
                | Rarity::ShadowSeries
                | Rarity::SlurpSeries
                | Rarity::LavaSeries
                | Rarity::FrozenSeries
        )
    }
}

impl From<String> for Rarity {
    fn from(value: String) -> Self {
        Rarity::from_display_value(&value)
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        value.display_value().to_string()
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_value())
    }
}

#[cfg(test)]
mod tests {
    use super::{Rarity, UNKNOWN_RARITY_PRIORITY};

    #[test]
    fn priority_order_matches_table() {
        assert_eq!(Rarity::Mythic.priority(), 1);
        assert_eq!(Rarity::Legendary.priority(), 2);
        assert_eq!(Rarity::DarkSeries.priority(), 3);
        assert_eq!(Rarity::Epic.priority(), 13);
        assert_eq!(Rarity::Common.priority(), 16);
        assert_eq!(
            Rarity::Other("Mystery".into()).priority(),
            UNKNOWN_RARITY_PRIORITY
        );
    }

    #[test]
    fn parse_roundtrips_upstream_spelling() {
        assert_eq!(Rarity::from_display_value("DARK SERIES"), Rarity::DarkSeries);
        assert_eq!(Rarity::from_display_value("dark series"), Rarity::DarkSeries);
        assert_eq!(Rarity::from_display_value("Icon Series"), Rarity::IconSeries);
        assert_eq!(Rarity::DarkSeries.display_value(), "DARK SERIES");

        let other = Rarity::from_display_value("Mystery");
        assert_eq!(other, Rarity::Other("Mystery".into()));
        assert_eq!(other.display_value(), "Mystery");
    }

    #[test]
    fn special_series_covers_exactly_ten_tiers() {
        let special = [
            Rarity::IconSeries,
            Rarity::DarkSeries,
            Rarity::StarWarsSeries,
            Rarity::GamingLegendsSeries,
            Rarity::MarvelSeries,
            Rarity::DcSeries,
            Rarity::ShadowSeries,
            Rarity::SlurpSeries,
            Rarity::LavaSeries,
            Rarity::FrozenSeries,
        ];
        assert!(special.iter().all(Rarity::is_special_series));
        assert!(!Rarity::Mythic.is_special_series());
        assert!(!Rarity::Legendary.is_special_series());
        assert!(!Rarity::Common.is_special_series());
    }
}
