//! 底板皮肤：7 套底板目录 × 16 个稀有度层级。
//!
//! v1/v2 各自带全套 16 张；v3..v7 只重绘 6 个基础层级，
//! 系列层级统一回落到 v2 的文件。未收录稀有度用 Common 底板。

use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::features::locker::rarity::Rarity;

/// 底板皮肤版本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackdropSkin {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
}

impl BackdropSkin {
    /// 从偏好记录的字符串解析；未识别的值回落到 v2。
    pub fn from_pref(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "v1" => BackdropSkin::V1,
            "v2" => BackdropSkin::V2,
            "v3" => BackdropSkin::V3,
            "v4" => BackdropSkin::V4,
            "v5" => BackdropSkin::V5,
            "v6" => BackdropSkin::V6,
            "v7" => BackdropSkin::V7,
            _ => BackdropSkin::V2,
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            BackdropSkin::V1 => "v1",
            BackdropSkin::V2 => "v2",
            BackdropSkin::V3 => "v3",
            BackdropSkin::V4 => "v4",
            BackdropSkin::V5 => "v5",
            BackdropSkin::V6 => "v6",
            BackdropSkin::V7 => "v7",
        }
    }

    /// 该皮肤是否自带全套系列层级底板。
    fn has_series_files(&self) -> bool {
        matches!(self, BackdropSkin::V1 | BackdropSkin::V2)
    }
}

/// 稀有度对应的底板文件名。文件名沿用素材库的既有命名。
pub fn backdrop_file(rarity: &Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "commun.png",
        Rarity::Uncommon => "uncommun.png",
        Rarity::Rare => "rare.png",
        Rarity::Epic => "epico.png",
        Rarity::Legendary => "legendary.png",
        Rarity::Mythic => "mitico.png",
        Rarity::IconSeries => "idolo.png",
        Rarity::DarkSeries => "dark.png",
        Rarity::StarWarsSeries => "starwars.png",
        Rarity::MarvelSeries => "marvel.png",
        Rarity::DcSeries => "dc.png",
        Rarity::GamingLegendsSeries => "serie.png",
        Rarity::ShadowSeries => "shadow.png",
        Rarity::SlurpSeries => "slurp.png",
        Rarity::LavaSeries => "lava.png",
        Rarity::FrozenSeries => "hielo.png",
        Rarity::Other(_) => "commun.png",
    }
}

/// 底板文件的完整路径（含系列层级回落到 v2 的规则）。
pub fn backdrop_path(root: &Path, skin: BackdropSkin, rarity: &Rarity) -> PathBuf {
    let dir = if skin.has_series_files() || !rarity.is_special_series() {
        skin.dir_name()
    } else {
        BackdropSkin::V2.dir_name()
    };
    root.join(dir).join(backdrop_file(rarity))
}

/// 加载底板图；文件缺失时渲染失败（素材目录由启动检查保证并告警）。
pub fn load_backdrop(
    root: &Path,
    skin: BackdropSkin,
    rarity: &Rarity,
) -> Result<DynamicImage, AppError> {
    let path = backdrop_path(root, skin, rarity);
    image::open(&path)
        .map_err(|e| AppError::ImageRender(format!("底板加载失败 {}: {e}", path.display())))
}
