//! 元数据解析：饰品 id → 名称 + 稀有度。
//!
//! 横幅 id 查请求级名称表并按提升名单给二元稀有度；其余 id 走一次
//! 元数据服务查询。查询失败（非 200、超时、连接失败）或字段缺失都不是
//! 错误：条目以 Common + id 本身兜底保留，只有上游明确返回 "Unknown"
//! 名称的条目才会被流水线丢弃。

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::http::client_timeout_30s;

use super::catalog::is_elevated;
use super::models::CosmeticItem;
use super::rarity::Rarity;

/// 上游用于标记无名条目的字面量，流水线据此丢弃。
pub const UNKNOWN_NAME: &str = "Unknown";

/// 请求级横幅名称表：完整 id（`banner_*` 小写）→ 展示名。
pub type BannerNames = HashMap<String, String>;

/// 横幅总表的一条：展示名 + 图标地址（横幅图标与元数据同源，见横幅流水线）。
#[derive(Debug, Clone)]
pub struct BannerListingEntry {
    pub dev_name: String,
    pub icon_url: Option<String>,
}

#[derive(Deserialize)]
struct CosmeticEnvelope {
    #[serde(default)]
    data: CosmeticData,
}

#[derive(Deserialize, Default)]
struct CosmeticData {
    name: Option<String>,
    rarity: Option<CosmeticRarity>,
}

#[derive(Deserialize)]
struct CosmeticRarity {
    #[serde(rename = "displayValue")]
    display_value: Option<String>,
}

#[derive(Deserialize)]
struct BannerListEnvelope {
    #[serde(default)]
    data: Vec<BannerInfo>,
}

#[derive(Deserialize)]
struct BannerInfo {
    #[serde(default)]
    id: String,
    #[serde(rename = "devName")]
    dev_name: Option<String>,
    #[serde(default)]
    images: BannerImages,
}

#[derive(Deserialize, Default)]
struct BannerImages {
    icon: Option<String>,
}

/// 元数据服务客户端。
#[derive(Debug, Clone)]
pub struct MetadataClient {
    base_url: String,
}

impl MetadataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.upstream.metadata_base_url.clone())
    }

    /// 解析一个饰品 id。横幅条目不访问网络；其余条目单次查询，
    /// 任何查询失败就地兜底，绝不让单个条目拖垮整批渲染。
    pub async fn resolve(&self, id: &str, banner_names: &BannerNames) -> CosmeticItem {
        let id_lower = id.to_ascii_lowercase();
        if id_lower.starts_with("banner_") {
            return resolve_banner(id, banner_names);
        }

        let url = format!("{}/v2/cosmetics/br/{}", self.base_url, id);
        let (name, mut rarity) = match fetch_cosmetic(&url).await {
            Some(data) => (
                // 名称缺失与查询未命中同等兜底；"Unknown" 只能来自上游原文。
                data.name.unwrap_or_else(|| id.to_string()),
                data.rarity
                    .and_then(|r| r.display_value)
                    .map(|v| Rarity::from_display_value(&v))
                    .unwrap_or(Rarity::Common),
            ),
            None => (id.to_string(), Rarity::Common),
        };

        if is_elevated(id) {
            rarity = Rarity::Mythic;
        }

        CosmeticItem::new(id, name, rarity)
    }

    /// 拉取横幅总表，返回 小写横幅裸 id → (展示名, 图标地址)。
    /// 总表拉不到按空表处理，调用方会跳过没有条目的横幅。
    pub async fn fetch_banner_listing(&self) -> HashMap<String, BannerListingEntry> {
        let url = format!("{}/v1/banners", self.base_url);
        let sent = match client_timeout_30s() {
            Ok(client) => client.get(&url).send().await,
            Err(e) => Err(e),
        };
        let resp = match sent {
            Ok(resp) => resp,
            Err(e) => {
                warn!("横幅总表拉取失败 ({e})，本次横幅全部跳过");
                return HashMap::new();
            }
        };
        if !resp.status().is_success() {
            warn!("横幅总表拉取失败 ({})，本次横幅全部跳过", resp.status());
            return HashMap::new();
        }

        let envelope: BannerListEnvelope = match resp.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("横幅总表解析失败 ({e})，本次横幅全部跳过");
                return HashMap::new();
            }
        };
        let mut listing = HashMap::with_capacity(envelope.data.len());
        for info in envelope.data {
            if info.id.is_empty() {
                continue;
            }
            let dev_name = info
                .dev_name
                .unwrap_or_else(|| format!("Banner {}", info.id));
            listing.insert(
                info.id.to_ascii_lowercase(),
                BannerListingEntry {
                    dev_name,
                    icon_url: info.images.icon,
                },
            );
        }
        listing
    }
}

/// 单次尽力而为的元数据查询：传输错误、非 200、解码失败都折叠为 None。
async fn fetch_cosmetic(url: &str) -> Option<CosmeticData> {
    let client = match client_timeout_30s() {
        Ok(client) => client,
        Err(e) => {
            warn!("HTTP 客户端构建失败: {e}");
            return None;
        }
    };
    let resp = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!("元数据请求失败 {url}: {e}");
            return None;
        }
    };
    if !resp.status().is_success() {
        debug!("元数据查询未命中 ({}): {url}", resp.status());
        return None;
    }
    match resp.json::<CosmeticEnvelope>().await {
        Ok(envelope) => Some(envelope.data),
        Err(e) => {
            debug!("元数据解析失败 {url}: {e}");
            None
        }
    }
}

/// 横幅条目的本地解析：名称查表，稀有度按提升名单二元给定。
pub fn resolve_banner(id: &str, banner_names: &BannerNames) -> CosmeticItem {
    let id_lower = id.to_ascii_lowercase();
    let name = banner_names
        .get(&id_lower)
        .cloned()
        .unwrap_or_else(|| format!("Banner {id}"));
    let rarity = if is_elevated(id) {
        Rarity::Mythic
    } else {
        Rarity::Uncommon
    };
    CosmeticItem::new(id, name, rarity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locker::category::Category;

    #[test]
    fn banner_rarity_is_binary() {
        let names = BannerNames::new();
        let elevated = resolve_banner("banner_ot1banner", &names);
        assert_eq!(elevated.rarity, Rarity::Mythic);

        let plain = resolve_banner("banner_plain_nobody", &names);
        assert_eq!(plain.rarity, Rarity::Uncommon);
        assert_eq!(plain.category, Category::Banners);
    }

    #[test]
    fn banner_name_falls_back_to_id() {
        let mut names = BannerNames::new();
        names.insert("banner_ot1banner".to_string(), "OT Season 1".to_string());

        let named = resolve_banner("Banner_OT1Banner", &names);
        assert_eq!(named.name, "OT Season 1");

        let unnamed = resolve_banner("banner_mystery", &names);
        assert_eq!(unnamed.name, "Banner banner_mystery");
    }
}
