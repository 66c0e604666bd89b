use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::category::{Category, classify};
use super::rarity::Rarity;

/// 账号已解锁样式表：饰品 id（小写）→ 样式 token 列表。
pub type UnlockedStyles = HashMap<String, Vec<String>>;

/// 解析完成的饰品条目，排序与合成的基本单位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CosmeticItem {
    /// 原始标识符
    pub id: String,
    /// 展示名称
    pub name: String,
    /// 稀有度层级
    pub rarity: Rarity,
    /// 大类（由 id 分类得到）
    pub category: Category,
}

impl CosmeticItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: Rarity) -> Self {
        let id = id.into();
        let category = classify(&id);
        Self {
            id,
            name: name.into(),
            rarity,
            category,
        }
    }

    /// 是否为横幅条目（瓦片使用 192×192 内嵌贴图而非全幅）。
    pub fn is_banner(&self) -> bool {
        self.category == Category::Banners
    }
}

/// 海报渲染请求体。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenderRequest {
    /// 页脚署名用的展示名
    pub username: String,
    /// 偏好记录的用户 id（缺省使用全局默认偏好）
    #[serde(default)]
    pub user_id: Option<String>,
    /// 待渲染的饰品 id 列表
    pub items: Vec<String>,
    /// 账号已解锁样式（样式升格需要；缺省不做升格判断）
    #[serde(default)]
    pub unlocked_styles: Option<UnlockedStyles>,
    /// 分组顺序（缺省用内置默认顺序）
    #[serde(default)]
    pub category_order: Option<Vec<Category>>,
}

/// 整账号渲染请求体：凭已完成的设备码会话拉取账号档案后渲染。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenderAccountRequest {
    /// Epic 账号 id
    pub account_id: String,
    /// 账号访问令牌
    pub access_token: String,
    /// 页脚署名（缺省用账号展示名）
    #[serde(default)]
    pub username: Option<String>,
    /// 偏好记录的用户 id
    #[serde(default)]
    pub user_id: Option<String>,
}

/// 渲染查询参数。
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct RenderQuery {
    /// `mythic` 时只渲染 Mythic 精选子集
    #[serde(default)]
    pub collection: Option<Collection>,
}

/// 可选的子集选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Mythic,
}
