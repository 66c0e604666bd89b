//! 衣柜核心：分类、稀有度、解析、取图、排序与渲染流水线。

/// 饰品贴图磁盘缓存
pub mod assets;
/// 静态目录数据（提升名单、创始顺序、升格规则）
pub mod catalog;
/// id → 大类
pub mod category;
/// 渲染路由
pub mod handler;
/// 请求/响应与条目模型
pub mod models;
/// 流水线编排
pub mod pipeline;
/// 稀有度层级
pub mod rarity;
/// 元数据解析
pub mod resolver;
/// 三键稳定排序
pub mod sorter;

pub use assets::AssetCache;
pub use category::{Category, DEFAULT_CATEGORY_ORDER, classify};
pub use handler::create_locker_router;
pub use models::{CosmeticItem, UnlockedStyles};
pub use rarity::Rarity;
pub use resolver::MetadataClient;
