//! 账号档案边界：设备码登录与 QueryProfile。

/// 账号服务客户端
pub mod client;
/// 设备码登录路由
pub mod handler;
/// 会话与档案提取
pub mod models;

pub use client::EpicClient;
pub use handler::create_auth_router;
pub use models::{AthenaInventory, extract_athena_inventory, extract_banner_ids};
