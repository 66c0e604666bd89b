//! 用户偏好：底板皮肤、页脚链接与自定义 logo。

/// 偏好读写路由
pub mod handler;
/// JSON 文件存储
pub mod storage;

pub use handler::create_prefs_router;
pub use storage::{PrefsRecord, PrefsStore, resolve_logo_path};
