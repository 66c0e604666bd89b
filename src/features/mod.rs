/// 饰品分类/稀有度/排序与渲染流水线
pub mod locker;

/// 海报合成（底板、瓦片、网格、字体）
pub mod poster;

/// Epic 账号/档案边界客户端（设备码登录、QueryProfile）
pub mod profile;

/// 用户偏好存储（底板套图、页脚自定义）
pub mod prefs;

/// 健康检查
pub mod health;
