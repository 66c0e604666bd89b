use once_cell::sync::OnceCell;
use reqwest::Client;
use std::time::Duration;

/// 全局复用的 HTTP Client（统一连接池/Keep-Alive），避免每次请求重复创建。
///
/// 说明：
/// - 按 timeout 维度拆分 client：图片字节下载走默认配置，元数据/档案类短请求走 30s。
/// - `Client` 本身是线程安全的，适合全局复用。
static CLIENT_DEFAULT: OnceCell<Client> = OnceCell::new();
static CLIENT_TIMEOUT_30S: OnceCell<Client> = OnceCell::new();

/// 默认配置的 HTTP Client（不额外设置 timeout），用于图片字节等"尽力而为"的下载。
pub fn client_default() -> Result<&'static Client, reqwest::Error> {
    CLIENT_DEFAULT.get_or_try_init(|| Client::builder().build())
}

/// timeout=30s 的 HTTP Client，用于元数据查询与账号档案等短请求。
pub fn client_timeout_30s() -> Result<&'static Client, reqwest::Error> {
    CLIENT_TIMEOUT_30S
        .get_or_try_init(|| Client::builder().timeout(Duration::from_secs(30)).build())
}
