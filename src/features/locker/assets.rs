//! 饰品图标的磁盘缓存。
//!
//! 缓存键是 id 本身（`{cache_dir}/{id}.png`），有效性只看文件存在且非空，
//! 不设 TTL 也不回源校验。拉取失败（非 200 或传输错误）不会上抛：
//! 逐个来源尝试，全部失败落占位图并同样入缓存，之后不再重试。

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::http::client_default;

/// 图标缓存。横幅图标由横幅流水线写入同一目录，取用路径一致。
#[derive(Debug, Clone)]
pub struct AssetCache {
    cache_dir: PathBuf,
    asset_base: String,
    placeholder: PathBuf,
}

impl AssetCache {
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        asset_base: impl Into<String>,
        placeholder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            asset_base: asset_base.into().trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.cache_path(),
            config.upstream.asset_base_url.clone(),
            config.placeholder_path(),
        )
    }

    /// id 对应的缓存文件路径。
    pub fn asset_path(&self, id: &str) -> PathBuf {
        self.cache_dir.join(format!("{id}.png"))
    }

    /// 确保 id 的图标已落盘并返回本地路径。
    ///
    /// 未命中时依次尝试 `icon.png`、`smallicon.png`，都失败则复制占位图。
    /// 上游不可达与非 200 同样算一次失败尝试，不会让渲染请求整体出错。
    /// 横幅 id 不在这里拉取（见横幅流水线），只返回既有路径。
    pub async fn ensure_asset(&self, id: &str) -> Result<PathBuf, AppError> {
        let path = self.asset_path(id);
        if is_valid_cache_file(&path).await {
            return Ok(path);
        }
        if id.to_ascii_lowercase().starts_with("banner_") {
            return Ok(path);
        }

        let urls = [
            format!("{}/images/cosmetics/br/{}/icon.png", self.asset_base, id),
            format!(
                "{}/images/cosmetics/br/{}/smallicon.png",
                self.asset_base, id
            ),
        ];
        for url in &urls {
            if let Some(bytes) = fetch_bytes(url).await {
                tokio::fs::write(&path, &bytes).await?;
                debug!("已缓存图标 {} <- {}", id, url);
                return Ok(path);
            }
        }

        warn!("图标拉取失败，占位图入缓存: {}", id);
        tokio::fs::copy(&self.placeholder, &path).await?;
        Ok(path)
    }

    /// 将横幅图标写入缓存（横幅流水线专用）。已缓存时直接返回 true，
    /// 下载失败返回 false（调用方跳过该横幅）。
    pub async fn store_banner_icon(&self, id: &str, icon_url: &str) -> Result<bool, AppError> {
        let path = self.asset_path(id);
        if is_valid_cache_file(&path).await {
            return Ok(true);
        }

        match fetch_bytes(icon_url).await {
            Some(bytes) => {
                tokio::fs::write(&path, &bytes).await?;
                info!("已缓存横幅图标: {}", id);
                Ok(true)
            }
            None => {
                warn!("横幅图标下载失败，跳过: {}", id);
                Ok(false)
            }
        }
    }
}

/// 单次尽力而为的下载：传输错误与非 200 都折叠为 None。
async fn fetch_bytes(url: &str) -> Option<Vec<u8>> {
    let client = match client_default() {
        Ok(client) => client,
        Err(e) => {
            warn!("HTTP 客户端构建失败: {e}");
            return None;
        }
    };
    let resp = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!("图标请求失败 {url}: {e}");
            return None;
        }
    };
    if !resp.status().is_success() {
        return None;
    }
    match resp.bytes().await {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(e) => {
            debug!("图标读取失败 {url}: {e}");
            None
        }
    }
}

/// 缓存有效性：文件存在且大小非零。
pub async fn is_valid_cache_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.is_file() && meta.len() > 0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_byte_file_is_not_a_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cid_x.png");
        assert!(!is_valid_cache_file(&path).await);

        tokio::fs::write(&path, b"").await.unwrap();
        assert!(!is_valid_cache_file(&path).await);

        tokio::fs::write(&path, b"png-bytes").await.unwrap();
        assert!(is_valid_cache_file(&path).await);
    }

    #[tokio::test]
    async fn cached_file_short_circuits_network() {
        // asset_base 指向不可达地址：命中缓存时不应发起任何请求。
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path(), "http://127.0.0.1:1", dir.path().join("tbd.png"));

        let path = cache.asset_path("cid_hit");
        tokio::fs::write(&path, b"cached").await.unwrap();

        let got = cache.ensure_asset("cid_hit").await.unwrap();
        assert_eq!(got, path);
    }

    #[tokio::test]
    async fn unreachable_origin_falls_back_to_placeholder() {
        // 连接被拒不是硬错误：两个来源都算失败尝试，最终落占位图。
        let dir = tempfile::tempdir().unwrap();
        let placeholder = dir.path().join("placeholder.png");
        tokio::fs::write(&placeholder, b"placeholder-bytes")
            .await
            .unwrap();
        let cache = AssetCache::new(dir.path(), "http://127.0.0.1:1", placeholder.clone());

        let path = cache.ensure_asset("cid_unreachable").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"placeholder-bytes");

        // 横幅图标的传输错误同样只是跳过，不上抛。
        let stored = cache
            .store_banner_icon("banner_x", "http://127.0.0.1:1/x.png")
            .await
            .unwrap();
        assert!(!stored);
    }
}
