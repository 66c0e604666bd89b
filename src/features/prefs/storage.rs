//! 每用户一个 JSON 文件的偏好存储。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::error::AppError;

/// 用户偏好记录。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrefsRecord {
    /// 底板皮肤（v1..v7；未识别的值在合成时回落到 v2）
    #[serde(default = "default_backdrop_skin")]
    pub backdrop_skin: String,
    /// 页脚自定义链接
    #[serde(default)]
    pub custom_link: String,
    /// 自定义 logo 文件路径（缺省用全局 logo）
    #[serde(default)]
    pub logo_path: Option<String>,
}

fn default_backdrop_skin() -> String {
    "v1".to_string()
}

/// 偏好存储：`{prefs_dir}/{user_id}.json`，读不到就给默认记录。
#[derive(Debug, Clone)]
pub struct PrefsStore {
    dir: PathBuf,
    default_link: String,
}

impl PrefsStore {
    pub fn new(dir: impl Into<PathBuf>, default_link: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_link: default_link.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.prefs_path(), config.branding.footer_link.clone())
    }

    /// 默认记录（没有存档的用户）。
    pub fn default_record(&self) -> PrefsRecord {
        PrefsRecord {
            backdrop_skin: default_backdrop_skin(),
            custom_link: self.default_link.clone(),
            logo_path: None,
        }
    }

    fn record_path(&self, user_id: &str) -> Result<PathBuf, AppError> {
        validate_user_id(user_id)?;
        Ok(self.dir.join(format!("{user_id}.json")))
    }

    /// 读取用户偏好；文件不存在时返回默认记录。
    pub async fn load(&self, user_id: &str) -> Result<PrefsRecord, AppError> {
        let path = self.record_path(user_id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(self.default_record()),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入用户偏好。
    pub async fn save(&self, user_id: &str, record: &PrefsRecord) -> Result<(), AppError> {
        let path = self.record_path(user_id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }
}

/// 用户 id 只允许安全字符（文件名即存储键，不能携带路径成分）。
fn validate_user_id(user_id: &str) -> Result<(), AppError> {
    let valid = !user_id.is_empty()
        && user_id.len() <= 64
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("非法的用户 id: {user_id}")))
    }
}

/// 海报页脚 logo 的查找顺序：用户自定义路径 → 全局 logo。
pub fn resolve_logo_path(record: &PrefsRecord, global_logo: &Path) -> PathBuf {
    match &record.logo_path {
        Some(custom) if Path::new(custom).is_file() => PathBuf::from(custom),
        _ => global_logo.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> PrefsStore {
        PrefsStore::new(dir, "discord.gg/reno")
    }

    #[tokio::test]
    async fn missing_record_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let record = store(dir.path()).load("user1").await.unwrap();
        assert_eq!(record.backdrop_skin, "v1");
        assert_eq!(record.custom_link, "discord.gg/reno");
        assert!(record.logo_path.is_none());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let record = PrefsRecord {
            backdrop_skin: "v5".to_string(),
            custom_link: "example.org".to_string(),
            logo_path: None,
        };
        store.save("user2", &record).await.unwrap();
        let loaded = store.load("user2").await.unwrap();
        assert_eq!(loaded.backdrop_skin, "v5");
        assert_eq!(loaded.custom_link, "example.org");
    }

    #[tokio::test]
    async fn path_like_user_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        for bad in ["../escape", "a/b", "", "x".repeat(65).as_str()] {
            let err = store.load(bad).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{bad}");
        }
    }
}
