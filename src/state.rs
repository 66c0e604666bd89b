use axum::body::Bytes;
use moka::future::Cache;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::features::locker::assets::AssetCache;
use crate::features::locker::resolver::MetadataClient;
use crate::features::prefs::PrefsStore;
use crate::features::profile::client::EpicClient;

/// 聚合的应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub metadata_client: Arc<MetadataClient>,
    pub asset_cache: Arc<AssetCache>,
    pub epic_client: Arc<EpicClient>,
    pub prefs_store: Arc<PrefsStore>,
    /// 控制并发渲染的信号量（限制 CPU 密集型任务数量）
    pub render_semaphore: Arc<Semaphore>,
    /// 成品海报缓存（按图片字节大小加权）
    pub poster_cache: Cache<String, Bytes>,
}
