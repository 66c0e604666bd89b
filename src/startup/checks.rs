use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::features::locker::Rarity;
use crate::features::poster::backdrop::{BackdropSkin, backdrop_path};

/// 执行启动检查
///
/// 1. 确保缓存 / 偏好 / 资源目录存在
/// 2. 检查字体、占位图与底板套图（仅告警，不阻断启动）
/// 3. 预热字体仓库，降低首个渲染请求的长尾延迟
pub async fn run_startup_checks(config: &AppConfig) -> Result<(), AppError> {
    tracing::info!("🔍 开始执行启动检查...");

    ensure_folder("resources", &config.resources_path())?;
    ensure_folder("cache", &config.cache_path())?;
    ensure_folder("prefs", &config.prefs_path())?;

    check_render_assets(config);

    let t_prewarm = std::time::Instant::now();
    let prewarm_config = config.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || {
        crate::features::poster::fonts::init_global(&prewarm_config);
    })
    .await
    {
        tracing::warn!("字体预热任务失败: {}", e);
    } else {
        tracing::info!("字体预热完成: {}ms", t_prewarm.elapsed().as_millis());
    }

    tracing::info!("✅ 启动检查完成");
    Ok(())
}

/// 确保目录存在，不存在则创建
fn ensure_folder(label: &str, path: &Path) -> Result<(), AppError> {
    if !path.exists() {
        tracing::warn!("📁 未找到 {} 目录，正在创建: {:?}", label, path);
        fs::create_dir_all(path)
            .map_err(|e| AppError::Internal(format!("创建 {label} 目录失败: {e}")))?;
        tracing::info!("✅ {} 目录创建成功", label);
    } else {
        tracing::info!("✅ {} 目录已存在", label);
    }
    Ok(())
}

/// 检查渲染素材。缺失只告警：字体缺失时标题省略，
/// 占位图缺失时贴图下载失败会转为渲染错误，底板缺失时对应皮肤不可用。
fn check_render_assets(config: &AppConfig) {
    let font = config.font_path();
    if !font.is_file() {
        tracing::warn!("⚠️ 标题字体缺失，海报将不含文字: {:?}", font);
    }

    let placeholder = config.placeholder_path();
    if !placeholder.is_file() {
        tracing::warn!("⚠️ 占位图缺失，贴图下载失败将导致渲染失败: {:?}", placeholder);
    }

    let backdrops = config.backdrops_path();
    if !backdrops.is_dir() {
        tracing::warn!("⚠️ 底板套图目录缺失: {:?}", backdrops);
        return;
    }
    // v1/v2 自带全套系列底板，抽查两张即可覆盖常见缺失。
    for (skin, rarity) in [
        (BackdropSkin::V1, Rarity::Common),
        (BackdropSkin::V2, Rarity::Mythic),
    ] {
        let path = backdrop_path(&backdrops, skin, &rarity);
        if !path.is_file() {
            tracing::warn!("⚠️ 底板文件缺失: {:?}", path);
        }
    }
}
