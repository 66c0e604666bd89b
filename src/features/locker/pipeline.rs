//! 渲染流水线：解析 → 过滤 → 升格 → 排序 → 取图 → 瓦片 → 网格。
//!
//! 账号档案/认证失败放弃整个请求；元数据与贴图故障在各自环节就地降级。
//! 解析与取图整批并发，瓦片光栅化走有界阻塞线程池，
//! 结果按排序位次重新对齐。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::features::poster::{self, BackdropSkin, FooterContext, backdrop, fonts};
use crate::features::prefs::{PrefsRecord, resolve_logo_path};
use crate::state::AppState;

use super::catalog::{EXCLUSIVE_IDS, STYLE_ART, is_elevated, promotion_rule};
use super::category::Category;
use super::models::{CosmeticItem, UnlockedStyles};
use super::resolver::{BannerNames, UNKNOWN_NAME};
use super::sorter::sort_items;

/// 一次渲染的输入参数。
#[derive(Debug)]
pub struct RenderOptions {
    pub username: String,
    pub prefs: PrefsRecord,
    pub category_order: Vec<Category>,
    pub unlocked_styles: Option<UnlockedStyles>,
    /// 仅渲染 Mythic 精选子集
    pub mythic_only: bool,
}

/// 渲染整组饰品为一张海报。无可渲染条目时返回 None。
pub async fn render_locker(
    state: &AppState,
    ids: &[String],
    banner_names: &BannerNames,
    opts: RenderOptions,
) -> Result<Option<Vec<u8>>, AppError> {
    let config = AppConfig::global();
    let max_items = config.image.max_items as usize;
    if ids.len() > max_items {
        return Err(AppError::Validation(format!(
            "条目数超出上限 ({} > {max_items})",
            ids.len()
        )));
    }

    // 解析整批并发；单条查询失败已在解析器内兜底为 Common + id。
    let resolved =
        join_all(ids.iter().map(|id| state.metadata_client.resolve(id, banner_names))).await;

    // 上游明确标记为 Unknown 的条目不进入后续阶段。
    let before = resolved.len();
    let mut items: Vec<CosmeticItem> = resolved
        .into_iter()
        .filter(|item| item.name != UNKNOWN_NAME)
        .collect();
    if items.len() < before {
        debug!("丢弃 {} 个无名条目", before - items.len());
    }

    let mut promoted = HashSet::new();
    apply_promotions(&mut items, opts.unlocked_styles.as_ref(), &mut promoted);

    if opts.mythic_only {
        items = filter_highlights(items, &promoted);
    }
    if items.is_empty() {
        return Ok(None);
    }

    sort_items(&mut items, &opts.category_order);

    // 贴图整批并发，全部落盘后按排序位次取回；样式替换图优先于缓存贴图。
    let styles_dir = config.styles_path();
    let asset_paths = join_all(items.iter().map(|item| {
        let styles_dir = &styles_dir;
        let styles = opts.unlocked_styles.as_ref();
        async move {
            match style_art_override(&item.id, styles, styles_dir) {
                Some(path) => Ok(path),
                None => state.asset_cache.ensure_asset(&item.id).await,
            }
        }
    }))
    .await
    .into_iter()
    .collect::<Result<Vec<_>, AppError>>()?;

    let skin = BackdropSkin::from_pref(&opts.prefs.backdrop_skin);
    let tiles = render_tiles(state, &items, &asset_paths, skin).await?;

    let logo = image::open(resolve_logo_path(&opts.prefs, &config.logo_path())).ok();
    let footer = FooterContext {
        username: opts.username,
        total_items: tiles.len(),
        link: opts.prefs.custom_link.clone(),
        logo,
    };

    let bytes = tokio::task::spawn_blocking(move || {
        let font = fonts::global().get();
        match poster::compose_grid(&tiles, &footer, font) {
            Some(canvas) => poster::encode_png(&canvas).map(Some),
            None => Ok(None),
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("合成任务失败: {e}")))??;

    Ok(bytes)
}

/// 瓦片光栅化：有界并发的阻塞任务，结果按输入位次对齐。
async fn render_tiles(
    state: &AppState,
    items: &[CosmeticItem],
    asset_paths: &[PathBuf],
    skin: BackdropSkin,
) -> Result<Vec<image::RgbaImage>, AppError> {
    let backdrops_root = AppConfig::global().backdrops_path();
    let mut handles = Vec::with_capacity(items.len());

    for (item, asset_path) in items.iter().zip(asset_paths) {
        let permit = state
            .render_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(format!("渲染信号量已关闭: {e}")))?;

        let item = item.clone();
        let asset_path = asset_path.clone();
        let backdrops_root = backdrops_root.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let asset = image::open(&asset_path).map_err(|e| {
                AppError::ImageRender(format!("贴图解码失败 {}: {e}", asset_path.display()))
            })?;
            let backdrop = backdrop::load_backdrop(&backdrops_root, skin, &item.rarity)?;
            let font = fonts::global().get();
            Ok::<_, AppError>(poster::render_tile(
                &asset,
                &backdrop,
                &item.name,
                &item.rarity,
                item.is_banner(),
                font,
            ))
        }));
    }

    let mut tiles = Vec::with_capacity(handles.len());
    for handle in handles {
        let tile = handle
            .await
            .map_err(|e| AppError::Internal(format!("瓦片任务失败: {e}")))??;
        tiles.push(tile);
    }
    Ok(tiles)
}

/// 样式升格：按规则表改写名称/稀有度，升格成功的 id 进入请求级累加器。
///
/// 受白名单门控的规则只在带样式表的整账号渲染里求值；
/// Skull Trooper 规则不走门控，但同样需要样式表才能升格。
pub fn apply_promotions(
    items: &mut [CosmeticItem],
    styles: Option<&UnlockedStyles>,
    promoted: &mut HashSet<String>,
) {
    for item in items.iter_mut() {
        let id_lower = item.id.to_ascii_lowercase();
        let Some(rule) = promotion_rule(&id_lower) else {
            continue;
        };

        if rule.exclusive_gated {
            let gated_in = styles.is_some()
                && EXCLUSIVE_IDS.contains(&item.id.to_ascii_uppercase().as_str());
            if !gated_in {
                continue;
            }
        }

        let has_style = styles
            .and_then(|s| s.get(&id_lower))
            .is_some_and(|tokens| tokens.iter().any(|t| t == rule.required_style));

        if has_style {
            item.name = rule.promoted_name.to_string();
            item.rarity = super::rarity::Rarity::Mythic;
            promoted.insert(id_lower);
        } else {
            item.name = rule.base_name.to_string();
        }
    }
}

/// Mythic 精选子集：提升名单上的 id 加上本次升格成功的 id。
pub fn filter_highlights(
    items: Vec<CosmeticItem>,
    promoted: &HashSet<String>,
) -> Vec<CosmeticItem> {
    items
        .into_iter()
        .filter(|item| {
            is_elevated(&item.id) || promoted.contains(&item.id.to_ascii_lowercase())
        })
        .collect()
}

/// 已解锁指定样式时返回本地替换贴图路径。
fn style_art_override(
    id: &str,
    styles: Option<&UnlockedStyles>,
    styles_dir: &Path,
) -> Option<PathBuf> {
    let styles = styles?;
    let id_lower = id.to_ascii_lowercase();
    let tokens = styles.get(&id_lower)?;
    for (rule_id, style, file) in STYLE_ART {
        if *rule_id == id_lower && tokens.iter().any(|t| t.eq_ignore_ascii_case(style)) {
            let path = styles_dir.join(file);
            if path.is_file() {
                return Some(path);
            }
        }
    }
    None
}

/// 整账号渲染的数据采集：athena 库存 + common_core 横幅。
///
/// 横幅只保留总表有条目且图标能落盘的那些，其余跳过。
pub async fn fetch_account_collection(
    state: &AppState,
    account_id: &str,
    access_token: &str,
) -> Result<(Vec<String>, UnlockedStyles, BannerNames), AppError> {
    let athena = state
        .epic_client
        .query_profile(account_id, access_token, "athena")
        .await?;
    let inventory = crate::features::profile::extract_athena_inventory(&athena);

    let common_core = state
        .epic_client
        .query_profile(account_id, access_token, "common_core")
        .await?;
    let bare_banner_ids = crate::features::profile::extract_banner_ids(&common_core);

    let mut ids = inventory.items;
    let mut banner_names = BannerNames::new();

    if !bare_banner_ids.is_empty() {
        let listing = state.metadata_client.fetch_banner_listing().await;
        for bare in bare_banner_ids {
            let Some(entry) = listing.get(&bare) else {
                debug!("横幅无总表条目，跳过: {}", bare);
                continue;
            };
            let full_id = format!("banner_{bare}");
            banner_names.insert(full_id.clone(), entry.dev_name.clone());
            let Some(icon_url) = entry.icon_url.as_deref() else {
                debug!("横幅无图标，跳过: {}", bare);
                continue;
            };
            if state.asset_cache.store_banner_icon(&full_id, icon_url).await? {
                ids.push(full_id);
            }
        }
    }

    info!("账号库存采集完成: {} 个条目", ids.len());
    Ok((ids, inventory.unlocked_styles, banner_names))
}
