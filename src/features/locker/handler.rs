use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;

use super::category::DEFAULT_CATEGORY_ORDER;
use super::models::{Collection, RenderAccountRequest, RenderQuery, RenderRequest};
use super::pipeline::{self, RenderOptions};
use super::resolver::BannerNames;

/// 成品 PNG 响应；None 走 204。
fn png_response(bytes: Option<Bytes>) -> Response {
    match bytes {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes,
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// 海报缓存键：规范化请求的 SHA-256。
/// 偏好记录影响像素输出，必须参与键值。
fn poster_cache_key(
    tag: &str,
    payload: &impl serde::Serialize,
    collection: Option<Collection>,
    prefs: &crate::features::prefs::PrefsRecord,
) -> Result<String, AppError> {
    let canonical = serde_json::to_string(&serde_json::json!({
        "tag": tag,
        "payload": payload,
        "mythic": matches!(collection, Some(Collection::Mythic)),
        "prefs": prefs,
    }))?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

#[utoipa::path(
    post,
    path = "/locker/render",
    summary = "渲染饰品海报",
    description = "把一组饰品 id 渲染为单张海报。`collection=mythic` 时只渲染 Mythic 精选子集；\
                   无可渲染条目返回 204。",
    params(RenderQuery),
    request_body = RenderRequest,
    responses(
        (status = 200, description = "PNG 海报", content_type = "image/png"),
        (status = 204, description = "无可渲染条目"),
        (
            status = 422,
            description = "参数校验错误",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 502,
            description = "元数据服务不可用",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Locker"
)]
pub async fn render_locker(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
    axum::Json(req): axum::Json<RenderRequest>,
) -> Result<Response, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("username 不能为空".into()));
    }

    let prefs = match req.user_id.as_deref() {
        Some(user_id) => state.prefs_store.load(user_id).await?,
        None => state.prefs_store.default_record(),
    };

    let cache_key = poster_cache_key("render", &req, query.collection, &prefs)?;
    let cache_enabled = crate::config::AppConfig::global().image.cache_enabled;
    if cache_enabled {
        if let Some(bytes) = state.poster_cache.get(&cache_key).await {
            debug!("海报缓存命中");
            return Ok(png_response(Some(bytes)));
        }
    }

    let opts = RenderOptions {
        username: req.username.clone(),
        prefs,
        category_order: req
            .category_order
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY_ORDER.to_vec()),
        unlocked_styles: req.unlocked_styles.clone(),
        mythic_only: matches!(query.collection, Some(Collection::Mythic)),
    };

    let banner_names = BannerNames::new();
    let rendered = pipeline::render_locker(&state, &req.items, &banner_names, opts).await?;

    let bytes = rendered.map(Bytes::from);
    if cache_enabled {
        if let Some(bytes) = &bytes {
            state.poster_cache.insert(cache_key, bytes.clone()).await;
        }
    }
    Ok(png_response(bytes))
}

#[utoipa::path(
    post,
    path = "/locker/render/account",
    summary = "渲染整账号海报",
    description = "凭账号会话拉取 athena 库存与 common_core 横幅，渲染完整衣柜为单张海报。",
    params(RenderQuery),
    request_body = RenderAccountRequest,
    responses(
        (status = 200, description = "PNG 海报", content_type = "image/png"),
        (status = 204, description = "账号没有可渲染条目"),
        (
            status = 401,
            description = "账号会话无效",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 502,
            description = "上游服务不可用",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Locker"
)]
pub async fn render_account(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
    axum::Json(req): axum::Json<RenderAccountRequest>,
) -> Result<Response, AppError> {
    if req.account_id.trim().is_empty() || req.access_token.trim().is_empty() {
        return Err(AppError::Validation(
            "account_id 与 access_token 不能为空".into(),
        ));
    }

    let (ids, unlocked_styles, banner_names) =
        pipeline::fetch_account_collection(&state, &req.account_id, &req.access_token).await?;
    info!("整账号渲染: {} 个条目", ids.len());

    let username = req
        .username
        .clone()
        .unwrap_or_else(|| req.account_id.clone());
    let prefs = match req.user_id.as_deref() {
        Some(user_id) => state.prefs_store.load(user_id).await?,
        None => state.prefs_store.default_record(),
    };

    let opts = RenderOptions {
        username,
        prefs,
        category_order: DEFAULT_CATEGORY_ORDER.to_vec(),
        unlocked_styles: Some(unlocked_styles),
        mythic_only: matches!(query.collection, Some(Collection::Mythic)),
    };

    let rendered = pipeline::render_locker(&state, &ids, &banner_names, opts).await?;
    Ok(png_response(rendered.map(Bytes::from)))
}

pub fn create_locker_router() -> Router<AppState> {
    Router::new()
        .route("/locker/render", post(render_locker))
        .route("/locker/render/account", post(render_account))
}
