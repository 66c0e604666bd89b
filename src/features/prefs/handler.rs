use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

use crate::error::AppError;
use crate::state::AppState;

use super::storage::PrefsRecord;

#[utoipa::path(
    get,
    path = "/prefs/{user_id}",
    summary = "读取用户偏好",
    description = "没有存档的用户返回默认偏好。",
    params(("user_id" = String, Path, description = "用户 id")),
    responses(
        (status = 200, description = "偏好记录", body = PrefsRecord),
        (
            status = 422,
            description = "非法的用户 id",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Prefs"
)]
pub async fn get_prefs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PrefsRecord>, AppError> {
    let record = state.prefs_store.load(&user_id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/prefs/{user_id}",
    summary = "写入用户偏好",
    params(("user_id" = String, Path, description = "用户 id")),
    request_body = PrefsRecord,
    responses(
        (status = 200, description = "已保存的偏好记录", body = PrefsRecord),
        (
            status = 422,
            description = "非法的用户 id",
            body = crate::error::ProblemDetails,
            content_type = "application/problem+json"
        )
    ),
    tag = "Prefs"
)]
pub async fn put_prefs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(record): Json<PrefsRecord>,
) -> Result<Json<PrefsRecord>, AppError> {
    state.prefs_store.save(&user_id, &record).await?;
    Ok(Json(record))
}

pub fn create_prefs_router() -> Router<AppState> {
    Router::new().route("/prefs/:user_id", get(get_prefs).put(put_prefs))
}
