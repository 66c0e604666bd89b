use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

use super::models::{DeviceCodeStart, EpicSession};

#[utoipa::path(
    post,
    path = "/auth/device",
    summary = "发起设备码登录",
    description = "返回验证地址与设备码。用户在浏览器完成授权后，调用方凭设备码轮询登录状态。",
    responses(
        (status = 200, description = "授权已发起", body = DeviceCodeStart),
        (
            status = 401,
            description = "上游拒绝发起授权",
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
    tag = "Auth"
)]
pub async fn start_device_auth(
    State(state): State<AppState>,
) -> Result<Json<DeviceCodeStart>, AppError> {
    let start = state.epic_client.start_device_auth().await?;
    Ok(Json(start))
}

#[utoipa::path(
    get,
    path = "/auth/device/{code}",
    summary = "轮询设备码登录状态",
    description = "每次调用向上游查询一次。未完成授权返回 202/AUTH_PENDING，完成后返回账号会话。",
    params(("code" = String, Path, description = "设备码")),
    responses(
        (status = 200, description = "授权完成", body = EpicSession),
        (
            status = 202,
            description = "等待用户完成授权",
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
    tag = "Auth"
)]
pub async fn poll_device_auth(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<EpicSession>, AppError> {
    if code.trim().is_empty() {
        return Err(AppError::Validation("设备码不能为空".into()));
    }
    let session = state.epic_client.poll_device_auth(&code).await?;
    Ok(Json(session))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/device", post(start_device_auth))
        .route("/auth/device/:code", get(poll_device_auth))
}
