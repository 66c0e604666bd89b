//! 请求追踪 id。
//!
//! 合法的客户端 `X-Request-Id` 原样沿用，否则服务端生成一个 UUID。
//! id 绑定到任务本地变量，错误响应体（ProblemDetails）从这里回填，
//! 并始终回写到响应头。

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 客户端传入值的长度上限，超出即视为非法并改为服务端生成。
const MAX_CLIENT_ID_LEN: usize = 64;

tokio::task_local! {
    static ACTIVE_REQUEST_ID: String;
}

/// 当前请求绑定的 id；在中间件作用域之外调用返回 None。
pub fn current_request_id() -> Option<String> {
    ACTIVE_REQUEST_ID.try_with(String::clone).ok()
}

/// 清洗客户端传入的 id：去除首尾空白后只接受受限字符集
/// （字母数字与 `-` `_` `.`），防止日志注入与响应头污染。
fn sanitize(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let ok = !trimmed.is_empty()
        && trimmed.len() <= MAX_CLIENT_ID_LEN
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    ok.then_some(trimmed)
}

/// 请求 id 中间件：确定本次请求的 id，挂到任务本地变量里跑完
/// 后续处理链，最后写回 `X-Request-Id` 响应头。
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(sanitize)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let mut res = ACTIVE_REQUEST_ID
        .scope(request_id.clone(), next.run(req))
        .await;

    // 经过清洗（或服务端生成）的 id 必然是合法头值。
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
