use axum::Router;
use axum::body::Bytes;
use locker_backend::cors::build_cors_layer;
use locker_backend::features::health::create_health_router;
use locker_backend::features::locker::{AssetCache, MetadataClient, create_locker_router};
use locker_backend::features::prefs::{PrefsStore, create_prefs_router};
use locker_backend::features::profile::{EpicClient, create_auth_router};
use locker_backend::request_id::request_id_middleware;
use locker_backend::startup::run_startup_checks;
use locker_backend::state::AppState;
use locker_backend::{ShutdownManager, config::AppConfig};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn compression_predicate() -> impl tower_http::compression::predicate::Predicate {
    use tower_http::compression::predicate::{NotForContentType, Predicate, SizeAbove};

    // 压缩策略：明确排除不该压缩的响应，其余走默认。
    //
    // - 海报与贴图本身是 PNG，已经压缩过，再压缩只浪费 CPU。
    // - application/octet-stream/zip/gzip 等二进制下载收益不确定。
    //
    // 保留默认的最小大小阈值（32B），避免压缩开销覆盖收益。
    SizeAbove::default()
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE)
        .and(NotForContentType::const_new("application/octet-stream"))
        .and(NotForContentType::const_new("application/zip"))
        .and(NotForContentType::const_new("application/gzip"))
        .and(NotForContentType::const_new("application/x-gzip"))
}

#[cfg(test)]
mod compression_predicate_tests {
    use super::compression_predicate;
    use axum::body::Body;
    use axum::http::{Response as HttpResponse, header};
    use tower_http::compression::predicate::Predicate;

    fn should_compress_for(ct: &str) -> bool {
        // 命中 SizeAbove（默认 32B），避免因为 body 太小导致测试不稳定。
        let body_bytes = vec![b'x'; 2048];
        let resp = HttpResponse::builder()
            .header(header::CONTENT_TYPE, ct)
            .body(Body::from(body_bytes))
            .unwrap();
        compression_predicate().should_compress(&resp)
    }

    #[test]
    fn compression_predicate_disables_png_posters() {
        assert!(!should_compress_for("image/png"));
        assert!(should_compress_for("image/svg+xml"));
    }

    #[test]
    fn compression_predicate_allows_json() {
        assert!(should_compress_for("application/json"));
        assert!(should_compress_for("application/problem+json"));
    }

    #[test]
    fn compression_predicate_disables_common_binary_downloads() {
        assert!(!should_compress_for("application/octet-stream"));
        assert!(!should_compress_for("application/zip"));
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        locker_backend::features::health::handler::health_check,
        locker_backend::features::locker::handler::render_locker,
        locker_backend::features::locker::handler::render_account,
        locker_backend::features::profile::handler::start_device_auth,
        locker_backend::features::profile::handler::poll_device_auth,
        locker_backend::features::prefs::handler::get_prefs,
        locker_backend::features::prefs::handler::put_prefs,
    ),
    components(
        schemas(
            locker_backend::error::ProblemDetails,
            locker_backend::features::health::handler::HealthResponse,
            locker_backend::features::locker::models::RenderRequest,
            locker_backend::features::locker::models::RenderAccountRequest,
            locker_backend::features::locker::models::Collection,
            locker_backend::features::locker::models::CosmeticItem,
            locker_backend::features::locker::category::Category,
            locker_backend::features::locker::rarity::Rarity,
            locker_backend::features::poster::backdrop::BackdropSkin,
            locker_backend::features::prefs::PrefsRecord,
            locker_backend::features::profile::models::DeviceCodeStart,
            locker_backend::features::profile::models::EpicSession,
        )
    ),
    tags(
        (name = "Locker", description = "Locker poster APIs"),
        (name = "Auth", description = "Device-code auth APIs"),
        (name = "Prefs", description = "User preference APIs"),
        (name = "Health", description = "Health APIs"),
    ),
    info(
        title = "Locker Backend API",
        version = "0.1.0",
        description = "Fortnite locker poster service (Axum)"
    )
)]
pub struct ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locker_backend=info,tower_http=info".into()),
        )
        .init();

    // 创建优雅退出管理器
    let shutdown_manager = ShutdownManager::new();

    // Load config
    if let Err(e) = AppConfig::init_global() {
        tracing::error!("Config init failed: {}", e);
        std::process::exit(1);
    }
    let config = AppConfig::global();

    // 启动信号处理器
    if let Err(e) = shutdown_manager.start_signal_handler().await {
        tracing::error!("信号处理器启动失败: {}", e);
        std::process::exit(1);
    }

    // Run startup checks
    if let Err(e) = run_startup_checks(config).await {
        tracing::error!("Startup checks failed: {}", e);
        std::process::exit(1);
    }

    // 初始化海报缓存（容量按总字节数加权）
    let poster_cache: Cache<String, Bytes> = {
        let img = &config.image;
        Cache::builder()
            .weigher(|_k, v: &Bytes| v.len() as u32)
            .max_capacity(img.cache_max_bytes)
            .time_to_live(Duration::from_secs(img.cache_ttl_secs))
            .time_to_idle(Duration::from_secs(img.cache_tti_secs))
            .build()
    };

    let app_state = AppState {
        metadata_client: Arc::new(MetadataClient::from_config(config)),
        asset_cache: Arc::new(AssetCache::from_config(config)),
        epic_client: Arc::new(EpicClient::from_config(config)),
        prefs_store: Arc::new(PrefsStore::from_config(config)),
        render_semaphore: Arc::new(Semaphore::new({
            let m = config.image.max_parallel as usize;
            if m == 0 { num_cpus::get() } else { m }
        })),
        poster_cache,
    };

    // Routes
    let api_router = Router::<AppState>::new()
        .merge(create_locker_router())
        .merge(create_auth_router())
        .merge(create_prefs_router());

    let mut app = Router::<AppState>::new()
        .merge(create_health_router())
        .nest(&config.api.prefix, api_router)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // 请求追踪 ID 中间件
    app = app.layer(axum::middleware::from_fn(request_id_middleware));

    // CORS（按配置开关）
    if let Some(cors) = build_cors_layer(&config.cors) {
        app = app.layer(cors);
    }

    // 应用内响应压缩：JSON/文档等文本内容启用 gzip/brotli，PNG 海报不参与。
    app = app.layer(CompressionLayer::new().compress_when(compression_predicate()));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Bind address failed {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("Server: http://{}", addr);
    tracing::info!("Docs: http://{}/docs", addr);
    tracing::info!("Health: http://{}/health", addr);
    tracing::info!(
        "Locker API: http://{}{}/locker/render",
        addr,
        config.api.prefix
    );
    tracing::info!("Auth API: http://{}{}/auth/device", addr, config.api.prefix);

    // 启动服务器并等待优雅退出信号
    let shutdown_config = &config.shutdown;
    let shutdown_timeout = shutdown_config.timeout_duration();

    let shutdown_signal = async move {
        let reason = shutdown_manager.wait_for_shutdown().await;
        tracing::info!("接收到退出信号: {:?}，开始优雅退出...", reason);

        match tokio::time::timeout(shutdown_timeout, async move {
            tracing::info!("优雅退出超时时间: {}秒", shutdown_config.timeout_secs);

            // 等待一小段时间确保在途渲染任务收尾
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        })
        .await
        {
            Ok(_) => {
                tracing::info!("优雅退出完成");
            }
            Err(_) => {
                tracing::warn!("优雅退出超时，强制退出");
                if shutdown_config.force_quit {
                    tracing::info!("等待 {} 秒后强制退出", shutdown_config.force_delay_secs);
                    tokio::time::sleep(shutdown_config.force_delay_duration()).await;
                }
            }
        }
    };

    let graceful = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal.await;
        tracing::info!("开始优雅关闭HTTP服务器...");
    });

    if let Err(e) = graceful.await {
        tracing::error!("服务器运行错误: {}", e);
        std::process::exit(1);
    }

    tracing::info!("服务器已优雅关闭");
}
