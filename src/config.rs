use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 全局配置单例
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 资源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// 资源基础路径（字体、底板、占位图、默认 Logo）
    pub base_path: String,
    /// 饰品图片磁盘缓存目录
    #[serde(default = "ResourcesConfig::default_cache_path")]
    pub cache_path: String,
    /// 用户偏好存储目录（每个用户一个 JSON 文件）
    #[serde(default = "ResourcesConfig::default_prefs_path")]
    pub prefs_path: String,
    /// 底板套图目录名（内含 v1..v7 子目录）
    #[serde(default = "ResourcesConfig::default_backdrops_folder")]
    pub backdrops_folder: String,
    /// 标题字体文件名
    #[serde(default = "ResourcesConfig::default_font_file")]
    pub font_file: String,
    /// 下载失败时使用的占位图文件名
    #[serde(default = "ResourcesConfig::default_placeholder_file")]
    pub placeholder_file: String,
    /// 页脚默认 Logo 文件名
    #[serde(default = "ResourcesConfig::default_logo_file")]
    pub logo_file: String,
    /// 样式替换贴图目录名（解锁特定样式时替换瓦片贴图）
    #[serde(default = "ResourcesConfig::default_styles_folder")]
    pub styles_folder: String,
}

impl ResourcesConfig {
    fn default_cache_path() -> String {
        "./cache".to_string()
    }
    fn default_prefs_path() -> String {
        "./user_prefs".to_string()
    }
    fn default_backdrops_folder() -> String {
        "backdrops".to_string()
    }
    fn default_font_file() -> String {
        "fonts/font.ttf".to_string()
    }
    fn default_placeholder_file() -> String {
        "placeholder.png".to_string()
    }
    fn default_logo_file() -> String {
        "logo.png".to_string()
    }
    fn default_styles_folder() -> String {
        "styles".to_string()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 日志格式
    pub format: String,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API 路由前缀
    pub prefix: String,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 是否启用 CORS
    #[serde(default = "CorsConfig::default_enabled")]
    pub enabled: bool,
    /// 允许的 Origin 列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// 允许的方法列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    /// 允许的请求头列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    /// 暴露的响应头列表（支持 "*" 表示任意）
    #[serde(default)]
    pub expose_headers: Vec<String>,
    /// 是否允许携带凭证（Cookie/Authorization）
    #[serde(default = "CorsConfig::default_allow_credentials")]
    pub allow_credentials: bool,
    /// 预检缓存时间（秒）
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

impl CorsConfig {
    fn default_enabled() -> bool {
        false
    }

    fn default_allow_credentials() -> bool {
        false
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            allowed_origins: Vec::new(),
            allowed_methods: Vec::new(),
            allowed_headers: Vec::new(),
            expose_headers: Vec::new(),
            allow_credentials: Self::default_allow_credentials(),
            max_age_secs: None,
        }
    }
}

/// 饰品元数据/图片源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 元数据服务基地址（`/v2/cosmetics/br/{id}`、`/v1/banners`）
    pub metadata_base_url: String,
    /// 图片源基地址（`/images/cosmetics/br/{id}/icon.png`）
    pub asset_base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            metadata_base_url: "https://fortnite-api.com".to_string(),
            asset_base_url: "https://fortnite-api.com".to_string(),
        }
    }
}

/// Epic 账号/档案服务配置（外部协作方，仅边界访问）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicConfig {
    /// 账号 OAuth 服务基地址（设备码授权与换取 token）
    pub account_base_url: String,
    /// 游戏档案服务基地址（QueryProfile）
    pub game_base_url: String,
    /// 设备码流程使用的客户端凭据（basic token）
    pub client_token: String,
}

impl Default for EpicConfig {
    fn default() -> Self {
        Self {
            account_base_url: "https://account-public-service-prod03.ol.epicgames.com"
                .to_string(),
            game_base_url: "https://fortnite-public-service-prod11.ol.epicgames.com".to_string(),
            client_token:
                "OThmN2U0MmMyZTNhNGY4NmE3NGViNDNmYmI0MWVkMzk6MGEyNDQ5YTItMDAxYS00NTFlLWFmZWMtM2U4MTI5MDFjNGQ3"
                    .to_string(),
        }
    }
}

/// 品牌/展示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    /// 页脚默认链接文字（用户未自定义时使用）
    #[serde(default = "BrandingConfig::default_footer_link")]
    pub footer_link: String,
}

impl BrandingConfig {
    fn default_footer_link() -> String {
        "discord.gg/reno".to_string()
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            footer_link: Self::default_footer_link(),
        }
    }
}

/// 图片渲染配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRenderConfig {
    /// 是否启用成品海报缓存
    #[serde(default = "ImageRenderConfig::default_cache_enabled")]
    pub cache_enabled: bool,
    /// 缓存最大容量（字节），按图片字节大小加权
    #[serde(default = "ImageRenderConfig::default_cache_max_bytes")]
    pub cache_max_bytes: u64,
    /// 缓存 TTL（秒）
    #[serde(default = "ImageRenderConfig::default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// 缓存 TTI（秒）
    #[serde(default = "ImageRenderConfig::default_cache_tti")]
    pub cache_tti_secs: u64,
    /// 并发渲染许可数（0=自动，取 CPU 核心数）
    #[serde(default = "ImageRenderConfig::default_max_parallel")]
    pub max_parallel: u32,
    /// 单次渲染的条目数硬上限（0=不限制，不建议）
    #[serde(default = "ImageRenderConfig::default_max_items")]
    pub max_items: u32,
}

impl ImageRenderConfig {
    fn default_cache_enabled() -> bool {
        true
    }
    fn default_cache_max_bytes() -> u64 {
        100 * 1024 * 1024
    }
    fn default_cache_ttl() -> u64 {
        60
    }
    fn default_cache_tti() -> u64 {
        30
    }
    fn default_max_parallel() -> u32 {
        4
    }
    fn default_max_items() -> u32 {
        2000
    }
}

impl Default for ImageRenderConfig {
    fn default() -> Self {
        Self {
            cache_enabled: Self::default_cache_enabled(),
            cache_max_bytes: Self::default_cache_max_bytes(),
            cache_ttl_secs: Self::default_cache_ttl(),
            cache_tti_secs: Self::default_cache_tti(),
            max_parallel: Self::default_max_parallel(),
            max_items: Self::default_max_items(),
        }
    }
}

/// 优雅退出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// 优雅退出超时时间（秒）
    #[serde(default = "ShutdownConfig::default_timeout")]
    pub timeout_secs: u64,
    /// 是否启用强制退出
    #[serde(default = "ShutdownConfig::default_force")]
    pub force_quit: bool,
    /// 强制退出前的等待时间（秒）
    #[serde(default = "ShutdownConfig::default_force_delay")]
    pub force_delay_secs: u64,
}

impl ShutdownConfig {
    fn default_timeout() -> u64 {
        30
    }
    fn default_force() -> bool {
        true
    }
    fn default_force_delay() -> u64 {
        10
    }

    /// 获取优雅退出超时时间
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// 获取强制退出等待时间
    pub fn force_delay_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.force_delay_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout(),
            force_quit: Self::default_force(),
            force_delay_secs: Self::default_force_delay(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    /// CORS 配置
    #[serde(default)]
    pub cors: CorsConfig,
    /// 饰品元数据/图片源配置
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Epic 账号/档案服务配置
    #[serde(default)]
    pub epic: EpicConfig,
    /// 品牌/展示配置
    #[serde(default)]
    pub branding: BrandingConfig,
    /// 图片渲染配置
    #[serde(default)]
    pub image: ImageRenderConfig,
    /// 优雅退出配置
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl AppConfig {
    /// 从配置文件加载配置，支持环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path();

        tracing::info!("正在从 {:?} 加载配置文件", config_path);

        let builder = ConfigBuilder::builder()
            // 加载配置文件
            .add_source(File::with_name(config_path.to_str().unwrap()))
            // 支持环境变量覆盖，例如：APP_API_PREFIX
            .add_source(
                Environment::with_prefix("APP")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = builder.try_deserialize()?;
        Ok(config)
    }

    /// 获取全局配置单例
    pub fn global() -> &'static AppConfig {
        CONFIG.get().expect("配置未初始化，请先调用 init_global()")
    }

    /// 初始化全局配置
    pub fn init_global() -> Result<(), ConfigError> {
        let config = Self::load()?;
        CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("配置已经被初始化".to_string()))?;
        Ok(())
    }

    /// 获取配置文件路径
    fn get_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// 获取服务器监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取资源文件夹路径
    pub fn resources_path(&self) -> PathBuf {
        PathBuf::from(&self.resources.base_path)
    }

    /// 获取饰品图片磁盘缓存目录
    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.resources.cache_path)
    }

    /// 获取用户偏好存储目录
    pub fn prefs_path(&self) -> PathBuf {
        PathBuf::from(&self.resources.prefs_path)
    }

    /// 获取底板套图根目录（内含 v1..v7）
    pub fn backdrops_path(&self) -> PathBuf {
        self.resources_path().join(&self.resources.backdrops_folder)
    }

    /// 获取标题字体完整路径
    pub fn font_path(&self) -> PathBuf {
        self.resources_path().join(&self.resources.font_file)
    }

    /// 获取占位图完整路径
    pub fn placeholder_path(&self) -> PathBuf {
        self.resources_path().join(&self.resources.placeholder_file)
    }

    /// 获取默认 Logo 完整路径
    pub fn logo_path(&self) -> PathBuf {
        self.resources_path().join(&self.resources.logo_file)
    }

    /// 获取样式替换贴图目录完整路径
    pub fn styles_path(&self) -> PathBuf {
        self.resources_path().join(&self.resources.styles_folder)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3939,
            },
            resources: ResourcesConfig {
                base_path: "./resources".to_string(),
                cache_path: ResourcesConfig::default_cache_path(),
                prefs_path: ResourcesConfig::default_prefs_path(),
                backdrops_folder: ResourcesConfig::default_backdrops_folder(),
                font_file: ResourcesConfig::default_font_file(),
                placeholder_file: ResourcesConfig::default_placeholder_file(),
                logo_file: ResourcesConfig::default_logo_file(),
                styles_folder: ResourcesConfig::default_styles_folder(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "full".to_string(),
            },
            api: ApiConfig {
                prefix: "/api/v1".to_string(),
            },
            cors: CorsConfig::default(),
            upstream: UpstreamConfig::default(),
            epic: EpicConfig::default(),
            branding: BrandingConfig::default(),
            image: ImageRenderConfig::default(),
            shutdown: ShutdownConfig::default(),
        }
    }
}
