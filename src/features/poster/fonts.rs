//! 标题字体：加载、宽度测量与逐字形绘制。
//!
//! 字体文件缺失不是致命错误：测量与绘制都接受 `Option<&Font>`，
//! 无字体时跳过文字、海报照常输出（启动检查会给出告警）。

use std::path::Path;

use image::{ImageBuffer, Rgba};
use once_cell::sync::OnceCell;
use rusttype::{Font, Scale, point};
use tracing::{info, warn};

use crate::config::AppConfig;

static FONT_STORE: OnceCell<FontStore> = OnceCell::new();

/// 进程级字体仓库。
#[derive(Debug)]
pub struct FontStore {
    font: Option<Font<'static>>,
}

impl FontStore {
    /// 从磁盘加载字体，失败时降级为无字体仓库。
    pub fn load(path: &Path) -> Self {
        let font = match std::fs::read(path) {
            Ok(bytes) => match Font::try_from_vec(bytes) {
                Some(font) => {
                    info!("标题字体已加载: {}", path.display());
                    Some(font)
                }
                None => {
                    warn!("字体文件无法解析，标题将被省略: {}", path.display());
                    None
                }
            },
            Err(e) => {
                warn!("字体文件读取失败 ({e})，标题将被省略: {}", path.display());
                None
            }
        };
        Self { font }
    }

    pub fn get(&self) -> Option<&Font<'static>> {
        self.font.as_ref()
    }
}

/// 初始化全局字体仓库（启动时调用一次）。
pub fn init_global(config: &AppConfig) {
    let store = FontStore::load(&config.font_path());
    let _ = FONT_STORE.set(store);
}

/// 全局字体仓库；未初始化时按全局配置惰性加载。
pub fn global() -> &'static FontStore {
    FONT_STORE.get_or_init(|| FontStore::load(&AppConfig::global().font_path()))
}

/// 文本在指定字号下的像素宽度。
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut width: f32 = 0.0;
    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// 行高（ascent − descent）。
pub fn line_height(font: &Font<'_>, px: f32) -> f32 {
    let vm = font.v_metrics(Scale::uniform(px));
    (vm.ascent - vm.descent).max(1.0)
}

/// 在 (x, y) 处（文本框左上角）绘制一行文字，逐字形 alpha 混合。
pub fn draw_text(
    img: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut caret_x = x as f32;
    let baseline_y = y as f32 + v_metrics.ascent;

    for ch in text.chars() {
        let glyph = font
            .glyph(ch)
            .scaled(scale)
            .positioned(point(caret_x, baseline_y));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= img.width() || py >= img.height() {
                    return;
                }
                let sa = v.clamp(0.0, 1.0);
                if sa <= 0.0 {
                    return;
                }
                let inv = 1.0 - sa;
                let dst = img.get_pixel_mut(px, py);
                dst.0[0] = (color.0[0] as f32 * sa + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color.0[1] as f32 * sa + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color.0[2] as f32 * sa + dst.0[2] as f32 * inv) as u8;
                dst.0[3] = 255;
            });
        }
        caret_x += glyph.unpositioned().h_metrics().advance_width;
    }
}

/// 逐磅缩小字号直到测量宽度放得下：从 `start` 起每次减 1，最低 `floor`。
/// 测量函数由调用方提供，返回给定字号下的内容宽度。
pub fn fit_size(start: u32, floor: u32, max_width: f32, measure: impl Fn(u32) -> f32) -> u32 {
    let mut size = start.max(floor);
    while size > floor && measure(size) > max_width {
        size -= 1;
    }
    size
}
