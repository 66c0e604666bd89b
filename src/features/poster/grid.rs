//! 网格装配：瓦片铺排 + 页脚带。

use std::io::Cursor;

use chrono::Local;
use image::codecs::png::PngEncoder;
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops::FilterType,
};
use rusttype::Font;

use crate::error::AppError;

use super::fonts;
use super::raster::overlay_alpha;

/// 画布上限。列数从 6 起增长，直到行数不超过列数。
const MAX_WIDTH: u32 = 1848;
const MAX_HEIGHT: u32 = 2048;
const BASE_COLS: u32 = 6;

/// 页脚文字的最小字号。
const FOOTER_FONT_FLOOR: u32 = 8;

/// 网格几何：列数、行数与正方形格边长。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub cols: u32,
    pub rows: u32,
    pub cell: u32,
}

/// 由瓦片数推几何。空集合返回 None（无可渲染内容）。
pub fn grid_geometry(n: usize) -> Option<GridGeometry> {
    if n == 0 {
        return None;
    }
    let n = n as u32;
    let mut cols = BASE_COLS;
    let mut rows = n.div_ceil(cols);
    while rows > cols {
        cols += 1;
        rows = n.div_ceil(cols);
    }
    let cell = (MAX_WIDTH / cols).min(MAX_HEIGHT / rows);
    Some(GridGeometry { cols, rows, cell })
}

/// 页脚内容。
#[derive(Debug)]
pub struct FooterContext {
    /// 署名
    pub username: String,
    /// 条目总数（页脚第一行）
    pub total_items: usize,
    /// 自定义链接（页脚第三行）
    pub link: String,
    /// 页脚 logo；缺失时用白色 100×100 方块占位
    pub logo: Option<DynamicImage>,
}

/// 铺排瓦片并绘制页脚带，输出整张海报。空瓦片集返回 None。
pub fn compose_grid(
    tiles: &[RgbaImage],
    footer: &FooterContext,
    font: Option<&Font<'_>>,
) -> Option<RgbaImage> {
    let geo = grid_geometry(tiles.len())?;
    let total_w = geo.cols * geo.cell;
    let band_h = geo.cell;
    let total_h = geo.rows * geo.cell + band_h;

    let mut canvas = RgbaImage::from_pixel(total_w, total_h, Rgba([0, 0, 0, 255]));

    for (idx, tile) in tiles.iter().enumerate() {
        let col = idx as u32 % geo.cols;
        let row = idx as u32 / geo.cols;
        let resized = image::imageops::resize(tile, geo.cell, geo.cell, FilterType::Lanczos3);
        overlay_alpha(&mut canvas, &resized, col * geo.cell, row * geo.cell);
    }

    draw_footer(&mut canvas, geo, footer, font);
    Some(canvas)
}

fn draw_footer(
    canvas: &mut RgbaImage,
    geo: GridGeometry,
    footer: &FooterContext,
    font: Option<&Font<'_>>,
) {
    let total_w = geo.cols * geo.cell;
    let band_h = geo.cell;
    let band_top = geo.rows * geo.cell;

    let logo = footer.logo.clone().unwrap_or_else(|| {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255])))
    });
    let logo_h = (band_h as f32 * 0.6) as u32;
    let logo_w =
        ((logo_h as f32 / logo.height().max(1) as f32) * logo.width() as f32).max(1.0) as u32;
    let logo = logo
        .resize_exact(logo_w.max(1), logo_h.max(1), FilterType::Lanczos3)
        .to_rgba8();

    let logo_x = 10u32;
    let logo_y = band_top + (band_h - logo_h) / 2;
    overlay_alpha(canvas, &logo, logo_x, logo_y);

    let Some(font) = font else {
        return;
    };

    let line1 = format!("Total Items: {}", footer.total_items);
    let line2 = format!(
        "Checked for {} | {}",
        footer.username,
        Local::now().format("%d/%m/%y")
    );
    let line3 = footer.link.clone();

    let max_text_width = total_w as f32 - (logo_x + logo_w + 20) as f32;
    let start = (logo_h / 3).max(FOOTER_FONT_FLOOR);
    let size = fonts::fit_size(start, FOOTER_FONT_FLOOR, max_text_width, |px| {
        [&line1, &line2, &line3]
            .iter()
            .map(|t| fonts::text_width(font, px as f32, t))
            .fold(0.0, f32::max)
    }) as f32;

    let line_h = fonts::line_height(font, size);
    let total_text_h = line_h * 3.0 + 10.0;
    let text_x = (logo_x + logo_w + 10) as i32;
    let mut text_y = band_top as f32 + (band_h as f32 - total_text_h) / 2.0;

    for line in [&line1, &line2, &line3] {
        fonts::draw_text(
            canvas,
            font,
            size,
            text_x,
            text_y as i32,
            Rgba([255, 255, 255, 255]),
            line,
        );
        text_y += line_h + 5.0;
    }
}

/// RGBA 画布 → PNG 字节。
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| AppError::ImageRender(format!("PNG 编码失败: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_items_keep_six_columns() {
        let geo = grid_geometry(13).unwrap();
        assert_eq!(geo.cols, 6);
        assert_eq!(geo.rows, 3);
    }

    #[test]
    fn forty_items_grow_past_six_columns() {
        let geo = grid_geometry(40).unwrap();
        assert!(geo.cols > 6);
        assert!(geo.rows <= geo.cols);
    }

    #[test]
    fn rows_never_exceed_cols() {
        for n in 1..=400 {
            let geo = grid_geometry(n).unwrap();
            assert!(geo.rows <= geo.cols, "n={n}: {geo:?}");
            assert!(geo.cols * geo.cell <= MAX_WIDTH);
            assert!(geo.cell > 0);
        }
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(grid_geometry(0).is_none());
        let footer = FooterContext {
            username: "x".into(),
            total_items: 0,
            link: "link".into(),
            logo: None,
        };
        assert!(compose_grid(&[], &footer, None).is_none());
    }

    #[test]
    fn canvas_has_one_extra_band_row() {
        let tiles: Vec<RgbaImage> =
            (0..13).map(|_| RgbaImage::from_pixel(64, 64, Rgba([50, 50, 50, 255]))).collect();
        let footer = FooterContext {
            username: "reno".into(),
            total_items: 13,
            link: "discord.gg/reno".into(),
            logo: None,
        };
        let canvas = compose_grid(&tiles, &footer, None).unwrap();
        let geo = grid_geometry(13).unwrap();
        assert_eq!(canvas.width(), geo.cols * geo.cell);
        assert_eq!(canvas.height(), geo.rows * geo.cell + geo.cell);
        // 页脚带底色为不透明黑。
        let p = canvas.get_pixel(canvas.width() - 1, canvas.height() - 1).0;
        assert_eq!(p, [0, 0, 0, 255]);
    }

    #[test]
    fn encode_png_produces_png_magic() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
