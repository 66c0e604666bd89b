//! 单个饰品瓦片的合成。

use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};
use rusttype::Font;

use crate::features::locker::rarity::Rarity;

use super::fonts;
use super::raster::{blend_rect, overlay_alpha};

/// 横幅贴图的固定尺寸与内嵌位置。
const BANNER_SIZE: u32 = 192;
const BANNER_POS: (u32, u32) = (32, 12);

/// 遮罩带从 80% 高度处开始，覆盖底部 20%。
const BAND_START: f32 = 0.80;
const BAND_ALPHA: f32 = 0.7;

/// 标题两侧各留 10 像素。
const CAPTION_MARGIN: f32 = 20.0;
const CAPTION_FLOOR: u32 = 10;

/// 特殊系列层级的标题起始字号更大。
fn caption_start_size(rarity: &Rarity) -> u32 {
    if rarity.is_special_series() { 80 } else { 40 }
}

/// 合成一块瓦片：底板 + 贴图 + 遮罩带 + 居中标题。
///
/// 相同输入产生逐像素相同的输出。无字体时省略标题。
pub fn render_tile(
    asset: &DynamicImage,
    backdrop: &DynamicImage,
    name: &str,
    rarity: &Rarity,
    is_banner: bool,
    font: Option<&Font<'_>>,
) -> RgbaImage {
    let mut bg = backdrop.to_rgba8();
    let (w, h) = (bg.width(), bg.height());

    if is_banner {
        let fg = asset
            .resize_exact(BANNER_SIZE, BANNER_SIZE, FilterType::Lanczos3)
            .to_rgba8();
        overlay_alpha(&mut bg, &fg, BANNER_POS.0, BANNER_POS.1);
    } else {
        let fg = asset.resize_exact(w, h, FilterType::Lanczos3).to_rgba8();
        overlay_alpha(&mut bg, &fg, 0, 0);
    }

    let band_y = (h as f32 * BAND_START) as u32;
    let band_h = h - band_y;
    blend_rect(&mut bg, 0, band_y, w, band_h, [0, 0, 0], BAND_ALPHA);

    if let Some(font) = font {
        let caption = name.to_uppercase();
        let max_width = w as f32 - CAPTION_MARGIN;
        let size = fonts::fit_size(caption_start_size(rarity), CAPTION_FLOOR, max_width, |px| {
            fonts::text_width(font, px as f32, &caption)
        }) as f32;

        let text_w = fonts::text_width(font, size, &caption);
        let text_h = fonts::line_height(font, size);
        let text_x = ((w as f32 - text_w) / 2.0) as i32;
        let text_y = band_y as i32 + ((band_h as f32 - text_h) / 2.0) as i32;
        fonts::draw_text(
            &mut bg,
            font,
            size,
            text_x,
            text_y,
            Rgba([255, 255, 255, 255]),
            &caption,
        );
    }

    bg
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn solid(w: u32, h: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(color)))
    }

    #[test]
    fn tile_keeps_backdrop_dimensions() {
        let asset = solid(64, 64, [255, 0, 0, 255]);
        let backdrop = solid(512, 512, [10, 10, 10, 255]);
        let tile = render_tile(&asset, &backdrop, "Test", &Rarity::Common, false, None);
        assert_eq!((tile.width(), tile.height()), (512, 512));
    }

    #[test]
    fn standard_asset_covers_full_tile() {
        let asset = solid(64, 64, [255, 0, 0, 255]);
        let backdrop = solid(256, 256, [0, 0, 255, 255]);
        let tile = render_tile(&asset, &backdrop, "X", &Rarity::Rare, false, None);
        // 贴图铺满：左上角是贴图色而不是底板色。
        assert_eq!(tile.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn banner_asset_stays_inset() {
        let asset = solid(64, 64, [0, 255, 0, 255]);
        let backdrop = solid(512, 512, [7, 7, 7, 255]);
        let tile = render_tile(&asset, &backdrop, "X", &Rarity::Uncommon, true, None);
        // (32,12) 起 192×192 为贴图，角落仍是底板。
        assert_eq!(tile.get_pixel(0, 0).0, [7, 7, 7, 255]);
        assert_eq!(tile.get_pixel(100, 100).0, [0, 255, 0, 255]);
        assert_eq!(tile.get_pixel(300, 300).0, [7, 7, 7, 255]);
    }

    #[test]
    fn band_darkens_bottom_fifth() {
        let asset = solid(64, 64, [200, 200, 200, 255]);
        let backdrop = solid(500, 500, [200, 200, 200, 255]);
        let tile = render_tile(&asset, &backdrop, "X", &Rarity::Common, false, None);
        let above = tile.get_pixel(250, 399).0;
        let inside = tile.get_pixel(250, 450).0;
        assert_eq!(above, [200, 200, 200, 255]);
        // 200 * 0.3 = 60
        assert_eq!(inside, [60, 60, 60, 255]);
    }

    #[test]
    fn identical_inputs_give_identical_pixels() {
        let asset = solid(64, 64, [12, 34, 56, 255]);
        let backdrop = solid(300, 300, [1, 2, 3, 255]);
        let a = render_tile(&asset, &backdrop, "Same", &Rarity::Epic, false, None);
        let b = render_tile(&asset, &backdrop, "Same", &Rarity::Epic, false, None);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
