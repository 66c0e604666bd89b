//! 像素级合成原语。

use image::{ImageBuffer, Rgba};

/// 将 `over` 以自身 alpha 混合进 `base` 的 (x, y) 处，越界部分丢弃。
pub fn overlay_alpha(
    base: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    over: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: u32,
    y: u32,
) {
    for oy in 0..over.height() {
        for ox in 0..over.width() {
            let p = over.get_pixel(ox, oy);
            let a = p.0[3] as f32 / 255.0;
            if a <= 0.0 {
                continue;
            }
            let bx = x + ox;
            let by = y + oy;
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            let dst = base.get_pixel_mut(bx, by);
            let inv = 1.0 - a;
            dst.0[0] = (p.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (p.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (p.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
            dst.0[3] = 255;
        }
    }
}

/// 以给定颜色与不透明度覆盖一个矩形区域（遮罩带用）。
pub fn blend_rect(
    base: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    color: [u8; 3],
    alpha: f32,
) {
    let a = alpha.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    let x1 = (x + w).min(base.width());
    let y1 = (y + h).min(base.height());
    for py in y..y1 {
        for px in x..x1 {
            let dst = base.get_pixel_mut(px, py);
            dst.0[0] = (color[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (color[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (color[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
            dst.0[3] = 255;
        }
    }
}
