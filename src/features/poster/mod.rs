//! 海报合成：字体、底板、瓦片与网格装配。

/// 底板皮肤与稀有度 → 底板文件
pub mod backdrop;
/// 字体加载与文字测量/绘制
pub mod fonts;
/// 网格铺排与页脚带
pub mod grid;
/// 像素合成原语
pub mod raster;
/// 单瓦片合成
pub mod tile;

pub use backdrop::BackdropSkin;
pub use grid::{FooterContext, GridGeometry, compose_grid, encode_png, grid_geometry};
pub use tile::render_tile;
