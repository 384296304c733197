//! # 像素编码器（PNG → LVGL C 数组）
//!
//! ## 设计思路
//!
//! 单次批处理：读取图片 → 逐像素转换为 RGB565 → 生成 `.c` / `.h` 文件对。
//! 输入缺失时在写出任何文件之前失败。
//!
//! ```text
//! loader::load_rgb（存在性检查 + 解码 + 丢弃 alpha）
//!    ↓
//! color::encode_rgb565（行优先，小端字节对）
//!    ↓
//! emitter::LvglImageAsset（渲染 + 落盘）
//! ```

mod color;
mod emitter;

use std::path::Path;

pub use color::{Rgb565, encode_rgb565};
pub use emitter::{EncoderOptions, LvglImageAsset};

use crate::error::AssetError;
use crate::loader;

/// 把图片编码为 LVGL 资源（不落盘）。
pub fn encode_image(input: &Path, options: &EncoderOptions) -> Result<LvglImageAsset, AssetError> {
    options.validate()?;

    let image = loader::load_rgb(input)?;
    let (width, height) = image.dimensions();
    log::info!(
        "🔄 正在转换 {}（{}x{}）为 LVGL C 格式...",
        input.display(),
        width,
        height
    );

    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    Ok(LvglImageAsset {
        symbol: options.symbol.clone(),
        source_name,
        width,
        height,
        data: encode_rgb565(&image),
    })
}

/// 完整转换：编码并写出 `.c` / `.h` 文件对。
pub fn convert_png_to_lvgl(
    input: &Path,
    source_path: &Path,
    header_path: &Path,
    options: &EncoderOptions,
) -> Result<LvglImageAsset, AssetError> {
    let asset = encode_image(input, options)?;
    asset.write_files(source_path, header_path, options)?;

    log::info!("✅ 转换完成 - 图片尺寸: {}x{}", asset.width, asset.height);
    Ok(asset)
}
