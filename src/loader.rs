//! # 图片加载与保存模块
//!
//! ## 设计思路
//!
//! 两个工具都从本地文件读取图片，这里集中做存在性检查、格式探测与解码，
//! 保证“输入缺失”在写出任何产物之前就被拒绝。
//!
//! ## 实现思路
//!
//! 1. 先检查路径存在，再读取字节并探测格式
//! 2. 解码为 `DynamicImage`，记录原始色彩类型
//! 3. 按调用方需要转换为 RGB8 或 RGBA8

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage, RgbaImage};

use crate::error::AssetError;

/// 读取并解码本地图片文件。
pub fn load_image(path: &Path) -> Result<DynamicImage, AssetError> {
    log::debug!("📁 开始读取本地图片 - 路径: {}", path.display());

    if !path.exists() {
        return Err(AssetError::FileSystem(format!(
            "文件不存在：{}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| AssetError::FileSystem(format!("无法读取图片文件：{}", e)))?;

    let reader = image::ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| AssetError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

    if reader.format().is_none() {
        return Err(AssetError::InvalidFormat(format!(
            "不支持的图片格式：{}",
            path.display()
        )));
    }

    let decoded = reader
        .decode()
        .map_err(|e| AssetError::Decode(format!("图片解码失败：{}", e)))?;

    let (width, height) = decoded.dimensions();
    log::debug!(
        "✅ 本地图片读取成功 - 尺寸: {}x{} 色彩: {:?}",
        width,
        height,
        decoded.color()
    );

    Ok(decoded)
}

/// 读取图片并转换为 RGB8，alpha 通道直接丢弃。
pub fn load_rgb(path: &Path) -> Result<RgbImage, AssetError> {
    Ok(load_image(path)?.to_rgb8())
}

/// 读取图片并转换为 RGBA8，无 alpha 的图片补为全不透明。
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    Ok(load_image(path)?.to_rgba8())
}

/// 读取必须自带 alpha 通道的图片。
///
/// 模板图依赖 alpha 标记占位区域，没有 alpha 时直接报格式错误。
pub fn load_rgba_with_alpha(path: &Path) -> Result<RgbaImage, AssetError> {
    let decoded = load_image(path)?;

    if !decoded.color().has_alpha() {
        return Err(AssetError::InvalidFormat(format!(
            "图片缺少 alpha 通道（RGBA）：{}",
            path.display()
        )));
    }

    Ok(decoded.to_rgba8())
}

/// 将 RGB 图片保存为 PNG。
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), AssetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(AssetError::FileSystem(format!(
                "输出目录不存在：{}",
                parent.display()
            )));
        }
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| AssetError::Encode(format!("PNG 写出失败：{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn missing_file_is_reported_as_filesystem_error() {
        let result = load_image(Path::new("/definitely/not/here.png"));

        assert!(matches!(result, Err(AssetError::FileSystem(_))));
    }

    #[test]
    fn non_image_payload_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"<html>not an image</html>").expect("write failed");

        let result = load_image(&path);

        assert!(matches!(
            result,
            Err(AssetError::InvalidFormat(_)) | Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn rgb_input_is_rejected_where_alpha_is_required() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("opaque.png");
        RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
            .save(&path)
            .expect("save failed");

        assert!(matches!(
            load_rgba_with_alpha(&path),
            Err(AssetError::InvalidFormat(_))
        ));
        assert_eq!(load_rgba(&path).expect("load failed").get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn load_rgb_drops_alpha() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]))
            .save(&path)
            .expect("save failed");

        let rgb = load_rgb(&path).expect("load failed");

        assert_eq!(rgb.get_pixel(1, 1), &Rgb([200, 100, 50]));
    }
}
