//! # 缩放模块
//!
//! 优先使用 `fast_image_resize` 做卷积缩放；构建缓冲或执行失败时回退到
//! `image::imageops::resize`，保证缩放本身不会成为失败来源。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::AssetError;

/// 把 RGBA 图片精确缩放到 `width x height`。
pub fn resize_exact(
    image: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    match resize_with_fast_image_resize(image, width, height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                err
            );
            image::imageops::resize(image, width, height, filter)
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, AssetError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| AssetError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| AssetError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| AssetError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_produces_requested_dimensions() {
        let image = RgbaImage::from_pixel(40, 40, Rgba([10, 200, 30, 255]));

        let resized = resize_exact(&image, 17, 17, FilterType::Lanczos3);

        assert_eq!(resized.dimensions(), (17, 17));
    }

    #[test]
    fn uniform_color_survives_resize() {
        let image = RgbaImage::from_pixel(32, 32, Rgba([100, 150, 200, 255]));

        let resized = resize_exact(&image, 64, 64, FilterType::Lanczos3);

        for pixel in resized.pixels() {
            for (got, want) in pixel.0.iter().zip([100u8, 150, 200, 255]) {
                assert!((*got as i16 - want as i16).abs() <= 1);
            }
        }
    }
}
