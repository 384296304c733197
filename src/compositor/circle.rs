//! # 圆形 Logo 合成
//!
//! ## 设计思路
//!
//! Logo 缩放到 `2 * radius + margin` 的正方形（margin 为经验值，默认 7），
//! 与同尺寸的圆形遮罩逐像素相乘 alpha，再以圆心对齐的方式 alpha 混合到画布上。
//! 遮罩外的像素 alpha 为 0，画布对应位置保持原样。
//!
//! ## 实现思路
//!
//! - 遮罩为二值：像素中心落在内切圆内为 255，否则为 0。
//! - alpha 相乘后向下取整到 8 位。
//! - 放置偏移可能为负，由 `imageops::overlay` 负责裁剪。

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};

use super::regions::Circle;
use super::resize;

/// 生成 `size x size` 的圆形遮罩。
pub fn circle_mask(size: u32) -> GrayImage {
    let radius = size as f32 / 2.0;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy <= radius * radius {
            Luma([u8::MAX])
        } else {
            Luma([0])
        }
    })
}

/// 用遮罩缩放 Logo 自身的 alpha 通道。
pub fn apply_mask(logo: &mut RgbaImage, mask: &GrayImage) {
    for (pixel, coverage) in logo.pixels_mut().zip(mask.pixels()) {
        let alpha = pixel.0[3] as u16 * coverage.0[0] as u16 / u8::MAX as u16;
        pixel.0[3] = alpha as u8;
    }
}

/// 圆形 Logo 合成器。
#[derive(Debug, Clone, Copy)]
pub struct CircularLogo {
    pub margin: u32,
    pub filter: FilterType,
}

impl CircularLogo {
    /// 缩放后的 Logo 边长。
    pub fn logo_size(&self, circle: &Circle) -> u32 {
        circle.radius * 2 + self.margin
    }

    /// 生成带圆形 alpha 的 Logo。
    pub fn prepare(&self, logo: &RgbaImage, circle: &Circle) -> RgbaImage {
        let size = self.logo_size(circle);
        let mut resized = resize::resize_exact(logo, size, size, self.filter);
        apply_mask(&mut resized, &circle_mask(size));
        resized
    }

    /// 把圆形 Logo 合成到画布上，返回左上角放置坐标。
    pub fn composite(&self, canvas: &mut RgbaImage, logo: &RgbaImage, circle: &Circle) -> (i64, i64) {
        let masked = self.prepare(logo, circle);
        let half = (masked.width() / 2) as i64;
        let x = circle.center_x as i64 - half;
        let y = circle.center_y as i64 - half;

        log::info!(
            "🖼️ Logo 缩放为 {}x{}，以圆形遮罩放置于 ({}, {})",
            masked.width(),
            masked.height(),
            x,
            y
        );

        imageops::overlay(canvas, &masked, x, y);
        (x, y)
    }
}
