//! # 合成流水线编排
//!
//! ## 设计思路
//!
//! 处理链路顺序固定：
//! 1. 加载模板与 Logo
//! 2. 在未改动的模板上检测全部三个占位区域（检测依赖原始 alpha，必须先于任何绘制）
//! 3. 圆形 Logo
//! 4. 小方块徽标
//! 5. 大矩形文字块
//! 6. 去掉 alpha 转为 RGB 并保存
//!
//! 3–5 的区域互不重叠，顺序只为结果可复现。任何一步失败都不会写出产物。

use std::time::Instant;

use image::{DynamicImage, RgbImage, RgbaImage};

use super::circle::CircularLogo;
use super::config::CompositorConfig;
use super::font::Typeface;
use super::regions::{self, Placeholders};
use super::text::{TextBlock, TextRun};
use crate::error::AssetError;
use crate::loader;

/// 一次合成的结果摘要。
#[derive(Debug, Clone)]
pub struct CompositionReport {
    pub width: u32,
    pub height: u32,
    pub placeholders: Placeholders,
    /// Logo 左上角放置坐标（可能为负）。
    pub logo_origin: (i64, i64),
    pub logo_size: u32,
}

/// 在内存中完成合成，返回 RGB 结果与摘要。
pub fn compose(
    template: &RgbaImage,
    logo: &RgbaImage,
    config: &CompositorConfig,
) -> Result<(RgbImage, CompositionReport), AssetError> {
    log::info!("🔍 正在检测透明占位区域...");
    let placeholders = regions::detect_placeholders(template)?;

    let circle = placeholders.logo_circle.circle();
    log_region("圆形区域", &placeholders.logo_circle);
    log_region("小方块", &placeholders.badge);
    log_region("大矩形", &placeholders.text_block);
    log::info!(
        "  圆心: ({}, {})，半径: {}",
        circle.center_x,
        circle.center_y,
        circle.radius
    );

    let mut canvas = template.clone();

    let logo_compositor = CircularLogo {
        margin: config.logo_margin,
        filter: config.resize_filter,
    };
    let logo_origin = logo_compositor.composite(&mut canvas, logo, &circle);

    let badge_face = Typeface::load(&config.font, config.badge.size);
    TextBlock {
        runs: vec![TextRun {
            face: &badge_face,
            text: &config.badge.text,
        }],
        background: config.background,
        foreground: config.foreground,
        line_gap: config.line_gap,
    }
    .composite(&mut canvas, &placeholders.badge);

    let title_face = Typeface::load(&config.font, config.title.size);
    let subtitle_face = Typeface::load(&config.font, config.subtitle.size);
    TextBlock {
        runs: vec![
            TextRun {
                face: &title_face,
                text: &config.title.text,
            },
            TextRun {
                face: &subtitle_face,
                text: &config.subtitle.text,
            },
        ],
        background: config.background,
        foreground: config.foreground,
        line_gap: config.line_gap,
    }
    .composite(&mut canvas, &placeholders.text_block);

    let (width, height) = canvas.dimensions();
    let flattened = DynamicImage::ImageRgba8(canvas).to_rgb8();

    Ok((
        flattened,
        CompositionReport {
            width,
            height,
            placeholders,
            logo_origin,
            logo_size: logo_compositor.logo_size(&circle),
        },
    ))
}

/// 完整流程：读取配置中的文件，合成并写出 PNG。
pub fn run(config: &CompositorConfig) -> Result<CompositionReport, AssetError> {
    let started = Instant::now();

    log::info!("📁 正在加载模板 {}", config.template_path.display());
    let template = loader::load_rgba_with_alpha(&config.template_path)?;
    log::info!("  模板尺寸: {}x{}", template.width(), template.height());

    log::info!("📁 正在加载 Logo {}", config.logo_path.display());
    let logo = loader::load_rgba(&config.logo_path)?;
    log::info!("  Logo 原始尺寸: {}x{}", logo.width(), logo.height());

    let (output, report) = compose(&template, &logo, config)?;

    log::info!("💾 正在保存到 {}", config.output_path.display());
    loader::save_png(&output, &config.output_path)?;

    log::info!(
        "✅ 合成完成 - 文字: {:?} / {:?}，耗时 {} ms",
        config.title.text,
        config.subtitle.text,
        started.elapsed().as_millis()
    );

    Ok(report)
}

fn log_region(label: &str, region: &regions::Region) {
    log::info!(
        "  {}: ({}, {}) - ({}, {})",
        label,
        region.min_x,
        region.min_y,
        region.max_x,
        region.max_y
    );
}
