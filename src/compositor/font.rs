//! # 字体模块
//!
//! ## 设计思路
//!
//! 字体加载采用“能力检查 + 降级”的策略：先尝试加载指定的字体文件或系统字体族，
//! 不可用时记录警告并改用内置点阵字体，绝不因字体缺失而中断合成。
//!
//! 系统字体族按“指定名称 → 通用无衬线”顺序查找，默认查找 Helvetica。
//!
//! ## 实现思路
//!
//! - 轮廓字体由 `font-kit` 逐字形光栅化（灰度抗锯齿），按 advance 排列。
//! - 点阵字体按字号整数倍放大 5x8 字形。
//! - 两种字体都输出裁剪到笔画范围的灰度覆盖图，测量与绘制共用同一份结果，
//!   居中计算以可见笔画为准。

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use font_kit::canvas::{Canvas, Format, RasterizationOptions};
use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::hinting::HintingOptions;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use pathfinder_geometry::transform2d::Transform2F;

use super::builtin_font::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};

/// 首选字体来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// 字体文件路径（`.ttf` / `.otf` / `.ttc` 取第 0 个字体）。
    File(PathBuf),
    /// 系统字体族名称，找不到时退回通用无衬线字体。
    System(String),
    /// 内置点阵字体。
    Builtin,
}

/// 文字笔画范围（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

enum Face {
    Outline(Font),
    Bitmap { scale: u32 },
}

/// 指定字号的字体。
pub struct Typeface {
    face: Face,
    size: f32,
}

impl Typeface {
    /// 按来源加载字体，失败时降级为内置点阵字体。
    pub fn load(source: &FontSource, size: f32) -> Self {
        match source {
            FontSource::File(path) => match Font::from_path(path, 0) {
                Ok(font) => {
                    log::debug!("🔤 已加载字体 {}（{}px）", path.display(), size);
                    Self {
                        face: Face::Outline(font),
                        size,
                    }
                }
                Err(err) => {
                    log::warn!(
                        "⚠️ 无法加载字体 {}，改用内置字体：{}",
                        path.display(),
                        err
                    );
                    Self::builtin(size)
                }
            },
            FontSource::System(family) => match load_system_font(family) {
                Ok(font) => {
                    log::debug!(
                        "🔤 已加载系统字体 {}（{}，{}px）",
                        family,
                        font.full_name(),
                        size
                    );
                    Self {
                        face: Face::Outline(font),
                        size,
                    }
                }
                Err(reason) => {
                    log::warn!("⚠️ 无法加载系统字体 {}，改用内置字体：{}", family, reason);
                    Self::builtin(size)
                }
            },
            FontSource::Builtin => Self::builtin(size),
        }
    }

    /// 内置点阵字体，放大倍数取 `size / 8` 四舍五入且至少为 1。
    pub fn builtin(size: f32) -> Self {
        let scale = (size / GLYPH_HEIGHT as f32).round().max(1.0) as u32;
        Self {
            face: Face::Bitmap { scale },
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Bitmap { .. })
    }

    /// 光栅化为裁剪到笔画范围的覆盖图。空文本或纯空白返回 0x0。
    fn rasterize(&self, text: &str) -> GrayImage {
        let raw = match &self.face {
            Face::Outline(font) => rasterize_outline(font, self.size, text),
            Face::Bitmap { scale } => rasterize_bitmap(*scale, text),
        };
        crop_to_ink(&raw)
    }

    pub fn measure(&self, text: &str) -> TextExtent {
        let raster = self.rasterize(text);
        TextExtent {
            width: raster.width(),
            height: raster.height(),
        }
    }

    /// 以笔画左上角为 `(x, y)` 绘制文字，超出画布的部分被裁剪。
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
        draw_coverage(canvas, &self.rasterize(text), x, y, color);
    }
}

/// 按字体族查找系统字体。
///
/// fontconfig 以 dlopen 方式加载，库缺失时会在首次访问处 panic，这里统一转为错误。
fn load_system_font(family: &str) -> Result<Font, String> {
    let families = [FamilyName::Title(family.to_string()), FamilyName::SansSerif];

    let lookup = panic::catch_unwind(AssertUnwindSafe(|| {
        SystemSource::new()
            .select_best_match(&families, &Properties::new())
            .map_err(|e| format!("未找到字体族：{}", e))
            .and_then(|handle| {
                Font::from_handle(&handle).map_err(|e| format!("字体加载失败：{}", e))
            })
    }));

    lookup.unwrap_or_else(|_| Err("系统字体服务不可用".to_string()))
}

/// 以覆盖率为 alpha 把纯色混合到画布上。
fn draw_coverage(canvas: &mut RgbaImage, coverage: &GrayImage, x: i64, y: i64, color: Rgba<u8>) {
    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);

    for (gx, gy, value) in coverage.enumerate_pixels() {
        let cov = value.0[0];
        if cov == 0 {
            continue;
        }
        let (tx, ty) = (x + gx as i64, y + gy as i64);
        if tx < 0 || ty < 0 || tx >= canvas_w || ty >= canvas_h {
            continue;
        }

        let alpha = (cov as u16 * color.0[3] as u16 / u8::MAX as u16) as u8;
        let mut src = color;
        src.0[3] = alpha;
        canvas.get_pixel_mut(tx as u32, ty as u32).blend(&src);
    }
}

fn rasterize_bitmap(scale: u32, text: &str) -> GrayImage {
    let count = text.chars().count() as u32;
    if count == 0 {
        return GrayImage::new(0, 0);
    }

    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    let mut out = GrayImage::new(count * advance, GLYPH_HEIGHT * scale);

    for (i, c) in text.chars().enumerate() {
        let origin_x = i as u32 * advance;
        for gy in 0..GLYPH_HEIGHT {
            for gx in 0..GLYPH_WIDTH {
                if !builtin_font::is_set(c, gx, gy) {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        out.put_pixel(
                            origin_x + gx * scale + sx,
                            gy * scale + sy,
                            Luma([u8::MAX]),
                        );
                    }
                }
            }
        }
    }

    out
}

struct GlyphRaster {
    x: i32,
    y: i32,
    canvas: Canvas,
}

fn rasterize_outline(font: &Font, size: f32, text: &str) -> GrayImage {
    let units_per_em = font.metrics().units_per_em as f32;
    let scale = if units_per_em > 0.0 { size / units_per_em } else { 0.0 };
    let hinting = HintingOptions::None;
    let options = RasterizationOptions::GrayscaleAa;

    let mut pen_x = 0.0_f32;
    let mut glyphs = Vec::new();

    for c in text.chars() {
        let Some(glyph_id) = font.glyph_for_char(c).or_else(|| font.glyph_for_char('?')) else {
            log::debug!("字体缺少字形：{:?}", c);
            continue;
        };

        let bounds = font.raster_bounds(glyph_id, size, Transform2F::default(), hinting, options);
        if let Ok(rect) = bounds {
            if rect.width() > 0 && rect.height() > 0 {
                let mut canvas = Canvas::new(rect.size(), Format::A8);
                let placed = font.rasterize_glyph(
                    &mut canvas,
                    glyph_id,
                    size,
                    Transform2F::from_translation(-rect.origin().to_f32()),
                    hinting,
                    options,
                );
                match placed {
                    Ok(()) => glyphs.push(GlyphRaster {
                        x: pen_x.round() as i32 + rect.min_x(),
                        y: rect.min_y(),
                        canvas,
                    }),
                    Err(err) => log::debug!("字形光栅化失败 {:?}：{:?}", c, err),
                }
            }
        }

        match font.advance(glyph_id) {
            Ok(advance) => pen_x += advance.x() * scale,
            Err(err) => log::debug!("读取字形 advance 失败 {:?}：{:?}", c, err),
        }
    }

    if glyphs.is_empty() {
        return GrayImage::new(0, 0);
    }

    let min_x = glyphs.iter().map(|g| g.x).min().unwrap_or(0);
    let min_y = glyphs.iter().map(|g| g.y).min().unwrap_or(0);
    let max_x = glyphs.iter().map(|g| g.x + g.canvas.size.x()).max().unwrap_or(0);
    let max_y = glyphs.iter().map(|g| g.y + g.canvas.size.y()).max().unwrap_or(0);

    let mut out = GrayImage::new((max_x - min_x) as u32, (max_y - min_y) as u32);
    for glyph in &glyphs {
        let (w, h) = (glyph.canvas.size.x(), glyph.canvas.size.y());
        for gy in 0..h {
            for gx in 0..w {
                let value = glyph.canvas.pixels[gy as usize * glyph.canvas.stride + gx as usize];
                if value == 0 {
                    continue;
                }
                let ox = (glyph.x - min_x + gx) as u32;
                let oy = (glyph.y - min_y + gy) as u32;
                let existing = out.get_pixel(ox, oy).0[0];
                out.put_pixel(ox, oy, Luma([existing.max(value)]));
            }
        }
    }

    out
}

/// 裁剪到非零覆盖率的最小包围盒。
fn crop_to_ink(raster: &GrayImage) -> GrayImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, value) in raster.enumerate_pixels() {
        if value.0[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    match bounds {
        Some((x0, y0, x1, y1)) => {
            image::imageops::crop_imm(raster, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
        }
        None => GrayImage::new(0, 0),
    }
}
