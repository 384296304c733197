//! # 文字块合成
//!
//! ## 设计思路
//!
//! 在与目标区域同尺寸的纯色背景上绘制若干行文字：
//! 每行水平居中，行间距固定，整组文字在区域内垂直居中，
//! 然后把不透明的文字块整体覆盖到画布的区域左上角。
//!
//! 小方块徽标与大文字矩形共用同一套布局，只是行数不同。

use image::{Rgba, RgbaImage, imageops};

use super::font::{TextExtent, Typeface};
use super::regions::Region;

/// 计算每行文字笔画左上角在块内的坐标。
///
/// `x = width / 2 - line_width / 2`，整组高度 `sum(h) + gap * (n - 1)` 垂直居中。
pub fn layout_lines(extents: &[TextExtent], width: u32, height: u32, gap: u32) -> Vec<(i64, i64)> {
    if extents.is_empty() {
        return Vec::new();
    }

    let total_height: i64 = extents.iter().map(|e| e.height as i64).sum::<i64>()
        + gap as i64 * (extents.len() as i64 - 1);

    let center_x = (width / 2) as i64;
    let mut y = (height / 2) as i64 - total_height / 2;

    extents
        .iter()
        .map(|extent| {
            let x = center_x - (extent.width / 2) as i64;
            let position = (x, y);
            y += extent.height as i64 + gap as i64;
            position
        })
        .collect()
}

/// 一行待绘制的文字。
pub struct TextRun<'a> {
    pub face: &'a Typeface,
    pub text: &'a str,
}

/// 文字块：背景色 + 多行居中文字。
pub struct TextBlock<'a> {
    pub runs: Vec<TextRun<'a>>,
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub line_gap: u32,
}

impl TextBlock<'_> {
    /// 渲染为 `width x height` 的独立图像。
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        let mut block = RgbaImage::from_pixel(width, height, self.background);

        let extents: Vec<_> = self.runs.iter().map(|run| run.face.measure(run.text)).collect();

        let positions = layout_lines(&extents, width, height, self.line_gap);
        for (run, (x, y)) in self.runs.iter().zip(positions) {
            log::debug!("✏️ 绘制文字 {:?} 于块内 ({}, {})", run.text, x, y);
            run.face.draw(&mut block, x, y, run.text, self.foreground);
        }

        block
    }

    /// 渲染后整体覆盖到区域左上角，区域外像素不受影响。
    pub fn composite(&self, canvas: &mut RgbaImage, region: &Region) {
        let block = self.render(region.width(), region.height());
        imageops::replace(canvas, &block, region.min_x as i64, region.min_y as i64);

        log::info!(
            "🔲 文字块 {}x{} 已放置于 ({}, {})",
            region.width(),
            region.height(),
            region.min_x,
            region.min_y
        );
    }
}
