//! # 配置模块
//!
//! ## 设计思路
//!
//! 将模板路径、Logo 路径、输出路径以及所有经验常量集中到 `CompositorConfig`，
//! 由调用方显式传入流水线，测试可以指向任意夹具文件。
//!
//! ## 实现思路
//!
//! - `Default` 以当前目录为项目根目录，资源位于 `assets/` 下的固定文件名。
//! - `with_root` 只替换根目录，文件名保持固定。
//! - 默认字体按名称查找系统的 Helvetica，找不到时逐级降级。

use std::path::{Path, PathBuf};

use image::Rgba;
use image::imageops::FilterType;

use super::font::FontSource;

pub const TEMPLATE_FILE: &str = "tv-test-patterns-template.png";
pub const LOGO_FILE: &str = "splash_logo.png";
pub const OUTPUT_FILE: &str = "tv-test-pattern-custom.png";

pub const DEFAULT_TITLE: &str = "ANCHOR DRAG PRO";
pub const DEFAULT_SUBTITLE: &str = "Display Self-Test Pattern";
pub const DEFAULT_BADGE: &str = "ADA";
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// 一行文字及其字号。
#[derive(Debug, Clone)]
pub struct TextLine {
    pub text: String,
    /// 字号（像素）。
    pub size: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// 测试图合成配置。
#[derive(Debug, Clone)]
pub struct CompositorConfig {
    /// 带透明占位区域的模板图。
    pub template_path: PathBuf,
    /// 填入圆形区域的 Logo。
    pub logo_path: PathBuf,
    /// 合成结果输出路径（PNG，RGB）。
    pub output_path: PathBuf,
    /// 大矩形中的两行文字。
    pub title: TextLine,
    pub subtitle: TextLine,
    /// 小方块中的文字。
    pub badge: TextLine,
    /// 首选字体，不可用时降级为内置点阵字体。
    pub font: FontSource,
    /// Logo 边长在圆直径之外额外放大的像素数。
    pub logo_margin: u32,
    /// Logo 缩放滤镜。
    pub resize_filter: FilterType,
    /// 文字块背景色。
    pub background: Rgba<u8>,
    /// 文字颜色。
    pub foreground: Rgba<u8>,
    /// 多行文字之间的垂直间距（像素）。
    pub line_gap: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self::with_root(Path::new("."))
    }
}

impl CompositorConfig {
    /// 以 `root` 为项目根目录构建配置，资源固定位于 `root/assets/`。
    pub fn with_root(root: &Path) -> Self {
        let assets = root.join("assets");
        Self {
            template_path: assets.join(TEMPLATE_FILE),
            logo_path: assets.join(LOGO_FILE),
            output_path: assets.join(OUTPUT_FILE),
            title: TextLine::new(DEFAULT_TITLE, 28.0),
            subtitle: TextLine::new(DEFAULT_SUBTITLE, 18.0),
            badge: TextLine::new(DEFAULT_BADGE, 20.0),
            font: FontSource::System(DEFAULT_FONT_FAMILY.to_string()),
            logo_margin: 7,
            resize_filter: FilterType::Lanczos3,
            background: Rgba([128, 128, 128, 255]),
            foreground: Rgba([255, 255, 255, 255]),
            line_gap: 8,
        }
    }

    /// 替换大矩形中的两行文字，字号保持不变。
    pub fn with_text(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title.text = title.into();
        self.subtitle.text = subtitle.into();
        self
    }

    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }
}
