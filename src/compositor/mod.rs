//! # 测试图合成模块（compositor）
//!
//! ## 设计思路
//!
//! 模板图中挖出三个透明“占位孔”，本模块检测这些孔并分别填入圆形 Logo、
//! 徽标文字与两行标题文字，输出不透明的 RGB 图片。
//!
//! - `config`：路径与经验常量集中配置
//! - `regions`：透明区域连通域标记与角色分配
//! - `circle`：圆形遮罩 Logo 合成
//! - `resize`：缩放（`fast_image_resize`，失败回退 `image`）
//! - `font` / `builtin_font`：字体加载与降级
//! - `text`：居中文字块合成
//! - `pipeline`：统一编排
//!
//! ## 新同事快速上手
//!
//! ```text
//! pipeline::run
//!    ├─ loader（模板必须带 alpha）
//!    ├─ regions::detect_placeholders（只在原始模板上执行）
//!    ├─ circle::CircularLogo::composite
//!    ├─ text::TextBlock::composite（徽标）
//!    ├─ text::TextBlock::composite（标题）
//!    └─ loader::save_png（RGB）
//! ```

mod builtin_font;
mod circle;
mod config;
mod font;
mod pipeline;
mod regions;
mod resize;
mod text;

pub use circle::{CircularLogo, apply_mask, circle_mask};
pub use config::{
    CompositorConfig, DEFAULT_BADGE, DEFAULT_FONT_FAMILY, DEFAULT_SUBTITLE, DEFAULT_TITLE, LOGO_FILE, OUTPUT_FILE,
    TEMPLATE_FILE, TextLine,
};
pub use font::{FontSource, TextExtent, Typeface};
pub use pipeline::{CompositionReport, compose, run};
pub use regions::{
    Circle, Placeholders, REQUIRED_REGIONS, Region, detect_placeholders, label_transparent_regions,
};
pub use resize::resize_exact;
pub use text::{TextBlock, TextRun, layout_lines};
