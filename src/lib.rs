//! # 显示屏固件资源生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  bin/png2lvgl              bin/compose-test-pattern       │
//! │  （参数适配 + 退出码）      （参数适配 + 退出码）         │
//! └───────┬───────────────────────────┬──────────────────────┘
//!         ↓                           ↓
//! ┌───────┼───────────────────────────┼──────────────────────┐
//! │  ├─ encoder ──── RGB565 + LVGL .c/.h                      │
//! │  ├─ compositor ─ 占位区域检测 + Logo/文字合成             │
//! │  ├─ loader ───── 存在性检查 · 解码 · PNG 写出             │
//! │  └─ error ────── AssetError（统一错误类型）               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AssetError` |
//! | [`cli`] | 两个命令行工具共用的用法错误退出码 |
//! | [`loader`] | 图片读取、alpha 校验与保存 |
//! | [`encoder`] | PNG 转 RGB565 字节数组与 `lv_img_dsc_t` 描述符 |
//! | [`compositor`] | 透明占位区域检测，圆形 Logo 与文字块合成 |
//!
//! 两个工具互不依赖，都是单线程一次性批处理：读入、计算、写出。

pub mod cli;
pub mod compositor;
pub mod encoder;
pub mod error;
pub mod loader;

pub use error::AssetError;

/// 两个命令行工具共用的日志初始化，默认级别 `info`，可用 `RUST_LOG` 覆盖。
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
