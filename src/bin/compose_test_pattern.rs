//! # compose-test-pattern — 生成自定义电视测试图
//!
//! 用法：`compose-test-pattern [LINE1 LINE2] [--root DIR] [--font PATH | --font-family NAME]`
//!
//! 不带文字参数时使用默认文字；只给一行文字时忽略并使用默认值。
//! 模板、Logo 与输出路径固定在项目根目录的 `assets/` 下。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use panel_assets::compositor::{self, CompositorConfig, DEFAULT_SUBTITLE, DEFAULT_TITLE, FontSource};

#[derive(Debug, Parser)]
#[command(
    name = "compose-test-pattern",
    version,
    about = "Fill the transparent placeholders of the TV test pattern template"
)]
struct Cli {
    /// 自定义的两行文字
    #[arg(num_args = 0..=2, value_name = "LINE")]
    lines: Vec<String>,
    /// 项目根目录（资源位于 `<root>/assets/`）
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// 首选字体文件，不可用时使用内置字体
    #[arg(long, conflicts_with = "font_family")]
    font: Option<PathBuf>,
    /// 按名称查找的系统字体族（默认 Helvetica）
    #[arg(long, value_name = "NAME")]
    font_family: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return panel_assets::cli::report_usage(&err),
    };

    panel_assets::init_logging();

    let mut config = CompositorConfig::with_root(&cli.root);
    if let Some(font) = cli.font {
        config = config.with_font(FontSource::File(font));
    } else if let Some(family) = cli.font_family {
        config = config.with_font(FontSource::System(family));
    }

    match cli.lines.as_slice() {
        [line1, line2] => {
            log::info!("使用自定义文字：");
            log::info!("  第一行: {}", line1);
            log::info!("  第二行: {}", line2);
            config = config.with_text(line1.as_str(), line2.as_str());
        }
        lines => {
            if lines.len() == 1 {
                log::warn!("⚠️ 需要两行文字，只提供了一行，改用默认文字");
            }
            log::info!("使用默认文字：");
            log::info!("  第一行: {}", DEFAULT_TITLE);
            log::info!("  第二行: {}", DEFAULT_SUBTITLE);
        }
    }

    match compositor::run(&config) {
        Ok(report) => {
            log::info!(
                "🎉 已生成 {}（{}x{}）",
                config.output_path.display(),
                report.width,
                report.height
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("❌ 合成失败：{}", err);
            ExitCode::from(1)
        }
    }
}
