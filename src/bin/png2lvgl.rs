//! # png2lvgl — PNG 转 LVGL C 数组
//!
//! 用法：`png2lvgl <input.png> <output.c> <output.h> [--symbol NAME]`
//!
//! 参数错误或输入文件不存在时退出码为 1，且不会写出任何文件。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use panel_assets::encoder::{self, EncoderOptions};

#[derive(Debug, Parser)]
#[command(name = "png2lvgl", version, about = "Convert a PNG image to an LVGL RGB565 C array")]
struct Cli {
    /// 输入图片
    input: PathBuf,
    /// 输出 `.c` 定义文件
    output_c: PathBuf,
    /// 输出 `.h` 声明文件
    output_h: PathBuf,
    /// 描述符符号名
    #[arg(long, default_value = "splash_logo")]
    symbol: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return panel_assets::cli::report_usage(&err),
    };

    panel_assets::init_logging();

    if !cli.input.exists() {
        log::error!("输入文件不存在：{}", cli.input.display());
        return ExitCode::from(1);
    }

    let options = EncoderOptions {
        symbol: cli.symbol,
        ..EncoderOptions::default()
    };

    match encoder::convert_png_to_lvgl(&cli.input, &cli.output_c, &cli.output_h, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 转换失败：{}", err);
            ExitCode::from(1)
        }
    }
}
