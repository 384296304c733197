//! # LVGL C 源文件生成模块
//!
//! ## 设计思路
//!
//! 产物是一对 `.c` / `.h` 文件：`.c` 中是像素字节数组与 `lv_img_dsc_t` 描述符，
//! `.h` 中是带 include guard 的 `extern` 声明。描述符字段顺序与取值
//! （`LV_IMG_CF_TRUE_COLOR`、`always_zero = 0`、`reserved = 0`）是 LVGL 的外部接口，
//! 必须逐字保持。
//!
//! ## 实现思路
//!
//! - 先在内存中渲染两份文本，全部成功后再落盘，避免只写出一半产物。
//! - 落盘经由同目录临时文件 + 重命名，头文件写入失败时回收已就位的 `.c`。
//! - 渲染基于 `std::fmt::Write`，测试无需接触文件系统。

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::AssetError;

/// 生成选项。
#[derive(Debug, Clone)]
pub struct EncoderOptions {
    /// 描述符的 C 符号名，数组名为 `<symbol>_data`。
    pub symbol: String,
    /// 每行输出的像素数（每像素两个字节）。
    pub pixels_per_line: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            symbol: "splash_logo".to_string(),
            pixels_per_line: 12,
        }
    }
}

impl EncoderOptions {
    /// 校验符号名是合法的 C 标识符。
    pub fn validate(&self) -> Result<(), AssetError> {
        if !is_c_identifier(&self.symbol) {
            return Err(AssetError::InvalidFormat(format!(
                "符号名不是合法的 C 标识符：{:?}",
                self.symbol
            )));
        }
        if self.pixels_per_line == 0 {
            return Err(AssetError::InvalidFormat(
                "每行像素数必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 已编码的图片资源，对应一个 `lv_img_dsc_t`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LvglImageAsset {
    pub symbol: String,
    /// 来源文件名，仅用于注释。
    pub source_name: String,
    pub width: u32,
    pub height: u32,
    /// RGB565 小端字节流。
    pub data: Vec<u8>,
}

impl LvglImageAsset {
    /// 描述符中的 `data_size`，恒等于 `2 * width * height`。
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    fn banner_title(&self) -> String {
        self.symbol
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn include_guard(&self) -> String {
        format!("{}_H", self.symbol.to_ascii_uppercase())
    }

    fn write_banner(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "/**")?;
        writeln!(out, " * {} - Compiled Image Data", self.banner_title())?;
        writeln!(out, " *")?;
        writeln!(out, " * Auto-generated from {}", self.source_name)?;
        writeln!(
            out,
            " * Format: RGB565, {}x{} pixels",
            self.width, self.height
        )?;
        writeln!(out, " */")?;
        writeln!(out)
    }

    /// 渲染 `.c` 定义文件。
    pub fn render_source(&self, options: &EncoderOptions) -> Result<String, AssetError> {
        let expected = self.width as usize * self.height as usize * 2;
        if self.data.len() != expected {
            return Err(AssetError::Encode(format!(
                "像素数据长度异常：{} 字节（预期 {} 字节）",
                self.data.len(),
                expected
            )));
        }

        let mut out = String::with_capacity(self.data.len() * 6 + 512);
        self.write_banner(&mut out)?;
        writeln!(out, "#include \"lvgl.h\"")?;
        writeln!(out)?;

        writeln!(out, "static const uint8_t {}_data[] = {{", self.symbol)?;
        let row_bytes = self.width as usize * 2;
        if row_bytes > 0 {
            for row in self.data.chunks(row_bytes) {
                for line in row.chunks(options.pixels_per_line * 2) {
                    let values = line
                        .iter()
                        .map(|byte| format!("0x{:02X}", byte))
                        .collect::<Vec<_>>()
                        .join(", ");
                    writeln!(out, "  {},", values)?;
                }
            }
        }
        writeln!(out, "}};")?;
        writeln!(out)?;

        writeln!(out, "const lv_img_dsc_t {} = {{", self.symbol)?;
        writeln!(out, "  .header = {{")?;
        writeln!(out, "    .cf = LV_IMG_CF_TRUE_COLOR,")?;
        writeln!(out, "    .always_zero = 0,")?;
        writeln!(out, "    .reserved = 0,")?;
        writeln!(out, "    .w = {},", self.width)?;
        writeln!(out, "    .h = {},", self.height)?;
        writeln!(out, "  }},")?;
        writeln!(out, "  .data_size = {},", self.data_size())?;
        writeln!(out, "  .data = {}_data,", self.symbol)?;
        writeln!(out, "}};")?;

        Ok(out)
    }

    /// 渲染 `.h` 声明文件。
    pub fn render_header(&self) -> Result<String, AssetError> {
        let guard = self.include_guard();
        let mut out = String::new();
        self.write_banner(&mut out)?;
        writeln!(out, "#ifndef {}", guard)?;
        writeln!(out, "#define {}", guard)?;
        writeln!(out)?;
        writeln!(out, "#include \"lvgl.h\"")?;
        writeln!(out)?;
        writeln!(out, "extern const lv_img_dsc_t {};", self.symbol)?;
        writeln!(out)?;
        writeln!(out, "#endif // {}", guard)?;
        Ok(out)
    }

    /// 渲染并写出 `.c` / `.h` 文件对。
    ///
    /// 两份内容先写入目标目录下的临时文件，再依次重命名到位；
    /// 任一步失败都不会留下单独的 `.c` 或 `.h`。
    pub fn write_files(
        &self,
        source_path: &Path,
        header_path: &Path,
        options: &EncoderOptions,
    ) -> Result<(), AssetError> {
        let source = self.render_source(options)?;
        let header = self.render_header()?;

        let staged_source = stage(source_path, &source)?;
        let staged_header = stage(header_path, &header)?;

        staged_source
            .persist(source_path)
            .map_err(|e| AssetError::Io(e.error))?;

        if let Err(e) = staged_header.persist(header_path) {
            if let Err(cleanup) = std::fs::remove_file(source_path) {
                log::warn!("⚠️ 无法清理 {}：{}", source_path.display(), cleanup);
            }
            return Err(AssetError::Io(e.error));
        }

        log::info!(
            "📝 已生成 {}（{} 字节）",
            source_path.display(),
            self.data_size()
        );
        log::info!("📝 已生成 {}", header_path.display());

        Ok(())
    }
}

/// 在目标文件所在目录创建临时文件并写入内容，保证之后的重命名不跨文件系统。
fn stage(target: &Path, contents: &str) -> Result<NamedTempFile, AssetError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| {
        AssetError::FileSystem(format!("无法写入 {}：{}", target.display(), e))
    })?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
