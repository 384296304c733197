//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 两个工具共用一个 `AssetError` 枚举，按错误来源分支：
//! 输入缺失、解码失败、输入格式不符合约定（无 alpha、占位区域数量不足）、
//! 输出渲染失败以及底层 I/O 错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 占位区域数量不足单独建模为结构化分支，调用侧可按字段匹配。
//! - 字体缺失不是错误，由字体模块降级处理，这里不建模。

/// 资源生成链路的统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// 输入文件不存在或无法读取
    #[error("文件错误：{0}")]
    FileSystem(String),

    /// 图片解码失败
    #[error("解码错误：{0}")]
    Decode(String),

    /// 输入内容不满足约定
    #[error("格式错误：{0}")]
    InvalidFormat(String),

    /// 模板中的透明占位区域数量不足
    #[error("占位区域不足：需要 {expected} 个透明区域，实际找到 {found} 个")]
    RegionCount { expected: usize, found: usize },

    /// 输出内容生成或编码失败
    #[error("编码错误：{0}")]
    Encode(String),

    /// 文件系统 I/O 错误
    #[error("I/O 错误：{0}")]
    Io(#[from] std::io::Error),
}

impl From<AssetError> for String {
    fn from(error: AssetError) -> Self {
        error.to_string()
    }
}

impl From<std::fmt::Error> for AssetError {
    fn from(error: std::fmt::Error) -> Self {
        AssetError::Encode(format!("文本输出失败：{}", error))
    }
}
