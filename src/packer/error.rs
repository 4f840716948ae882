//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载打包链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! “两张输入都为空”不是错误，由上层以 `Ok(None)` 表示。

/// 打包链路统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// 两张输入像素总数（宽 × 高）不一致。
    #[error("纹理大小不一致：{a_width}x{a_height} 与 {b_width}x{b_height}")]
    SizeMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },

    #[error("请求无效：{0}")]
    InvalidRequest(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl PackError {
    /// 稳定的错误码，供 JSON 报告与脚本判断使用。
    pub fn code(&self) -> &'static str {
        match self {
            Self::SizeMismatch { .. } => "size_mismatch",
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::FileSystem(_) => "file_system",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }
}
