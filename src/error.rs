//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError` 枚举，命令行入口统一返回 `Result<T, AppError>`，
//! 替代分散的 `.map_err(|e| e.to_string())`、`expect()` 等不一致模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `PackError` 与 `serde_json::Error` 提供 `From` 转换，无需手动 map。
//! - `code()` 给出稳定错误码，供 `--json` 输出使用。

use crate::packer::PackError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 打包流水线错误（加载 / 解码 / 合并 / 写盘）
    #[error("{0}")]
    Pack(#[from] PackError),

    /// 设置文件不可用或内容非法
    #[error("设置文件错误: {0}")]
    Settings(String),

    /// 命令行参数组合非法
    #[error("参数错误: {0}")]
    Args(String),

    /// `--json` 报告序列化失败
    #[error("报告序列化失败: {0}")]
    Report(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pack(err) => err.code(),
            Self::Settings(_) => "settings",
            Self::Args(_) => "args",
            Self::Report(_) => "report",
        }
    }
}
