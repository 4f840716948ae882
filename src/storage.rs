//! 输出目录管理模块
//!
//! # 设计思路
//!
//! 统一决定 PBR 遮罩的输出目录：优先使用用户指定目录，
//! 未指定时回退到工作目录下的 `CombineTextures`。
//!
//! # 实现思路
//!
//! 这里只做路径解析，不创建目录。目录在打包成功、即将写盘时才由
//! `packer::write_output` 递归创建，失败的请求不会留下空目录。

use std::path::PathBuf;

/// 默认输出目录名。
pub const DEFAULT_SAVE_DIR: &str = "CombineTextures";

/// 解析输出目录。
///
/// # 参数
/// * `custom_dir` - 用户指定目录（可选，空路径视为未指定）
pub fn resolve_save_dir(custom_dir: Option<PathBuf>) -> PathBuf {
    match custom_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => PathBuf::from(DEFAULT_SAVE_DIR),
    }
}
