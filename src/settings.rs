//! 设置文件模块
//!
//! # 设计思路
//!
//! 允许把一次打包所需的输入、输出与资源上限写进 JSON 文件，
//! 方便批处理脚本复用；命令行参数优先于文件中的同名字段。
//!
//! # 实现思路
//!
//! - 所有字段可选，缺省时由命令行或内置默认值补齐。
//! - `deny_unknown_fields` 让拼写错误尽早暴露，而不是被静默忽略。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::packer::PackConfig;

/// 打包设置（对应 JSON 设置文件）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackSettings {
    /// 粗糙度 / 光滑度贴图路径。
    pub roughness: Option<PathBuf>,
    /// 金属度贴图路径。
    pub metallic: Option<PathBuf>,
    /// 显式指定是否为粗糙度贴图；缺省时按文件名推断。
    pub is_roughness: Option<bool>,
    pub save_dir: Option<PathBuf>,
    pub save_name: Option<String>,
    /// 要求两张输入宽高完全一致。
    pub strict_dimensions: Option<bool>,
    pub max_file_size: Option<u64>,
    pub max_decoded_pixels: Option<u64>,
    pub max_decoded_bytes: Option<u64>,
}

impl PackSettings {
    /// 将设置中的上限与尺寸策略写入打包配置。
    pub fn apply_to_config(&self, config: &mut PackConfig) {
        if let Some(max_file_size) = self.max_file_size {
            config.max_file_size = max_file_size;
        }
        if let Some(max_decoded_pixels) = self.max_decoded_pixels {
            config.max_decoded_pixels = max_decoded_pixels;
        }
        if let Some(max_decoded_bytes) = self.max_decoded_bytes {
            config.max_decoded_bytes = max_decoded_bytes;
        }
        if let Some(strict) = self.strict_dimensions {
            config.require_exact_dimensions = strict;
        }
    }
}

/// 从路径读取设置文件。文件必须存在且为合法 JSON。
pub fn load_settings_from_path(path: &Path) -> Result<PackSettings, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Settings(format!("读取设置文件 '{}' 失败: {}", path.display(), e)))?;

    let settings = serde_json::from_str::<PackSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件 '{}' 失败: {}", path.display(), e)))?;

    log::debug!("已加载设置文件: {}", path.display());
    Ok(settings)
}
