//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `PackConfig`，保证运行时行为可观测、可调整、可测试。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置。
//! - `validate` 在构建 `ChannelPacker` 时执行，拒绝无意义的上限。
//! - `require_exact_dimensions` 默认关闭：仅比较像素总数（宽 × 高），
//!   与原工具行为一致；开启后要求宽、高分别相等。

use super::PackError;

/// f32 RGBA 可读副本每像素占用字节数。
pub(crate) const DECODED_BYTES_PER_PIXEL: u64 = 16;

/// 打包配置。
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 f32 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 是否要求两张输入宽、高完全一致（而非仅面积一致）。
    pub require_exact_dimensions: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 64_000_000,
            max_decoded_bytes: 1024 * 1024 * 1024,
            require_exact_dimensions: false,
        }
    }
}

impl PackConfig {
    /// 校验配置取值。
    ///
    /// # 示例
    /// ```rust
    /// use texture_combine::packer::PackConfig;
    ///
    /// let mut config = PackConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.max_file_size = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PackError> {
        if self.max_file_size == 0 {
            return Err(PackError::InvalidRequest("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(PackError::InvalidRequest("max_decoded_pixels 必须大于 0".to_string()));
        }
        if self.max_decoded_bytes < DECODED_BYTES_PER_PIXEL {
            return Err(PackError::InvalidRequest(format!(
                "max_decoded_bytes 不能小于 {} 字节",
                DECODED_BYTES_PER_PIXEL
            )));
        }
        Ok(())
    }
}
