//! # 文件加载模块
//!
//! ## 设计思路
//!
//! 在解码前尽早拒绝明显不可用的输入（不存在、不是文件、体积超限），
//! 但不把“能否识别文件签名”当作硬性门槛：TGA 等游戏贴图常用格式没有魔数，
//! 只能依靠扩展名确定格式。
//!
//! ## 格式确定顺序
//!
//! 1. `image::guess_format` 按内容识别
//! 2. `infer` 识别出明确的非图片签名（压缩包、文档等）时直接拒绝
//! 3. 按扩展名确定格式（`ImageFormat::from_path`）

use image::ImageFormat;
use std::path::Path;

use super::source::RawImageData;
use super::{ChannelPacker, PackConfig, PackError};

impl ChannelPacker {
    /// 从本地路径加载图片原始字节并确定解码格式。
    pub(super) fn load_from_file(
        &self,
        path: &Path,
        config: &PackConfig,
    ) -> Result<RawImageData, PackError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(PackError::FileSystem(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| PackError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(PackError::FileSystem(format!("不是普通文件：{}", path.display())));
        }

        if metadata.len() > config.max_file_size {
            return Err(PackError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| PackError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        let format = Self::detect_format(path, &bytes)?;
        log::debug!("图片格式: {} -> {:?}", path.display(), format);

        Ok(RawImageData {
            bytes,
            format,
            path: path.to_path_buf(),
        })
    }

    fn detect_format(path: &Path, bytes: &[u8]) -> Result<ImageFormat, PackError> {
        if bytes.is_empty() {
            return Err(PackError::InvalidFormat(format!(
                "图片内容为空：{}",
                path.display()
            )));
        }

        if let Ok(format) = image::guess_format(bytes) {
            return Ok(format);
        }

        if let Some(kind) =
            infer::get(bytes).filter(|kind| kind.matcher_type() != infer::MatcherType::Image)
        {
            return Err(PackError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        ImageFormat::from_path(path).map_err(|_| {
            PackError::InvalidFormat(format!("无法识别图片格式：{}", path.display()))
        })
    }
}
