//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“来源 → 尺寸 → 可读副本”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先读取头信息做尺寸与面积检查，再进行完整解码，
//! 使尺寸不一致的请求在分配大块内存之前就失败。
//!
//! ## 实现思路
//!
//! 1. 按来源加载原始字节，用已确定的格式读取 header 尺寸（`stage`）
//! 2. 按像素 / 内存上限快速拒绝
//! 3. 两张输入都存在时比较像素总数（`check_dimensions`）
//! 4. 完整解码为 f32 RGBA 稠密缓冲（`into_readable`）
//!
//! 任意编码（8 / 16 位、灰度、调色板、压缩格式）都先完整解码再采样，
//! 不直接读取编码后的像素。

use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

use super::config::DECODED_BYTES_PER_PIXEL;
use super::source::{RawImageData, StagedImage};
use super::{ChannelPacker, Image, ImageSource, PackConfig, PackError};

impl ChannelPacker {
    /// 加载来源并读取尺寸，不做完整解码。
    pub(super) fn stage(
        &self,
        source: ImageSource,
        config: &PackConfig,
    ) -> Result<StagedImage, PackError> {
        let staged = match source {
            ImageSource::FilePath(path) => {
                let raw = self.load_from_file(&path, config)?;
                Self::stage_encoded(raw)?
            }
            ImageSource::Decoded(image) => StagedImage::Decoded(image),
        };

        let (width, height) = staged.dimensions();
        Self::validate_pixel_limits(config, width, height)?;
        Self::validate_decoded_memory_limits(config, width, height)?;

        Ok(staged)
    }

    fn stage_encoded(raw: RawImageData) -> Result<StagedImage, PackError> {
        let (width, height) = Self::inspect_dimensions(&raw)?;
        if width == 0 || height == 0 {
            return Err(PackError::InvalidFormat(format!(
                "图片尺寸无效：{}x{}",
                width, height
            )));
        }
        Ok(StagedImage::Encoded { raw, width, height })
    }

    /// 两张输入都存在时校验尺寸。
    ///
    /// 默认仅比较像素总数（宽 × 高），`require_exact_dimensions` 开启后要求宽高分别相等。
    pub(super) fn check_dimensions(
        a: &StagedImage,
        b: &StagedImage,
        config: &PackConfig,
    ) -> Result<(), PackError> {
        let (a_width, a_height) = a.dimensions();
        let (b_width, b_height) = b.dimensions();

        let mismatch = if config.require_exact_dimensions {
            (a_width, a_height) != (b_width, b_height)
        } else {
            a.pixel_count() != b.pixel_count()
        };

        if mismatch {
            return Err(PackError::SizeMismatch {
                a_width,
                a_height,
                b_width,
                b_height,
            });
        }

        if (a_width, a_height) != (b_width, b_height) {
            log::warn!(
                "⚠️ 两张贴图面积一致但形状不同：{}x{} 与 {}x{}，将按行优先线性下标对齐",
                a_width,
                a_height,
                b_width,
                b_height
            );
        }

        Ok(())
    }

    /// 完整解码为可逐像素读取的副本。
    pub(super) fn into_readable(staged: StagedImage) -> Result<Image, PackError> {
        match staged {
            StagedImage::Decoded(image) => Ok(image),
            StagedImage::Encoded {
                raw,
                width: header_width,
                height: header_height,
            } => {
                let decoded = image::load_from_memory_with_format(&raw.bytes, raw.format)
                    .map_err(|e| {
                        PackError::Decode(format!("图片解码失败 '{}'：{}", raw.path.display(), e))
                    })?;

                let (width, height) = decoded.dimensions();
                if (width, height) != (header_width, header_height) {
                    return Err(PackError::Decode(format!(
                        "解码尺寸 {}x{} 与头信息 {}x{} 不一致",
                        width, height, header_width, header_height
                    )));
                }

                let image = Self::dynamic_to_image(&decoded)?;

                log::info!(
                    "✅ 图片解码成功 - 来源: {} 格式: {:?} 尺寸: {}x{} 色彩: {:?}",
                    raw.path.display(),
                    raw.format,
                    width,
                    height,
                    decoded.color()
                );

                Ok(image)
            }
        }
    }

    /// 转换为 f32 RGBA；整数格式按各自位深归一化到 `[0, 1]`。
    fn dynamic_to_image(decoded: &DynamicImage) -> Result<Image, PackError> {
        let rgba = decoded.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|pixel| pixel.0).collect();
        Image::new(width, height, pixels)
    }

    /// 仅读取图片头信息中的宽高。
    fn inspect_dimensions(raw: &RawImageData) -> Result<(u32, u32), PackError> {
        ImageReader::with_format(Cursor::new(raw.bytes.as_slice()), raw.format)
            .into_dimensions()
            .map_err(|e| {
                PackError::InvalidFormat(format!(
                    "无法读取图片尺寸 '{}'：{}",
                    raw.path.display(),
                    e
                ))
            })
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &PackConfig,
        width: u32,
        height: u32,
    ) -> Result<(), PackError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| PackError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(PackError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &PackConfig,
        width: u32,
        height: u32,
    ) -> Result<(), PackError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(DECODED_BYTES_PER_PIXEL))
            .ok_or_else(|| PackError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(PackError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
