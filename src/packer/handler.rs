//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ChannelPacker` 只负责流程编排与配置持有，不依赖任何界面或命令行。
//! 处理链路固定为：
//! 1. 两张输入都缺失时直接返回（不是错误）
//! 2. 按来源加载原始字节并读取尺寸
//! 3. 尺寸校验（默认比较面积）
//! 4. 完整解码为可读副本
//! 5. 反相 + 通道合并
//! 6. PNG 编码
//! 7. 写盘
//!
//! ## 实现思路
//!
//! - 第 7 步之前的任何失败都不会触碰目标路径。
//! - 可读副本是本次调用私有的缓冲，函数返回时随作用域释放。
//! - 记录 `load/decode/pack/encode/write/total` 阶段耗时，便于性能诊断。

use std::time::Instant;

use super::{encode_png, pack_images, write_output};
use super::{PackConfig, PackError, PackOutput, PackRequest};

/// 贴图通道打包器。
#[derive(Debug, Clone)]
pub struct ChannelPacker {
    config: PackConfig,
}

impl ChannelPacker {
    /// 根据配置创建打包器，配置非法时返回错误。
    ///
    /// # 示例
    /// ```rust
    /// use texture_combine::packer::{ChannelPacker, PackConfig};
    ///
    /// let packer = ChannelPacker::new(PackConfig::default())?;
    /// assert!(!packer.config().require_exact_dimensions);
    /// # Ok::<(), texture_combine::packer::PackError>(())
    /// ```
    pub fn new(config: PackConfig) -> Result<Self, PackError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// 处理主入口：加载、合并并写出 `{save_dir}/{save_name}.png`。
    ///
    /// 两张输入都缺失时返回 `Ok(None)` 且不写任何文件。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use std::path::PathBuf;
    /// use texture_combine::packer::{ChannelPacker, ImageSource, PackConfig, PackRequest};
    ///
    /// let packer = ChannelPacker::new(PackConfig::default())?;
    /// let output = packer.pack(PackRequest {
    ///     roughness: Some(ImageSource::FilePath("Rock_R.png".into())),
    ///     metallic: Some(ImageSource::FilePath("Rock_M.png".into())),
    ///     is_roughness: true,
    ///     save_dir: PathBuf::from("CombineTextures"),
    ///     save_name: "RockPbrMask".to_string(),
    /// })?;
    /// assert!(output.is_some());
    /// # Ok::<(), texture_combine::packer::PackError>(())
    /// ```
    pub fn pack(&self, request: PackRequest) -> Result<Option<PackOutput>, PackError> {
        if request.roughness.is_none() && request.metallic.is_none() {
            log::info!("ℹ️ 未提供粗糙度/光滑度与金属度贴图，跳过合并");
            return Ok(None);
        }

        request.validate_name()?;
        let output_path = request.output_path();
        let PackRequest {
            roughness,
            metallic,
            is_roughness,
            ..
        } = request;

        let config = &self.config;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let staged_roughness = roughness
            .map(|source| self.stage(source, config))
            .transpose()?;
        let staged_metallic = metallic
            .map(|source| self.stage(source, config))
            .transpose()?;
        if let (Some(a), Some(b)) = (&staged_roughness, &staged_metallic) {
            Self::check_dimensions(a, b, config)?;
        }
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let readable_roughness = staged_roughness.map(Self::into_readable).transpose()?;
        let readable_metallic = staged_metallic.map(Self::into_readable).transpose()?;
        let decode_elapsed = decode_start.elapsed();

        let pack_start = Instant::now();
        let Some(packed) = pack_images(
            readable_roughness.as_ref(),
            readable_metallic.as_ref(),
            is_roughness,
        )?
        else {
            return Ok(None);
        };
        let pack_elapsed = pack_start.elapsed();

        let encode_start = Instant::now();
        let bytes = encode_png(&packed)?;
        let encode_elapsed = encode_start.elapsed();

        let write_start = Instant::now();
        let bytes_written = write_output(&output_path, &bytes)?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "✅ 贴图合并完成 - 输出: {} 尺寸: {}x{} 反相: {} load={}ms decode={}ms pack={}ms encode={}ms write={}ms total={}ms",
            output_path.display(),
            packed.width(),
            packed.height(),
            is_roughness,
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            pack_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(Some(PackOutput {
            path: output_path,
            width: packed.width(),
            height: packed.height(),
            bytes_written,
            is_roughness,
        }))
    }
}
