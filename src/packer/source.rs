//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示外部来源语义
//! - `RawImageData` 表示已加载但未解码的字节及其解码格式
//! - `StagedImage` 表示已知尺寸、尚未（或已经）完整解码的输入
//! - `Image` 表示可逐像素读取的稠密 RGBA 浮点缓冲（“可读副本”）

use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Serialize;

use super::PackError;

/// 像素通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Alpha => 3,
        }
    }
}

/// 行优先存储的 RGBA 图像，每个通道取值 `[0, 1]`。
///
/// 构造时保证 `width * height == pixels.len()` 且宽高均为正数。
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Image {
    /// 由宽高与像素数组构造图像。
    ///
    /// # 示例
    /// ```rust
    /// use texture_combine::packer::Image;
    ///
    /// let image = Image::new(1, 2, vec![[0.0, 0.0, 0.0, 1.0]; 2])?;
    /// assert_eq!(image.pixel_count(), 2);
    /// # Ok::<(), texture_combine::packer::PackError>(())
    /// ```
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Result<Self, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidRequest(format!(
                "图像宽高必须为正整数：{}x{}",
                width, height
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| PackError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels.len() != expected {
            return Err(PackError::InvalidRequest(format!(
                "像素数量 {} 与尺寸 {}x{} 不一致",
                pixels.len(),
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 按坐标生成像素，`f(x, y)` 以行优先顺序调用。
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, PackError>
    where
        F: FnMut(u32, u32) -> [f32; 4],
    {
        let capacity = (width as usize).saturating_mul(height as usize);
        let mut pixels = Vec::with_capacity(capacity);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 像素总数（宽 × 高）。
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.pixels
    }

    /// 读取 `(x, y)` 处像素，越界返回 `None`。
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// 按行优先顺序取出单个通道。
    pub fn channel(&self, channel: Channel) -> Vec<f32> {
        let index = channel.index();
        self.pixels.iter().map(|pixel| pixel[index]).collect()
    }
}

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 本地文件路径来源，任意 `image` 可解码的格式。
    FilePath(PathBuf),
    /// 调用方已解码好的图像。
    Decoded(Image),
}

impl ImageSource {
    /// 文件来源的文件名主干（不含扩展名），用于推断默认输出名。
    pub fn file_stem(&self) -> Option<String> {
        match self {
            Self::FilePath(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
            Self::Decoded(_) => None,
        }
    }
}

/// 单次打包请求。
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// 粗糙度或光滑度贴图（写入 A 通道）。
    pub roughness: Option<ImageSource>,
    /// 金属度贴图（写入 R 通道）。
    pub metallic: Option<ImageSource>,
    /// 为 `true` 时先把粗糙度反相为光滑度。
    pub is_roughness: bool,
    /// 输出目录，不存在时递归创建。
    pub save_dir: PathBuf,
    /// 输出文件名（不含 `.png`）。
    pub save_name: String,
}

impl PackRequest {
    /// 最终写入路径：`{save_dir}/{save_name}.png`。
    ///
    /// 文件名两端空白会被去掉，与 `validate_name` 校验的是同一个字符串。
    pub fn output_path(&self) -> PathBuf {
        self.save_dir.join(format!("{}.png", self.file_name()))
    }

    fn file_name(&self) -> &str {
        self.save_name.trim()
    }

    pub(crate) fn validate_name(&self) -> Result<(), PackError> {
        let name = self.file_name();
        if name.is_empty() {
            return Err(PackError::InvalidRequest("输出文件名不能为空".to_string()));
        }
        if name.contains('/') || name.contains('\\') || Path::new(name).components().count() != 1 {
            return Err(PackError::InvalidRequest(format!(
                "输出文件名不能包含路径分隔符：{}",
                self.save_name
            )));
        }
        Ok(())
    }
}

/// 加载阶段输出：原始字节与已确定的解码格式。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 按内容或扩展名确定的格式，后续探测与解码都使用它。
    pub(crate) format: ImageFormat,
    /// 来源路径（用于日志与诊断）。
    pub(crate) path: PathBuf,
}

/// 尺寸已知的输入。
///
/// 编码输入只读取了头信息，面积校验通过后才做完整解码。
pub(crate) enum StagedImage {
    Encoded {
        raw: RawImageData,
        width: u32,
        height: u32,
    },
    Decoded(Image),
}

impl StagedImage {
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Encoded { width, height, .. } => (*width, *height),
            Self::Decoded(image) => image.dimensions(),
        }
    }

    pub(crate) fn pixel_count(&self) -> u64 {
        let (width, height) = self.dimensions();
        width as u64 * height as u64
    }
}

/// 打包结果摘要。
#[derive(Debug, Clone, Serialize)]
pub struct PackOutput {
    /// 写入的 PNG 路径。
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 写入字节数。
    pub bytes_written: usize,
    /// 本次是否执行了粗糙度反相。
    pub is_roughness: bool,
}
