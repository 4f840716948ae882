//! # 编码与写盘模块
//!
//! ## 设计思路
//!
//! 编码全部在内存中完成，写盘是链路的最后一步：
//! 任何读取、解码、合并或编码失败时都不会打开目标文件。
//!
//! ## 实现思路
//!
//! - 浮点通道按 `round(v * 255)` 量化为 8 位，超出 `[0, 1]` 的值先截断。
//! - 使用 `image` 的 PNG 编码器输出 8 位 RGBA，相同输入得到相同字节。
//! - 目录不存在时 `create_dir_all`；文件以截断方式覆盖写入。
//!   写入中途失败可能留下不完整文件，这里不做原子替换。

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use super::{Image, PackError};

fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_rgba8(image: &Image) -> Result<RgbaImage, PackError> {
    let raw: Vec<u8> = image
        .pixels()
        .iter()
        .flat_map(|pixel| pixel.map(quantize))
        .collect();

    RgbaImage::from_raw(image.width(), image.height(), raw)
        .ok_or_else(|| PackError::Encode("RGBA 缓冲长度异常".to_string()))
}

/// 将图像编码为 8 位 RGBA PNG 字节。
pub fn encode_png(image: &Image) -> Result<Vec<u8>, PackError> {
    let rgba = to_rgba8(image)?;

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| PackError::Encode(format!("PNG 编码失败：{}", e)))?;

    Ok(cursor.into_inner())
}

/// 写入目标文件，必要时递归创建父目录，已存在的文件会被覆盖。
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<usize, PackError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PackError::FileSystem(format!("创建输出目录 '{}' 失败：{}", parent.display(), e))
            })?;
            log::info!("📂 已创建输出目录：{}", parent.display());
        }
    }

    let file = File::create(path)
        .map_err(|e| PackError::FileSystem(format!("无法创建文件 '{}'：{}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| PackError::FileSystem(format!("写入文件 '{}' 失败：{}", path.display(), e)))?;

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        std::env::temp_dir().join(format!("texture-combine-encoder-{nanos}"))
    }

    fn quantized_pixels(packed: &Image) -> Vec<Rgba<u8>> {
        packed
            .pixels()
            .iter()
            .map(|pixel| Rgba(pixel.map(quantize)))
            .collect()
    }

    #[test]
    fn quantize_rounds_and_clamps() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(0.25), 64);
        assert_eq!(quantize(0.75), 191);
        assert_eq!(quantize(-0.3), 0);
        assert_eq!(quantize(7.0), 255);
    }

    #[test]
    fn encode_png_round_trips_quantized_pixels() {
        let packed = Image::new(2, 1, vec![[0.5, 1.0, 1.0, 0.25], [0.0, 1.0, 1.0, 1.0]])
            .expect("image should build");

        let bytes = encode_png(&packed).expect("encode should succeed");
        let decoded = image::load_from_memory(&bytes)
            .expect("png should decode")
            .to_rgba8();

        assert_eq!(decoded.dimensions(), (2, 1));
        let pixels: Vec<Rgba<u8>> = decoded.pixels().copied().collect();
        assert_eq!(pixels, quantized_pixels(&packed));
        assert_eq!(pixels[0], Rgba([128, 255, 255, 64]));
    }

    #[test]
    fn encode_png_is_deterministic() {
        let packed = Image::from_fn(8, 8, |x, y| [x as f32 / 8.0, 1.0, 1.0, y as f32 / 8.0])
            .expect("image should build");

        let first = encode_png(&packed).expect("encode should succeed");
        let second = encode_png(&packed).expect("encode should succeed");

        assert_eq!(first, second);
    }

    #[test]
    fn write_output_creates_directories_and_overwrites() {
        let root = unique_temp_dir();
        let path = root.join("nested").join("deeper").join("mask.png");

        let written = write_output(&path, b"first-longer-payload").expect("first write");
        assert_eq!(written, 20);

        write_output(&path, b"second").expect("second write");
        let content = std::fs::read(&path).expect("read back");
        assert_eq!(content, b"second");

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn write_output_fails_when_parent_is_a_file() {
        let root = unique_temp_dir();
        std::fs::create_dir_all(&root).expect("create temp dir");
        let blocker = root.join("blocker");
        std::fs::write(&blocker, b"file").expect("write blocker");
        let path = blocker.join("mask.png");

        let result = write_output(&path, b"payload");

        assert!(matches!(result, Err(PackError::FileSystem(_))));
        assert_eq!(std::fs::read(&blocker).expect("read blocker"), b"file");

        let _ = std::fs::remove_dir_all(root);
    }
}
