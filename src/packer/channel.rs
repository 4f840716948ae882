//! # 通道合并
//!
//! 输出像素 = (金属度.r, 1, 1, 光滑度.r)。缺失的输入按全黑 `(0, 0, 0, 0)` 采样。
//! 两张输入按行优先线性下标对齐，因此面积一致但形状不同的输入也能逐像素对应。

use super::{Image, PackError};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// 将 RGB 三个通道原地替换为 `1 - v`，alpha 保持不变。
///
/// 用于把粗糙度贴图转换为光滑度贴图。
pub fn invert_rgb(image: &mut Image) {
    for pixel in image.pixels_mut() {
        pixel[0] = invert(pixel[0]);
        pixel[1] = invert(pixel[1]);
        pixel[2] = invert(pixel[2]);
    }
}

fn invert(value: f32) -> f32 {
    1.0 - value
}

/// 合并两张可读图像为 PBR 遮罩。
///
/// - 两者都缺失：返回 `Ok(None)`，不视为错误。
/// - 两者像素总数不同：返回 `PackError::SizeMismatch`。
/// - 输出尺寸取 `roughness` 的尺寸，缺失时取 `metallic` 的尺寸。
///
/// `is_roughness` 为 `true` 时，`roughness` 的红通道在采样时取 `1 - v`，
/// 与 [`invert_rgb`] 结果一致；输入既不复制也不修改。
///
/// # 示例
/// ```rust
/// use texture_combine::packer::{pack_images, Image};
///
/// let roughness = Image::new(1, 1, vec![[0.25, 0.25, 0.25, 1.0]])?;
/// let packed = pack_images(Some(&roughness), None, true)?.expect("one input present");
/// assert_eq!(packed.pixels()[0], [0.0, 1.0, 1.0, 0.75]);
/// # Ok::<(), texture_combine::packer::PackError>(())
/// ```
pub fn pack_images(
    roughness: Option<&Image>,
    metallic: Option<&Image>,
    is_roughness: bool,
) -> Result<Option<Image>, PackError> {
    let (width, height) = match (roughness, metallic) {
        (None, None) => return Ok(None),
        (Some(a), Some(b)) => {
            if a.pixel_count() != b.pixel_count() {
                return Err(PackError::SizeMismatch {
                    a_width: a.width(),
                    a_height: a.height(),
                    b_width: b.width(),
                    b_height: b.height(),
                });
            }
            a.dimensions()
        }
        (Some(a), None) => a.dimensions(),
        (None, Some(b)) => b.dimensions(),
    };

    let count = width as usize * height as usize;
    let pixels = (0..count)
        .map(|index| {
            let color_a = sample(roughness, index);
            let color_m = sample(metallic, index);
            let smoothness = match roughness {
                Some(_) if is_roughness => invert(color_a[0]),
                _ => color_a[0],
            };
            [color_m[0], 1.0, 1.0, smoothness]
        })
        .collect();

    Image::new(width, height, pixels).map(Some)
}

fn sample(image: Option<&Image>, index: usize) -> [f32; 4] {
    image
        .and_then(|image| image.pixels().get(index).copied())
        .unwrap_or(BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::Channel;

    fn red_image(width: u32, height: u32, reds: &[f32]) -> Image {
        let pixels = reds.iter().map(|&r| [r, r, r, 1.0]).collect();
        Image::new(width, height, pixels).expect("test image should build")
    }

    #[test]
    fn packs_reference_scenario() {
        let a = red_image(2, 2, &[1.0, 0.5, 0.0, 0.25]);
        let b = red_image(2, 2, &[0.0, 1.0, 0.5, 0.75]);

        let packed = pack_images(Some(&a), Some(&b), false)
            .expect("pack should succeed")
            .expect("output expected");

        assert_eq!(
            packed.pixels(),
            &[
                [0.0, 1.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 0.5],
                [0.5, 1.0, 1.0, 0.0],
                [0.75, 1.0, 1.0, 0.25],
            ]
        );
    }

    #[test]
    fn roughness_flag_inverts_alpha_source() {
        let a = red_image(2, 1, &[0.0, 0.25]);

        let packed = pack_images(Some(&a), None, true)
            .expect("pack should succeed")
            .expect("output expected");

        assert_eq!(packed.channel(Channel::Alpha), vec![1.0, 0.75]);
        assert_eq!(packed.channel(Channel::Red), vec![0.0, 0.0]);
    }

    #[test]
    fn invert_rgb_keeps_alpha() {
        let mut image = Image::new(1, 1, vec![[0.2, 0.4, 1.0, 0.3]]).expect("image should build");

        invert_rgb(&mut image);

        let pixel = image.pixels()[0];
        assert_eq!(pixel[0], 1.0 - 0.2);
        assert_eq!(pixel[1], 1.0 - 0.4);
        assert_eq!(pixel[2], 0.0);
        assert_eq!(pixel[3], 0.3);
    }

    #[test]
    fn inversion_does_not_touch_caller_image() {
        let a = red_image(1, 1, &[0.1]);

        let _ = pack_images(Some(&a), None, true).expect("pack should succeed");

        assert_eq!(a.pixels()[0][0], 0.1);
    }

    #[test]
    fn sampled_inversion_matches_invert_rgb() {
        let a = red_image(2, 2, &[0.0, 0.1, 0.6, 1.0]);
        let mut inverted = a.clone();
        invert_rgb(&mut inverted);

        let packed = pack_images(Some(&a), None, true)
            .expect("pack should succeed")
            .expect("output expected");

        assert_eq!(packed.channel(Channel::Alpha), inverted.channel(Channel::Red));
    }

    #[test]
    fn metallic_only_uses_metallic_dimensions() {
        let b = red_image(3, 1, &[0.1, 0.2, 0.3]);

        let packed = pack_images(None, Some(&b), true)
            .expect("pack should succeed")
            .expect("output expected");

        assert_eq!(packed.dimensions(), (3, 1));
        assert_eq!(packed.channel(Channel::Alpha), vec![0.0, 0.0, 0.0]);
        assert_eq!(packed.channel(Channel::Red), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn no_inputs_is_a_no_op() {
        assert!(matches!(pack_images(None, None, true), Ok(None)));
    }

    #[test]
    fn equal_area_uses_roughness_shape() {
        let a = red_image(4, 2, &[0.0; 8]);
        let b = red_image(2, 4, &[0.5; 8]);

        let packed = pack_images(Some(&a), Some(&b), false)
            .expect("pack should succeed")
            .expect("output expected");

        assert_eq!(packed.dimensions(), (4, 2));
        assert!(packed.channel(Channel::Red).iter().all(|&r| r == 0.5));
    }

    #[test]
    fn different_area_is_rejected() {
        let a = red_image(2, 2, &[0.0; 4]);
        let b = red_image(1, 1, &[0.0]);

        assert!(matches!(
            pack_images(Some(&a), Some(&b), false),
            Err(PackError::SizeMismatch { .. })
        ));
    }
}
