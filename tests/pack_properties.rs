// Property tests for the channel packing core.
use proptest::prelude::*;
use texture_combine::packer::{Channel, Image, encode_png, invert_rgb, pack_images};

fn level() -> impl Strategy<Value = f32> {
    (0u8..=255).prop_map(|v| v as f32 / 255.0)
}

fn image_of(width: u32, height: u32) -> impl Strategy<Value = Image> {
    prop::collection::vec((level(), level(), level(), level()), (width * height) as usize).prop_map(
        move |values| {
            let pixels = values.into_iter().map(|(r, g, b, a)| [r, g, b, a]).collect();
            Image::new(width, height, pixels).expect("strategy builds valid images")
        },
    )
}

fn any_image() -> impl Strategy<Value = Image> {
    (1u32..8, 1u32..8).prop_flat_map(|(w, h)| image_of(w, h))
}

/// Two images with the same pixel count; the second one is sometimes transposed.
fn equal_area_pair() -> impl Strategy<Value = (Image, Image)> {
    (1u32..8, 1u32..8, any::<bool>()).prop_flat_map(|(w, h, transpose)| {
        let (bw, bh) = if transpose { (h, w) } else { (w, h) };
        (image_of(w, h), image_of(bw, bh))
    })
}

fn expected_alpha(source: &Image, is_roughness: bool) -> Vec<f32> {
    source
        .channel(Channel::Red)
        .into_iter()
        .map(|r| if is_roughness { 1.0 - r } else { r })
        .collect()
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

proptest! {
    #[test]
    fn both_inputs_map_red_and_alpha_exactly(
        (a, b) in equal_area_pair(),
        is_roughness in any::<bool>(),
    ) {
        let packed = pack_images(Some(&a), Some(&b), is_roughness)
            .expect("equal area must pack")
            .expect("output expected");

        prop_assert_eq!(packed.dimensions(), a.dimensions());
        prop_assert_eq!(packed.channel(Channel::Alpha), expected_alpha(&a, is_roughness));
        prop_assert_eq!(packed.channel(Channel::Red), b.channel(Channel::Red));
        prop_assert!(packed.channel(Channel::Green).iter().all(|&g| g == 1.0));
        prop_assert!(packed.channel(Channel::Blue).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn roughness_only_has_black_red(a in any_image(), is_roughness in any::<bool>()) {
        let packed = pack_images(Some(&a), None, is_roughness)
            .expect("single input must pack")
            .expect("output expected");

        prop_assert_eq!(packed.dimensions(), a.dimensions());
        prop_assert!(packed.channel(Channel::Red).iter().all(|&r| r == 0.0));
        prop_assert_eq!(packed.channel(Channel::Alpha), expected_alpha(&a, is_roughness));
        prop_assert!(packed.channel(Channel::Green).iter().all(|&g| g == 1.0));
        prop_assert!(packed.channel(Channel::Blue).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn metallic_only_has_zero_alpha(b in any_image(), is_roughness in any::<bool>()) {
        let packed = pack_images(None, Some(&b), is_roughness)
            .expect("single input must pack")
            .expect("output expected");

        prop_assert_eq!(packed.dimensions(), b.dimensions());
        prop_assert!(packed.channel(Channel::Alpha).iter().all(|&a| a == 0.0));
        prop_assert_eq!(packed.channel(Channel::Red), b.channel(Channel::Red));
        prop_assert!(packed.channel(Channel::Green).iter().all(|&g| g == 1.0));
    }

    #[test]
    fn double_inversion_survives_quantization(image in any_image()) {
        let mut twice = image.clone();
        invert_rgb(&mut twice);
        invert_rgb(&mut twice);

        for (original, restored) in image.pixels().iter().zip(twice.pixels()) {
            for channel in 0..3 {
                prop_assert_eq!(to_u8(original[channel]), to_u8(restored[channel]));
            }
            prop_assert_eq!(original[3], restored[3]);
        }
    }

    #[test]
    fn different_area_is_always_rejected(a in any_image(), b in any_image()) {
        prop_assume!(a.pixel_count() != b.pixel_count());
        prop_assert!(pack_images(Some(&a), Some(&b), false).is_err());
    }

    #[test]
    fn encoding_is_deterministic((a, b) in equal_area_pair()) {
        let packed = pack_images(Some(&a), Some(&b), true)
            .expect("equal area must pack")
            .expect("output expected");

        let first = encode_png(&packed).expect("encode should succeed");
        let second = encode_png(&packed).expect("encode should succeed");
        prop_assert_eq!(first, second);
    }
}

#[test]
fn no_inputs_produce_nothing() {
    assert!(pack_images(None, None, false).expect("no-op is not an error").is_none());
    assert!(pack_images(None, None, true).expect("no-op is not an error").is_none());
}
