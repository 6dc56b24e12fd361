use std::io::Cursor;

use super::*;

fn encode_png(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_color_png_keeps_straight_alpha() {
    let src = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let buf = encode_png(image::DynamicImage::ImageRgba8(src));

    let img = decode_color_image(&buf).unwrap();
    assert_eq!(img.width(), 1);
    assert_eq!(img.height(), 1);
    assert_eq!(
        img.texel(0, 0),
        [100.0 / 255.0, 50.0 / 255.0, 200.0 / 255.0, 128.0 / 255.0]
    );
}

#[test]
fn decode_depth_from_grayscale() {
    let src = image::GrayImage::from_raw(2, 1, vec![0u8, 255u8]).unwrap();
    let buf = encode_png(image::DynamicImage::ImageLuma8(src));

    let depth = decode_depth_image(&buf).unwrap();
    assert_eq!(depth.width(), 2);
    assert_eq!(depth.texel(0, 0), 0.0);
    assert_eq!(depth.texel(1, 0), 1.0);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_color_image(b"not an image").is_err());
    assert!(decode_depth_image(&[]).is_err());
}
