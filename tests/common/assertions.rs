//! Assertion helpers for tests.

use palette_table::rendering::DecodedImage;
use palette_table::Rgb;
use pretty_assertions::assert_eq;

/// Assert bytes start with the PNG signature
pub fn assert_png(data: &[u8]) {
    assert!(
        data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        data.len(),
        &data[..8.min(data.len())]
    );
}

/// Assert bytes start with a JPEG SOI marker
pub fn assert_jpeg(data: &[u8]) {
    assert!(
        data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "Expected JPEG image, got {} bytes starting with {:?}",
        data.len(),
        &data[..4.min(data.len())]
    );
}

/// Assert a decoded image is the fixed 12x22 table size
pub fn assert_table_dimensions(img: &DecodedImage) {
    assert_eq!(
        (img.width, img.height),
        (12, 22),
        "Fixture must be 12x22 regardless of input"
    );
}

/// Assert one decoded pixel
pub fn assert_pixel(img: &DecodedImage, x: u32, y: u32, expected: Rgb) {
    assert_eq!(
        img.get(x, y),
        Some(expected),
        "Pixel ({x}, {y}) should be {expected}"
    );
}
