use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::error::FixtureError;
use crate::layout::Canvas;
use crate::models::Rgb;

/// Quality of the lossy fixture on the 0-100 scale. Low enough that palette
/// colors visibly drift.
pub const JPEG_QUALITY: u8 = 40;

/// Encode the canvas as an 8-bit RGB PNG. Lossless.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, FixtureError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| FixtureError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&canvas.to_rgb_bytes())
            .map_err(|e| FixtureError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode the canvas as a baseline JPEG at `quality`.
pub fn encode_jpeg(canvas: &Canvas, quality: u8) -> Result<Vec<u8>, FixtureError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(
            &canvas.to_rgb_bytes(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgb8.into(),
        )
        .map_err(|e| FixtureError::JpegEncode(e.to_string()))?;
    Ok(out)
}

/// A decoded fixture, flattened to RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl DecodedImage {
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y * self.width + x) as usize])
    }
}

/// Decode a PNG into RGB pixels. Palette and sub-byte images are expanded.
pub fn decode_png(data: &[u8]) -> Result<DecodedImage, FixtureError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| FixtureError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| FixtureError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let pixels: Vec<Rgb> = match info.color_type {
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect(),
        png::ColorType::Grayscale => buf.iter().map(|&v| Rgb::new(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|c| Rgb::new(c[0], c[0], c[0]))
            .collect(),
        png::ColorType::Indexed => {
            return Err(FixtureError::PngDecode(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Decode a JPEG into RGB pixels.
pub fn decode_jpeg(data: &[u8]) -> Result<DecodedImage, FixtureError> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| FixtureError::JpegDecode(e.to_string()))?
        .to_rgb8();

    Ok(DecodedImage {
        width: img.width(),
        height: img.height(),
        pixels: img.pixels().map(|p| Rgb::from_bytes(p.0)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render_table;
    use crate::models::PaletteGroups;

    #[test]
    fn test_png_signature_and_size() {
        let canvas = render_table(&PaletteGroups::xterm());
        let png = encode_png(&canvas).unwrap();

        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let decoded = decode_png(&png).unwrap();
        assert_eq!((decoded.width, decoded.height), (12, 22));
    }

    #[test]
    fn test_png_is_lossless() {
        let canvas = render_table(&PaletteGroups::xterm());
        let decoded = decode_png(&encode_png(&canvas).unwrap()).unwrap();
        assert_eq!(decoded.pixels, canvas.pixels());
    }

    #[test]
    fn test_jpeg_signature_and_size() {
        let canvas = render_table(&PaletteGroups::xterm());
        let jpeg = encode_jpeg(&canvas, JPEG_QUALITY).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let decoded = decode_jpeg(&jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (12, 22));
    }

    #[test]
    fn test_jpeg_is_lossy() {
        let canvas = render_table(&PaletteGroups::xterm());
        let decoded = decode_jpeg(&encode_jpeg(&canvas, JPEG_QUALITY).unwrap()).unwrap();
        assert_ne!(decoded.pixels, canvas.pixels());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(FixtureError::PngDecode(_))
        ));
        assert!(matches!(
            decode_jpeg(b"not a jpeg"),
            Err(FixtureError::JpegDecode(_))
        ));
    }

    #[test]
    fn test_decoded_get_bounds() {
        let img = DecodedImage {
            width: 2,
            height: 1,
            pixels: vec![Rgb::BLACK, Rgb::new(1, 2, 3)],
        };
        assert_eq!(img.get(1, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 1), None);
    }
}
