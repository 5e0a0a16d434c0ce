pub mod encode;
pub mod fixtures;

pub use encode::{decode_jpeg, decode_png, encode_jpeg, encode_png, DecodedImage, JPEG_QUALITY};
pub use fixtures::{default_output_dir, write_fixtures, FixturePaths, JPEG_NAME, PNG_NAME};
