use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ParseColorError, Rgb};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Color file parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing color group: {0}")]
    MissingGroup(&'static str),

    #[error("Malformed entry {index} in {group}: expected [name, \"#RRGGBB\"]")]
    MalformedEntry { group: &'static str, index: usize },

    #[error("Invalid color for {name:?} in {group}: {source}")]
    Color {
        group: &'static str,
        name: String,
        #[source]
        source: ParseColorError,
    },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("JPEG encode error: {0}")]
    JpegEncode(String),

    #[error("JPEG decode error: {0}")]
    JpegDecode(String),

    #[error("Unexpected image dimensions: {width}x{height}")]
    DimensionMismatch { width: u32, height: u32 },

    #[error("Pixel ({x}, {y}) is {found}, expected {expected}")]
    PixelMismatch {
        x: u32,
        y: u32,
        expected: Rgb,
        found: Rgb,
    },

    #[error("JPEG fixture is pixel-identical to the PNG")]
    NoJpegDrift,
}
