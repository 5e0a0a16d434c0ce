use std::path::{Path, PathBuf};

use super::encode::{encode_jpeg, encode_png, JPEG_QUALITY};
use crate::error::FixtureError;
use crate::layout::Canvas;

/// Lossless fixture: every pixel exactly matches its palette entry.
pub const PNG_NAME: &str = "1px_256_table.png";
/// Lossy fixture: every pixel only approximates its palette entry.
pub const JPEG_NAME: &str = "1px_256_table.jpg";

/// Where the two fixture files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    pub png: PathBuf,
    pub jpeg: PathBuf,
}

impl FixturePaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            png: dir.join(PNG_NAME),
            jpeg: dir.join(JPEG_NAME),
        }
    }
}

/// Default output directory: `test/` next to the crate manifest.
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test")
}

/// Encode the canvas twice and write both fixtures into `dir`.
///
/// Both images are encoded before either file is written. The directory
/// must already exist.
pub fn write_fixtures(canvas: &Canvas, dir: impl AsRef<Path>) -> Result<FixturePaths, FixtureError> {
    let paths = FixturePaths::in_dir(dir);

    let png = encode_png(canvas)?;
    let jpeg = encode_jpeg(canvas, JPEG_QUALITY)?;

    write_file(&paths.png, &png)?;
    write_file(&paths.jpeg, &jpeg)?;

    tracing::info!(
        png = %paths.png.display(),
        png_bytes = png.len(),
        jpeg = %paths.jpeg.display(),
        jpeg_bytes = jpeg.len(),
        quality = JPEG_QUALITY,
        "Wrote fixtures"
    );

    Ok(paths)
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), FixtureError> {
    std::fs::write(path, data).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}
