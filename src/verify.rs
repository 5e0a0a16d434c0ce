//! Checks that written fixtures still say what they should.
//!
//! The PNG must reproduce every palette entry exactly at its coordinate and
//! leave the unused slots at the background color. The JPEG must differ
//! from the PNG somewhere; how far it drifts is reported, not enforced.

use std::path::Path;

use crate::error::FixtureError;
use crate::layout::{table_positions, BACKGROUND, HEIGHT, WIDTH};
use crate::models::PaletteGroups;
use crate::palette_tree::RgbTree;
use crate::rendering::{decode_jpeg, decode_png, DecodedImage, FixturePaths};

/// Outcome of checking both fixtures against a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureReport {
    /// Palette entries reproduced exactly by the PNG.
    pub png_exact: usize,
    /// JPEG pixels identical to the PNG, over the whole canvas.
    pub jpeg_exact: usize,
    /// Palette entries whose JPEG pixel still maps back to the same color.
    pub jpeg_nearest_hits: usize,
    /// Largest per-channel JPEG error over laid-out pixels.
    pub max_jpeg_drift: u8,
}

/// Read both fixtures from `dir` and check them against `groups`.
pub fn check_fixtures(
    dir: impl AsRef<Path>,
    groups: &PaletteGroups,
) -> Result<FixtureReport, FixtureError> {
    let paths = FixturePaths::in_dir(dir);
    let png = read_file(&paths.png)?;
    let jpeg = read_file(&paths.jpeg)?;

    let report = check_images(&decode_png(&png)?, &decode_jpeg(&jpeg)?, groups)?;
    tracing::info!(
        png_exact = report.png_exact,
        jpeg_exact = report.jpeg_exact,
        jpeg_nearest_hits = report.jpeg_nearest_hits,
        max_jpeg_drift = report.max_jpeg_drift,
        "Fixtures verified"
    );
    Ok(report)
}

/// Check decoded images against `groups`.
pub fn check_images(
    png: &DecodedImage,
    jpeg: &DecodedImage,
    groups: &PaletteGroups,
) -> Result<FixtureReport, FixtureError> {
    for img in [png, jpeg] {
        if (img.width, img.height) != (WIDTH, HEIGHT) {
            return Err(FixtureError::DimensionMismatch {
                width: img.width,
                height: img.height,
            });
        }
    }

    let positions = table_positions(groups);
    let mut laid_out = vec![false; (WIDTH * HEIGHT) as usize];
    let mut report = FixtureReport::default();

    for (entry, at) in &positions {
        laid_out[(at.row * WIDTH + at.col) as usize] = true;
        let found = png.get(at.col, at.row).unwrap_or(BACKGROUND);
        if found != entry.rgb {
            return Err(FixtureError::PixelMismatch {
                x: at.col,
                y: at.row,
                expected: entry.rgb,
                found,
            });
        }
        report.png_exact += 1;
    }

    for (idx, (&p, &set)) in png.pixels.iter().zip(&laid_out).enumerate() {
        if !set && p != BACKGROUND {
            return Err(FixtureError::PixelMismatch {
                x: idx as u32 % WIDTH,
                y: idx as u32 / WIDTH,
                expected: BACKGROUND,
                found: p,
            });
        }
    }

    report.jpeg_exact = png
        .pixels
        .iter()
        .zip(&jpeg.pixels)
        .filter(|(a, b)| a == b)
        .count();
    if report.jpeg_exact == png.pixels.len() {
        return Err(FixtureError::NoJpegDrift);
    }

    let tree = RgbTree::build(groups.entries());
    for (entry, at) in &positions {
        let Some(lossy) = jpeg.get(at.col, at.row) else {
            continue;
        };
        report.max_jpeg_drift = report.max_jpeg_drift.max(lossy.max_channel_diff(entry.rgb));
        if let Some((nearest, _)) = tree.nearest(lossy) {
            if nearest.rgb == entry.rgb {
                report.jpeg_nearest_hits += 1;
            }
        }
    }

    Ok(report)
}

fn read_file(path: &Path) -> Result<Vec<u8>, FixtureError> {
    std::fs::read(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}
