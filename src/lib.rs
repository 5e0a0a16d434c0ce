//! palette-table - 256-color table fixtures
//!
//! Lays the xterm 256-color palette out on a 12x22 canvas, one pixel per
//! entry, and writes it as a lossless PNG and a deliberately lossy JPEG.
//! This library exposes modules for integration testing.

pub mod error;
pub mod layout;
pub mod models;
pub mod palette_tree;
pub mod rendering;
pub mod verify;

use std::path::Path;

pub use error::FixtureError;
pub use layout::{render_table, Canvas, Cursor, HEIGHT, WIDTH};
pub use models::{ColorEntry, PaletteGroups, Rgb};
pub use rendering::FixturePaths;

/// Lay out `groups` and write both fixtures into `dir`.
///
/// # Panics
///
/// If any group has the wrong number of entries. Nothing is written in
/// that case.
pub fn generate(groups: &PaletteGroups, dir: impl AsRef<Path>) -> Result<FixturePaths, FixtureError> {
    let canvas = render_table(groups);
    rendering::write_fixtures(&canvas, dir)
}
