//! Test fixtures and constants.

use palette_table::{ColorEntry, PaletteGroups, Rgb};
use std::path::PathBuf;

/// The color source file shipped at the crate root.
pub fn shipped_colors_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("xterm-256color.yaml")
}

/// `n` entries with distinct colors, named by position.
pub fn numbered_entries(n: usize, seed: u8) -> Vec<ColorEntry> {
    (0..n)
        .map(|i| {
            ColorEntry::new(
                i.to_string(),
                Rgb::new(seed, (i / 256) as u8, (i % 256) as u8),
            )
        })
        .collect()
}

/// Groups with distinct colors in each group, so every pixel is traceable.
pub fn distinct_groups() -> PaletteGroups {
    PaletteGroups {
        cube: numbered_entries(216, 1),
        greyscale: numbered_entries(24, 2),
        basic: numbered_entries(16, 3),
    }
}

/// Render groups back into the color file format.
pub fn groups_yaml(groups: &PaletteGroups) -> String {
    groups.to_yaml_string().expect("serialize color groups")
}
