pub mod color;
pub mod palette_source;

pub use color::{ColorEntry, ParseColorError, Rgb};
pub use palette_source::{
    PaletteGroups, BASIC_KEY, BASIC_LEN, CUBE_KEY, CUBE_LEN, DEFAULT_COLORS_FILE, GREYSCALE_KEY,
    GREYSCALE_LEN,
};
