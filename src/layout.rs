//! Pixel layout of the 256-color table.
//!
//! The canvas is 12 pixels wide and 22 high:
//!
//! - rows 0-17: the 216-entry color cube, written in vertical strips of six
//!   rows, twelve strips per band, three bands stacked
//! - rows 18-19: the 24-step greyscale ramp, row-major, twelve per row
//! - rows 20-21: the 16 basic colors, row-major, eight per row
//!
//! Each pass takes the cursor where the previous one stopped. The last four
//! pixels of rows 20 and 21 are never written and keep the background color.

use crate::models::{ColorEntry, PaletteGroups, Rgb, BASIC_LEN, CUBE_LEN, GREYSCALE_LEN};

pub const WIDTH: u32 = 12;
pub const HEIGHT: u32 = 18 + 2 + 2;

/// Fill color for pixels no entry is laid out on.
pub const BACKGROUND: Rgb = Rgb::BLACK;

/// Height of one cube strip.
const STRIP_HEIGHT: u32 = 6;
/// Basic colors per row.
const BASIC_ROW_LEN: u32 = 8;

const CUBE_END_ROW: u32 = 18;
const GREYSCALE_END_ROW: u32 = 20;
const BASIC_END_ROW: u32 = 22;

/// Next pixel a layout pass will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub col: u32,
    pub row: u32,
}

impl Cursor {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Fixed-size RGB canvas that allows each pixel to be written at most once.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<Rgb>,
    written: Vec<bool>,
}

impl Canvas {
    pub fn new() -> Self {
        let len = (WIDTH * HEIGHT) as usize;
        Self {
            pixels: vec![BACKGROUND; len],
            written: vec![false; len],
        }
    }

    pub fn width(&self) -> u32 {
        WIDTH
    }

    pub fn height(&self) -> u32 {
        HEIGHT
    }

    /// Write one pixel.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the canvas or was already written.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: Rgb) {
        assert!(
            x < WIDTH && y < HEIGHT,
            "pixel ({x}, {y}) is outside the {WIDTH}x{HEIGHT} canvas"
        );
        let idx = (y * WIDTH + x) as usize;
        assert!(!self.written[idx], "pixel ({x}, {y}) written twice");
        self.pixels[idx] = rgb;
        self.written[idx] = true;
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < WIDTH && y < HEIGHT).then(|| self.pixels[(y * WIDTH + x) as usize])
    }

    pub fn is_written(&self, x: u32, y: u32) -> bool {
        x < WIDTH && y < HEIGHT && self.written[(y * WIDTH + x) as usize]
    }

    pub fn written_count(&self) -> usize {
        self.written.iter().filter(|&&w| w).count()
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packed 8-bit RGB, row-major, three bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out the color cube starting at `start`.
///
/// # Panics
///
/// If `entries` does not hold exactly 216 colors, or the cursor does not end
/// on row 18.
pub fn layout_color_cube(canvas: &mut Canvas, entries: &[ColorEntry], start: Cursor) -> Cursor {
    walk_color_cube(entries, start, |at, entry| {
        canvas.put_pixel(at.col, at.row, entry.rgb)
    })
}

/// Lay out the greyscale ramp starting at `start`.
///
/// # Panics
///
/// If `entries` does not hold exactly 24 colors, or the cursor does not end
/// on row 20.
pub fn layout_greyscale(canvas: &mut Canvas, entries: &[ColorEntry], start: Cursor) -> Cursor {
    walk_greyscale(entries, start, |at, entry| {
        canvas.put_pixel(at.col, at.row, entry.rgb)
    })
}

/// Lay out the basic 16 colors starting at `start`.
///
/// # Panics
///
/// If `entries` does not hold exactly 16 colors, or the cursor does not end
/// on row 22.
pub fn layout_basic(canvas: &mut Canvas, entries: &[ColorEntry], start: Cursor) -> Cursor {
    walk_basic(entries, start, |at, entry| {
        canvas.put_pixel(at.col, at.row, entry.rgb)
    })
}

/// Run all three passes over a fresh canvas.
pub fn render_table(groups: &PaletteGroups) -> Canvas {
    let mut canvas = Canvas::new();

    let cursor = layout_color_cube(&mut canvas, &groups.cube, Cursor::default());
    tracing::debug!(col = cursor.col, row = cursor.row, "Color cube laid out");

    let cursor = layout_greyscale(&mut canvas, &groups.greyscale, cursor);
    tracing::debug!(col = cursor.col, row = cursor.row, "Greyscale ramp laid out");

    let cursor = layout_basic(&mut canvas, &groups.basic, cursor);
    tracing::debug!(col = cursor.col, row = cursor.row, "Basic colors laid out");

    canvas
}

/// Coordinate of every entry, in layout order.
pub fn table_positions(groups: &PaletteGroups) -> Vec<(ColorEntry, Cursor)> {
    let mut positions = Vec::with_capacity(groups.len());
    let mut record = |at: Cursor, entry: &ColorEntry| positions.push((entry.clone(), at));

    let cursor = walk_color_cube(&groups.cube, Cursor::default(), &mut record);
    let cursor = walk_greyscale(&groups.greyscale, cursor, &mut record);
    walk_basic(&groups.basic, cursor, &mut record);

    positions
}

fn walk_color_cube(
    entries: &[ColorEntry],
    start: Cursor,
    mut place: impl FnMut(Cursor, &ColorEntry),
) -> Cursor {
    assert_eq!(
        entries.len(),
        CUBE_LEN,
        "color cube must have {CUBE_LEN} entries"
    );

    let Cursor { mut col, mut row } = start;
    let mut base_row = start.row;

    for entry in entries {
        place(Cursor::new(col, row), entry);

        row += 1;
        if row % STRIP_HEIGHT == 0 {
            col += 1;
            if col % WIDTH == 0 {
                base_row += STRIP_HEIGHT;
                col = 0;
            }
            row = base_row;
        }
    }

    assert_eq!(row, CUBE_END_ROW, "color cube must end on row {CUBE_END_ROW}");
    Cursor::new(col, row)
}

fn walk_greyscale(
    entries: &[ColorEntry],
    start: Cursor,
    mut place: impl FnMut(Cursor, &ColorEntry),
) -> Cursor {
    assert_eq!(
        entries.len(),
        GREYSCALE_LEN,
        "greyscale ramp must have {GREYSCALE_LEN} entries"
    );

    let Cursor { mut col, mut row } = start;

    for entry in entries {
        place(Cursor::new(col, row), entry);

        col += 1;
        if col % WIDTH == 0 {
            row += 1;
            col = 0;
        }
    }

    assert_eq!(
        row, GREYSCALE_END_ROW,
        "greyscale ramp must end on row {GREYSCALE_END_ROW}"
    );
    Cursor::new(col, row)
}

fn walk_basic(
    entries: &[ColorEntry],
    start: Cursor,
    mut place: impl FnMut(Cursor, &ColorEntry),
) -> Cursor {
    assert_eq!(
        entries.len(),
        BASIC_LEN,
        "basic palette must have {BASIC_LEN} entries"
    );

    let Cursor { mut col, mut row } = start;

    for entry in entries {
        place(Cursor::new(col, row), entry);

        col += 1;
        if col % BASIC_ROW_LEN == 0 {
            row += 1;
            col = 0;
        }
    }

    assert_eq!(row, BASIC_END_ROW, "basic palette must end on row {BASIC_END_ROW}");
    Cursor::new(col, row)
}
