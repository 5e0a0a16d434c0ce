use serde::{Deserialize, Serialize};
use std::path::Path;

use super::color::{ColorEntry, Rgb};
use crate::error::FixtureError;

/// Entries in the 6x6x6 color cube (indices 16-231).
pub const CUBE_LEN: usize = 216;
/// Entries in the greyscale ramp (indices 232-255).
pub const GREYSCALE_LEN: usize = 24;
/// Basic ANSI colors plus bright variants (indices 0-15).
pub const BASIC_LEN: usize = 16;

pub const CUBE_KEY: &str = ":xterm256";
pub const GREYSCALE_KEY: &str = ":xtermGreyscale";
pub const BASIC_KEY: &str = ":xterm16";

/// Color source file read when none is given on the command line.
pub const DEFAULT_COLORS_FILE: &str = "xterm-256color.yaml";

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const BASIC_COLORS: [(&str, Rgb); BASIC_LEN] = [
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("red", Rgb::new(0xcd, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0xcd, 0x00)),
    ("yellow", Rgb::new(0xcd, 0xcd, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xee)),
    ("magenta", Rgb::new(0xcd, 0x00, 0xcd)),
    ("cyan", Rgb::new(0x00, 0xcd, 0xcd)),
    ("white", Rgb::new(0xe5, 0xe5, 0xe5)),
    ("brightblack", Rgb::new(0x7f, 0x7f, 0x7f)),
    ("brightred", Rgb::new(0xff, 0x00, 0x00)),
    ("brightgreen", Rgb::new(0x00, 0xff, 0x00)),
    ("brightyellow", Rgb::new(0xff, 0xff, 0x00)),
    ("brightblue", Rgb::new(0x5c, 0x5c, 0xff)),
    ("brightmagenta", Rgb::new(0xff, 0x00, 0xff)),
    ("brightcyan", Rgb::new(0x00, 0xff, 0xff)),
    ("brightwhite", Rgb::new(0xff, 0xff, 0xff)),
];

/// On-disk layout of the color source: three lists of `[name, "#RRGGBB"]`.
///
/// Items are kept as raw YAML values so unquoted numeric names (`- [0, '#000000']`)
/// are accepted and malformed items can be reported by position.
#[derive(Debug, Deserialize)]
struct ColorFile {
    #[serde(rename = ":xterm256")]
    cube: Option<Vec<Vec<serde_yaml::Value>>>,

    #[serde(rename = ":xtermGreyscale")]
    greyscale: Option<Vec<Vec<serde_yaml::Value>>>,

    #[serde(rename = ":xterm16")]
    basic: Option<Vec<Vec<serde_yaml::Value>>>,
}

#[derive(Debug, Serialize)]
struct ColorFileOut {
    #[serde(rename = ":xterm256")]
    cube: Vec<(String, String)>,

    #[serde(rename = ":xtermGreyscale")]
    greyscale: Vec<(String, String)>,

    #[serde(rename = ":xterm16")]
    basic: Vec<(String, String)>,
}

/// The three ordered color groups that make up the 256-color table.
///
/// Group lengths are not checked here: the layout asserts on them, so a
/// short or long group fails loudly instead of being padded or truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGroups {
    pub cube: Vec<ColorEntry>,
    pub greyscale: Vec<ColorEntry>,
    pub basic: Vec<ColorEntry>,
}

impl PaletteGroups {
    /// Load groups from a YAML color file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let groups = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            cube = groups.cube.len(),
            greyscale = groups.greyscale.len(),
            basic = groups.basic.len(),
            "Loaded color source"
        );
        Ok(groups)
    }

    /// Parse groups from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, FixtureError> {
        let file: ColorFile = serde_yaml::from_str(content)?;

        Ok(Self {
            cube: parse_group(CUBE_KEY, file.cube)?,
            greyscale: parse_group(GREYSCALE_KEY, file.greyscale)?,
            basic: parse_group(BASIC_KEY, file.basic)?,
        })
    }

    /// Serialize back to the color file format.
    pub fn to_yaml_string(&self) -> Result<String, FixtureError> {
        let pairs = |entries: &[ColorEntry]| -> Vec<(String, String)> {
            entries
                .iter()
                .map(|e| (e.name.clone(), e.rgb.to_string()))
                .collect()
        };
        let out = ColorFileOut {
            cube: pairs(&self.cube),
            greyscale: pairs(&self.greyscale),
            basic: pairs(&self.basic),
        };
        Ok(serde_yaml::to_string(&out)?)
    }

    /// The standard xterm 256-color palette.
    ///
    /// The cube is ordered red-major, then blue, with green varying fastest,
    /// matching the shipped `xterm-256color.yaml`.
    pub fn xterm() -> Self {
        let mut cube = Vec::with_capacity(CUBE_LEN);
        for &r in &CUBE_LEVELS {
            for &b in &CUBE_LEVELS {
                for &g in &CUBE_LEVELS {
                    cube.push(ColorEntry::new(cube.len().to_string(), Rgb::new(r, g, b)));
                }
            }
        }

        let greyscale = (0..GREYSCALE_LEN as u8)
            .map(|i| {
                let v = 8 + i * 10;
                ColorEntry::new(i.to_string(), Rgb::new(v, v, v))
            })
            .collect();

        let basic = BASIC_COLORS
            .iter()
            .map(|&(name, rgb)| ColorEntry::new(name, rgb))
            .collect();

        Self {
            cube,
            greyscale,
            basic,
        }
    }

    /// All entries in layout order: cube, greyscale, basic.
    pub fn entries(&self) -> impl Iterator<Item = &ColorEntry> {
        self.cube
            .iter()
            .chain(self.greyscale.iter())
            .chain(self.basic.iter())
    }

    pub fn len(&self) -> usize {
        self.cube.len() + self.greyscale.len() + self.basic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_group(
    group: &'static str,
    items: Option<Vec<Vec<serde_yaml::Value>>>,
) -> Result<Vec<ColorEntry>, FixtureError> {
    let items = items.ok_or(FixtureError::MissingGroup(group))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let malformed = || FixtureError::MalformedEntry { group, index };
            let [name, value]: [serde_yaml::Value; 2] =
                item.try_into().map_err(|_| malformed())?;

            let name = match name {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => return Err(malformed()),
            };
            let hex = value.as_str().ok_or_else(malformed)?;
            let rgb = hex.parse::<Rgb>().map_err(|source| FixtureError::Color {
                group,
                name: name.clone(),
                source,
            })?;

            Ok(ColorEntry { name, rgb })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParseColorError;

    const SMALL: &str = r##"
":xterm256":
  - ["0", "#000000"]
  - [1, "#005f00"]
":xtermGreyscale":
  - ["0", "#080808"]
":xterm16":
  - [black, "#000000"]
  - [red, "#CD0000"]
"##;

    #[test]
    fn test_parse_small_file() {
        let groups = PaletteGroups::from_yaml_str(SMALL).unwrap();

        assert_eq!(groups.cube.len(), 2);
        assert_eq!(groups.cube[0], ColorEntry::new("0", Rgb::new(0, 0, 0)));
        assert_eq!(groups.cube[1], ColorEntry::new("1", Rgb::new(0, 95, 0)));
        assert_eq!(groups.greyscale[0].rgb, Rgb::new(8, 8, 8));
        assert_eq!(groups.basic[1], ColorEntry::new("red", Rgb::new(205, 0, 0)));
        assert_eq!(groups.len(), 5);
    }

    #[test]
    fn test_missing_group() {
        let yaml = r##"
":xterm256": []
":xterm16": []
"##;
        let err = PaletteGroups::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, FixtureError::MissingGroup(GREYSCALE_KEY)));
    }

    #[test]
    fn test_malformed_entry() {
        let yaml = r##"
":xterm256": [["0", "#000000"], ["1"]]
":xtermGreyscale": []
":xterm16": []
"##;
        let err = PaletteGroups::from_yaml_str(yaml).unwrap_err();
        match err {
            FixtureError::MalformedEntry { group, index } => {
                assert_eq!(group, CUBE_KEY);
                assert_eq!(index, 1);
            }
            other => panic!("Expected MalformedEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_hex() {
        let yaml = r##"
":xterm256": []
":xtermGreyscale": []
":xterm16": [[red, "#GG0000"]]
"##;
        let err = PaletteGroups::from_yaml_str(yaml).unwrap_err();
        match err {
            FixtureError::Color {
                group,
                name,
                source,
            } => {
                assert_eq!(group, BASIC_KEY);
                assert_eq!(name, "red");
                assert!(matches!(source, ParseColorError::InvalidHex(_)));
            }
            other => panic!("Expected Color error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_yaml_mapping() {
        let err = PaletteGroups::from_yaml_str("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, FixtureError::Yaml(_)));
    }

    #[test]
    fn test_xterm_palette_shape() {
        let groups = PaletteGroups::xterm();

        assert_eq!(groups.cube.len(), CUBE_LEN);
        assert_eq!(groups.greyscale.len(), GREYSCALE_LEN);
        assert_eq!(groups.basic.len(), BASIC_LEN);
        assert_eq!(groups.len(), 256);

        assert_eq!(groups.cube[0].name, "0");
        assert_eq!(groups.cube[0].rgb, Rgb::new(0, 0, 0));
        assert_eq!(groups.cube[1].rgb, Rgb::new(0, 95, 0));
        assert_eq!(groups.cube[215].rgb, Rgb::new(255, 255, 255));
        assert_eq!(groups.greyscale[0].rgb, Rgb::new(8, 8, 8));
        assert_eq!(groups.greyscale[23].rgb, Rgb::new(238, 238, 238));
        assert_eq!(groups.basic[12].name, "brightblue");
    }

    #[test]
    fn test_yaml_round_trip() {
        let groups = PaletteGroups::xterm();
        let yaml = groups.to_yaml_string().unwrap();
        assert!(yaml.contains(":xtermGreyscale"));
        assert_eq!(PaletteGroups::from_yaml_str(&yaml).unwrap(), groups);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PaletteGroups::load("/nonexistent/xterm-256color.yaml").unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
