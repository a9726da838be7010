//! Resource manager configuration
//!
//! Loaded once from `<dir>/resources.json` and consumed by
//! [`ResourceManager`](super::ResourceManager) construction.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::{ResourceError, Result};

/// File name of the config inside a resource directory
pub const CONFIG_FILE_NAME: &str = "resources.json";

/// Marker used in place of a font file name to request the builtin face
pub const BUILTIN_FONT: &str = "builtin";

/// A named crop of a source image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TileSpec {
    pub name: String,
    pub filename: PathBuf,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    /// Zero means "to the edge of the source"
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub h: u32,
    #[serde(default)]
    pub off_x: i32,
    #[serde(default)]
    pub off_y: i32,
}

impl TileSpec {
    pub fn new(name: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            x: 0,
            y: 0,
            w: 0,
            h: 0,
            off_x: 0,
            off_y: 0,
        }
    }

    pub fn with_crop(mut self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_offset(mut self, off_x: i32, off_y: i32) -> Self {
        self.off_x = off_x;
        self.off_y = off_y;
        self
    }
}

/// Where a font's glyphs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontSpec {
    pub name: String,
    /// Path to a TrueType file, or `"builtin"`
    pub filename: String,
    pub size: u32,
}

impl FontSpec {
    pub fn source(&self) -> FontSource {
        if self.filename == BUILTIN_FONT {
            FontSource::Builtin
        } else {
            FontSource::File(PathBuf::from(&self.filename))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceManagerConfig {
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
    #[serde(default)]
    pub fonts: Vec<FontSpec>,
}

impl ResourceManagerConfig {
    /// Read `<dir>/resources.json`, resolving relative file names against `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE_NAME);
        let text = std::fs::read_to_string(&path).map_err(|source| ResourceError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ResourceError::Config { path, source })?;
        Ok(config.rooted_at(dir))
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn rooted_at(mut self, dir: &Path) -> Self {
        for tile in &mut self.tiles {
            if tile.filename.is_relative() {
                tile.filename = dir.join(&tile.filename);
            }
        }
        for font in &mut self.fonts {
            if let FontSource::File(path) = font.source() {
                if path.is_relative() {
                    font.filename = dir.join(path).to_string_lossy().into_owned();
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_spec_defaults() {
        let config = ResourceManagerConfig::from_json(
            r#"{"tiles": [{"name": "grass", "filename": "tiles.png"}]}"#,
        )
        .unwrap();

        assert_eq!(config.tiles.len(), 1);
        assert_eq!(config.tiles[0], TileSpec::new("grass", "tiles.png"));
        assert!(config.fonts.is_empty());
    }

    #[test]
    fn test_font_source_builtin_marker() {
        let config = ResourceManagerConfig::from_json(
            r#"{"fonts": [
                {"name": "ui", "filename": "builtin", "size": 8},
                {"name": "title", "filename": "title.ttf", "size": 24}
            ]}"#,
        )
        .unwrap();

        assert_eq!(config.fonts[0].source(), FontSource::Builtin);
        assert_eq!(
            config.fonts[1].source(),
            FontSource::File(PathBuf::from("title.ttf"))
        );
    }

    #[test]
    fn test_relative_paths_rooted_at_dir() {
        let config = ResourceManagerConfig::from_json(
            r#"{
                "tiles": [{"name": "a", "filename": "a.png", "x": 4, "w": 16, "off_y": -3}],
                "fonts": [{"name": "ui", "filename": "builtin", "size": 8},
                          {"name": "body", "filename": "body.ttf", "size": 12}]
            }"#,
        )
        .unwrap()
        .rooted_at(Path::new("assets"));

        assert_eq!(config.tiles[0].filename, Path::new("assets").join("a.png"));
        assert_eq!(config.tiles[0].x, 4);
        assert_eq!(config.tiles[0].w, 16);
        assert_eq!(config.tiles[0].off_y, -3);
        assert_eq!(config.fonts[0].filename, BUILTIN_FONT);
        assert_eq!(
            PathBuf::from(&config.fonts[1].filename),
            Path::new("assets").join("body.ttf")
        );
    }

    #[test]
    fn test_load_missing_dir_is_io_error() {
        let err = ResourceManagerConfig::load("/definitely/not/a/resource/dir").unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }
}
