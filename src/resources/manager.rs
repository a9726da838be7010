//! Name-addressed tile and font cache backed by a single packed atlas.

use image::RgbaImage;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

use super::atlas::{sanitize_crop, Atlas};
use super::config::{FontSource, ResourceManagerConfig, TileSpec};
use super::error::{ResourceError, Result};
use super::font::Font;
use super::tile::{Tile, TileView};
use crate::math::Rect;

pub const DEFAULT_TILE_NAME: &str = "____DEFAULT____";
pub const DEFAULT_TILE_WIDTH: u32 = 128;
pub const DEFAULT_TILE_HEIGHT: u32 = 128;

/// Source of tile bitmaps
pub trait BitmapLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage>;
}

/// Decodes bitmaps from disk with the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileLoader;

impl BitmapLoader for ImageFileLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        image::open(path)
            .map(|img| img.to_rgba8())
            .map_err(|source| ResourceError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Placement of one tile inside the atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMetadata {
    pub index: usize,
    pub rect: Rect,
    pub off_x: i32,
    pub off_y: i32,
    pub name: String,
}

pub struct ResourceManager {
    atlas: Atlas,
    metadata: Vec<TileMetadata>,
    positions: HashMap<String, usize>,
    views: HashMap<String, TileView>,
    fonts: HashMap<String, Font>,
}

impl ResourceManager {
    /// Build from `<dir>/resources.json`, decoding images from disk
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config = ResourceManagerConfig::load(dir)?;
        Self::new(config)
    }

    pub fn new(config: ResourceManagerConfig) -> Result<Self> {
        Self::with_loader(config, &ImageFileLoader)
    }

    pub fn with_loader(config: ResourceManagerConfig, loader: &dyn BitmapLoader) -> Result<Self> {
        let mut specs = config.tiles;
        specs.push(TileSpec::new(DEFAULT_TILE_NAME, DEFAULT_TILE_NAME));

        let mut sources = Vec::with_capacity(specs.len());
        let mut crops = Vec::with_capacity(specs.len());
        let mut offsets = Vec::with_capacity(specs.len());

        for spec in &specs {
            let bitmap = if spec.name == DEFAULT_TILE_NAME {
                RgbaImage::new(DEFAULT_TILE_WIDTH, DEFAULT_TILE_HEIGHT)
            } else {
                loader.load(&spec.filename)?
            };

            let (crop, off_x, off_y) = sanitize_crop(spec, bitmap.width(), bitmap.height());
            sources.push(bitmap);
            crops.push(crop);
            offsets.push((off_x, off_y));
        }

        let (atlas, placements) = Atlas::pack(&sources, &crops);
        drop(sources);

        let metadata: Vec<TileMetadata> = specs
            .into_iter()
            .zip(placements)
            .zip(offsets)
            .enumerate()
            .map(|(index, ((spec, rect), (off_x, off_y)))| TileMetadata {
                index,
                rect,
                off_x,
                off_y,
                name: spec.name,
            })
            .collect();

        let mut positions = HashMap::with_capacity(metadata.len());
        let mut views = HashMap::with_capacity(metadata.len());
        for meta in &metadata {
            positions.insert(meta.name.clone(), meta.index);
            views.insert(meta.name.clone(), atlas.view(meta.rect));
        }

        let fonts = load_fonts(&config.fonts);

        let (w, h) = atlas.dimensions();
        debug!("Packed {} tiles into {}x{} atlas, {} fonts", metadata.len(), w, h, fonts.len());

        Ok(Self {
            atlas,
            metadata,
            positions,
            views,
            fonts,
        })
    }

    /// Look up a tile by name. No default substitution.
    pub fn get_tile(&self, name: &str) -> Option<Tile> {
        let meta = &self.metadata[*self.positions.get(name)?];
        let view = match self.views.get(name) {
            Some(view) => view.clone(),
            None => self.atlas.view(meta.rect),
        };
        Some(Tile::new(view, meta.off_x, meta.off_y))
    }

    /// The reserved blank tile. Always present after construction.
    pub fn get_default_tile(&self) -> Tile {
        self.get_tile(DEFAULT_TILE_NAME)
            .unwrap_or_else(|| panic!("default tile {DEFAULT_TILE_NAME:?} missing from atlas"))
    }

    /// Look up a tile, falling back to the default tile on a miss
    pub fn get_tile_or_default(&self, name: &str) -> Tile {
        match self.get_tile(name) {
            Some(tile) => tile,
            None => {
                warn!("Could not find tile named {name:?}, using default tile");
                self.get_default_tile()
            }
        }
    }

    pub fn get_font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn metadata(&self, name: &str) -> Option<&TileMetadata> {
        self.positions.get(name).map(|&i| &self.metadata[i])
    }

    /// All packed tiles in atlas order, default tile included
    pub fn tiles(&self) -> &[TileMetadata] {
        &self.metadata
    }

    pub fn tile_names(&self) -> impl Iterator<Item = &str> {
        self.metadata.iter().map(|meta| meta.name.as_str())
    }

    pub fn tile_count(&self) -> usize {
        self.metadata.len()
    }
}

fn load_fonts(specs: &[super::config::FontSpec]) -> HashMap<String, Font> {
    let mut fonts = HashMap::with_capacity(specs.len());
    for spec in specs {
        let font = match spec.source() {
            FontSource::Builtin => Font::builtin(spec.size),
            FontSource::File(path) => match Font::load(&path, spec.size) {
                Ok(font) => font,
                Err(e) => {
                    warn!("Skipping font {:?}: {}", spec.name, e);
                    continue;
                }
            },
        };
        fonts.insert(spec.name.clone(), font);
    }
    fonts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::config::FontSpec;
    use image::Rgba;
    use std::path::PathBuf;

    /// Serves solid bitmaps sized by file name: "WxH.png"
    struct SizedLoader;

    impl BitmapLoader for SizedLoader {
        fn load(&self, path: &Path) -> Result<RgbaImage> {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("1x1");
            let (w, h) = stem.split_once('x').unwrap();
            Ok(RgbaImage::from_pixel(
                w.parse().unwrap(),
                h.parse().unwrap(),
                Rgba([10, 20, 30, 255]),
            ))
        }
    }

    fn manager(tiles: Vec<TileSpec>) -> ResourceManager {
        let config = ResourceManagerConfig {
            tiles,
            fonts: Vec::new(),
        };
        ResourceManager::with_loader(config, &SizedLoader).unwrap()
    }

    #[test]
    fn default_tile_is_appended_last() {
        let rm = manager(vec![TileSpec::new("grass", "64x32.png")]);

        assert_eq!(rm.tile_count(), 2);
        let default = rm.metadata(DEFAULT_TILE_NAME).unwrap();
        assert_eq!(default.index, 1);
        assert_eq!(default.rect, Rect::new(64, 0, 128, 128));
    }

    #[test]
    fn empty_config_still_resolves_default() {
        let rm = manager(Vec::new());
        let tile = rm.get_default_tile();
        assert_eq!((tile.width(), tile.height()), (128, 128));
        assert_eq!(rm.atlas().dimensions(), (128, 128));
    }

    #[test]
    fn get_tile_returns_view_and_offset() {
        let rm = manager(vec![TileSpec::new("tree", "32x64.png").with_offset(0, 48)]);

        let tile = rm.get_tile("tree").unwrap();
        assert_eq!(tile.region(), Rect::new(0, 0, 32, 64));
        assert_eq!(tile.offset(), (0, 48));
        assert_eq!(tile.view().pixel(0, 0).unwrap().to_array(), [10, 20, 30, 255]);
    }

    #[test]
    fn views_share_the_atlas() {
        let rm = manager(vec![TileSpec::new("a", "8x8.png"), TileSpec::new("b", "8x8.png")]);
        let a = rm.get_tile("a").unwrap();
        let b = rm.get_tile("b").unwrap();
        assert!(a.view().shares_atlas(b.view()));
    }

    #[test]
    fn unknown_tile_is_a_soft_miss() {
        let rm = manager(Vec::new());
        assert!(rm.get_tile("nope").is_none());
        assert_eq!(rm.get_tile_or_default("nope").region(), rm.get_default_tile().region());
    }

    #[test]
    fn missing_image_fails_construction() {
        let config = ResourceManagerConfig {
            tiles: vec![TileSpec::new("x", PathBuf::from("/no/such/file.png"))],
            fonts: Vec::new(),
        };
        let err = ResourceManager::new(config).err().unwrap();
        assert!(matches!(err, ResourceError::Image { .. }));
    }

    #[test]
    fn fonts_register_builtin_and_skip_failures() {
        let config = ResourceManagerConfig {
            tiles: Vec::new(),
            fonts: vec![
                FontSpec {
                    name: "ui".into(),
                    filename: "builtin".into(),
                    size: 8,
                },
                FontSpec {
                    name: "broken".into(),
                    filename: "/no/such/font.ttf".into(),
                    size: 12,
                },
            ],
        };
        let rm = ResourceManager::with_loader(config, &SizedLoader).unwrap();

        assert!(rm.get_font("ui").unwrap().is_builtin());
        assert!(rm.get_font("broken").is_none());
        assert!(rm.get_font("missing").is_none());
    }
}
