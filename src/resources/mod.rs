//! Atlas-packed tile and font resources

mod atlas;
mod config;
mod error;
mod font;
mod manager;
mod tile;

pub use atlas::{sanitize_crop, Atlas};
pub use config::{FontSource, FontSpec, ResourceManagerConfig, TileSpec, BUILTIN_FONT, CONFIG_FILE_NAME};
pub use error::ResourceError;
pub use font::{Font, BUILTIN_GLYPH_SIZE};
pub use manager::{
    BitmapLoader, ImageFileLoader, ResourceManager, TileMetadata, DEFAULT_TILE_HEIGHT,
    DEFAULT_TILE_NAME, DEFAULT_TILE_WIDTH,
};
pub use tile::{Tile, TileView};
