#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use isometric_renderer::resources::{
    BitmapLoader, ResourceError, ResourceManager, ResourceManagerConfig, TileSpec,
};
use std::path::Path;

/// Serves bitmaps named `WxH-R.png`: a W by H image whose red channel is R
/// and whose green/blue channels encode the pixel position
pub struct PatternLoader;

impl BitmapLoader for PatternLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, ResourceError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let (size, red) = stem.split_once('-').unwrap_or((stem, "0"));
        let (w, h) = size.split_once('x').expect("file name must be WxH-R");
        let (w, h): (u32, u32) = (w.parse().unwrap(), h.parse().unwrap());
        let red: u8 = red.parse().unwrap();
        Ok(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([red, x as u8, y as u8, 255])
        }))
    }
}

pub fn manager(tiles: Vec<TileSpec>) -> ResourceManager {
    let config = ResourceManagerConfig {
        tiles,
        fonts: Vec::new(),
    };
    ResourceManager::with_loader(config, &PatternLoader).unwrap()
}
