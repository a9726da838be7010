use image::RgbaImage;
use std::sync::Arc;

use crate::math::{Color, Rect};

/// A window onto the atlas pixels. Cloning shares the atlas, never the pixels.
#[derive(Debug, Clone)]
pub struct TileView {
    atlas: Arc<RgbaImage>,
    region: Rect,
}

impl TileView {
    pub(crate) fn new(atlas: Arc<RgbaImage>, region: Rect) -> Self {
        Self { atlas, region }
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn width(&self) -> u32 {
        self.region.w
    }

    pub fn height(&self) -> u32 {
        self.region.h
    }

    /// Pixel at `(x, y)` relative to the view's top-left corner
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.region.w || y >= self.region.h {
            return None;
        }
        let px = self.atlas.get_pixel(self.region.x + x, self.region.y + y);
        Some(Color::from_slice(&px.0))
    }

    /// True if both views point into the same atlas allocation
    pub fn shares_atlas(&self, other: &TileView) -> bool {
        Arc::ptr_eq(&self.atlas, &other.atlas)
    }
}

/// A drawable sprite: an atlas view plus the offset applied when drawing it
#[derive(Debug, Clone)]
pub struct Tile {
    view: TileView,
    off_x: i32,
    off_y: i32,
}

impl Tile {
    pub fn new(view: TileView, off_x: i32, off_y: i32) -> Self {
        Self { view, off_x, off_y }
    }

    pub fn view(&self) -> &TileView {
        &self.view
    }

    pub fn region(&self) -> Rect {
        self.view.region()
    }

    pub fn width(&self) -> u32 {
        self.view.width()
    }

    pub fn height(&self) -> u32 {
        self.view.height()
    }

    /// Draw offset: the sprite's top-left lands at `(x - off_x, y - off_y)`
    pub fn offset(&self) -> (i32, i32) {
        (self.off_x, self.off_y)
    }
}
