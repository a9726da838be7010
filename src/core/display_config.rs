use super::error::DisplayError;
use crate::math::Color;

/// Rotation applied by the viewport's tile-to-screen transform, in radians
pub const DEFAULT_ISOMETRIC_ROTATION: f64 = 3.0 * std::f64::consts::PI / 8.0;

/// Grid and tile geometry - supplied once by the game at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Grid width in cells
    pub map_w: usize,
    /// Grid height in cells
    pub map_h: usize,
    /// Tile width in pixels
    pub tile_w: i32,
    /// Tile height in pixels
    pub tile_h: i32,
    /// Fill colour for each new frame
    pub background: Color,
    /// Radians; matches the tile art's projection
    pub isometric_rotation: f64,
}

impl DisplayConfig {
    pub fn new(map_w: usize, map_h: usize, tile_w: i32, tile_h: i32) -> Self {
        Self {
            map_w,
            map_h,
            tile_w,
            tile_h,
            background: Color::BLACK,
            isometric_rotation: DEFAULT_ISOMETRIC_ROTATION,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.isometric_rotation = radians;
        self
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.map_w * self.map_h
    }

    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.map_w == 0 || self.map_h == 0 {
            return Err(DisplayError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.map_w, self.map_h
            )));
        }
        if self.tile_w <= 0 || self.tile_h <= 0 {
            return Err(DisplayError::InvalidConfig(format!(
                "tile size must be positive, got {}x{}",
                self.tile_w, self.tile_h
            )));
        }
        Ok(())
    }

    /// Pixel anchor of cell `(x, y)` before the viewport offset is applied
    pub fn cell_anchor(&self, x: usize, y: usize) -> (i32, i32) {
        let (x, y) = (x as i32, y as i32);
        let px = (y - x) * self.tile_w / 2;
        let py = (x + y) * self.tile_h / 2;
        (px, py)
    }
}
