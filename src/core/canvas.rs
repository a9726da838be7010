use super::render_target::RenderTarget;
use crate::math::Color;
use crate::resources::Tile;

/// Software RGBA framebuffer
#[derive(Clone)]
pub struct Canvas {
    /// RGBA pixel buffer
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some(Color::from_slice(&self.pixels[idx..idx + 4]))
    }

    /// Fill canvas with color
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Blend `color` over the pixel at (x, y); out of bounds is ignored
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let dst = Color::from_slice(&self.pixels[idx..idx + 4]);
        self.pixels[idx..idx + 4].copy_from_slice(&color.over(dst).to_array());
    }

    /// Blit a tile with its top-left corner at (left, top)
    pub fn blit(&mut self, tile: &Tile, left: i32, top: i32) {
        let view = tile.view();

        // Skip rows and columns that land outside the canvas
        let x0 = (-left).max(0) as u32;
        let y0 = (-top).max(0) as u32;
        let x1 = (self.width as i64 - left as i64).clamp(0, view.width() as i64) as u32;
        let y1 = (self.height as i64 - top as i64).clamp(0, view.height() as i64) as u32;

        for dy in y0..y1 {
            for dx in x0..x1 {
                if let Some(color) = view.pixel(dx, dy) {
                    self.blend_pixel(left + dx as i32, top + dy as i32, color);
                }
            }
        }
    }

    /// Resize, discarding contents
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
    }
}

impl RenderTarget for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        Canvas::dimensions(self)
    }

    fn clear(&mut self, color: Color) {
        self.fill(color);
    }

    fn draw_tile(&mut self, tile: &Tile, x: i32, y: i32) {
        let (off_x, off_y) = tile.offset();
        self.blit(tile, x - off_x, y - off_y);
    }

    fn present(&mut self) {}

    fn resize(&mut self, width: u32, height: u32) {
        Canvas::resize(self, width, height);
    }
}
