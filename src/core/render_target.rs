use crate::math::Color;
use crate::resources::Tile;

/// Surface the sweep draws into
pub trait RenderTarget: Send {
    /// Drawable size in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Fill the whole target
    fn clear(&mut self, color: Color);

    /// Draw `tile` anchored at screen position `(x, y)`; the tile's draw
    /// offset is subtracted from the anchor
    fn draw_tile(&mut self, tile: &Tile, x: i32, y: i32);

    /// Make the finished frame visible
    fn present(&mut self);

    /// Acknowledge a resize of the underlying surface
    fn resize(&mut self, _width: u32, _height: u32) {}
}
