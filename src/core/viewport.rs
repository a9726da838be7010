use glam::{DAffine2, DVec2};

use super::display_config::DisplayConfig;

/// Camera over the isometric grid: pan offset, visible size and zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub x_zoom: f64,
    pub y_zoom: f64,
}

impl Viewport {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            x_zoom: 1.0,
            y_zoom: 1.0,
        }
    }

    /// Viewport of the given size with the grid origin in the centre
    pub fn centered(w: i32, h: i32) -> Self {
        Self::new(-w / 2, -h / 2, w, h)
    }

    pub fn with_zoom(mut self, x_zoom: f64, y_zoom: f64) -> Self {
        self.x_zoom = x_zoom;
        self.y_zoom = y_zoom;
        self
    }

    /// Pan by a pixel delta. Not clamped.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn resize(&mut self, w: i32, h: i32) {
        self.w = w;
        self.h = h;
    }

    /// False only if the rectangle lies entirely outside the zoomed view
    pub fn on_screen(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        let right = self.x + (self.w as f64 * self.x_zoom) as i32;
        let bottom = self.y + (self.h as f64 * self.y_zoom) as i32;

        !(x + w < self.x || x > right || y + h < self.y || y > bottom)
    }

    /// Tile space to screen space: scale by zoom, rotate, then translate by
    /// the negated pan offset
    pub fn transform(&self, config: &DisplayConfig) -> DAffine2 {
        DAffine2::from_scale_angle_translation(
            DVec2::new(self.x_zoom, self.y_zoom),
            config.isometric_rotation,
            DVec2::new(-self.x as f64, -self.y as f64),
        )
    }

    pub fn tile_to_screen(&self, tx: f64, ty: f64, config: &DisplayConfig) -> (f64, f64) {
        let p = self.transform(config).transform_point2(DVec2::new(tx, ty));
        (p.x, p.y)
    }

    /// Exact inverse of [`Viewport::tile_to_screen`]
    pub fn screen_to_tile(&self, sx: f64, sy: f64, config: &DisplayConfig) -> (f64, f64) {
        let p = self
            .transform(config)
            .inverse()
            .transform_point2(DVec2::new(sx, sy));
        (p.x, p.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
