use std::sync::{Arc, Mutex, PoisonError};

use super::canvas::Canvas;
use super::render_target::RenderTarget;
use crate::math::Color;
use crate::resources::Tile;

/// Completed frame pixels shared with the presenter
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub number: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

pub type SharedFrame = Arc<Mutex<Frame>>;

type PresentHook = Box<dyn Fn() + Send>;

/// Double-buffered software target. Draws land in a back `Canvas`;
/// `present` publishes them to the shared front frame and fires the hook.
pub struct FrameBuffer {
    back: Canvas,
    front: SharedFrame,
    on_present: Option<PresentHook>,
    presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back: Canvas::new(width, height),
            front: Arc::new(Mutex::new(Frame {
                number: 0,
                width,
                height,
                pixels: vec![0; (width * height * 4) as usize],
            })),
            on_present: None,
            presented: 0,
        }
    }

    /// Run `hook` after every present
    pub fn with_present_hook(mut self, hook: impl Fn() + Send + 'static) -> Self {
        self.on_present = Some(Box::new(hook));
        self
    }

    /// Handle to the last presented frame
    pub fn front(&self) -> SharedFrame {
        Arc::clone(&self.front)
    }

    pub fn back(&self) -> &Canvas {
        &self.back
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl RenderTarget for FrameBuffer {
    fn dimensions(&self) -> (u32, u32) {
        self.back.dimensions()
    }

    fn clear(&mut self, color: Color) {
        self.back.fill(color);
    }

    fn draw_tile(&mut self, tile: &Tile, x: i32, y: i32) {
        RenderTarget::draw_tile(&mut self.back, tile, x, y);
    }

    fn present(&mut self) {
        self.presented += 1;
        {
            let mut front = self.front.lock().unwrap_or_else(PoisonError::into_inner);
            let (width, height) = self.back.dimensions();
            front.number = self.presented;
            front.width = width;
            front.height = height;
            front.pixels.clear();
            front.pixels.extend_from_slice(self.back.pixels());
        }
        if let Some(hook) = &self.on_present {
            hook();
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.back.resize(width, height);
    }
}
