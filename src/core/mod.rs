//! Display engine: frame pacing, draw ordering and presentation

mod canvas;
mod controller;
mod display_config;
mod engine;
mod error;
mod frame;
mod frame_gate;
mod game;
mod input_adapter;
mod render_target;
mod surface_renderer;
mod sweep;
mod timer;
mod viewport;

pub use canvas::Canvas;
pub use controller::{DisplayEvent, Key, SCROLL_SPEED};
pub use display_config::{DisplayConfig, DEFAULT_ISOMETRIC_ROTATION};
pub use engine::{DisplayEngine, DisplayHandle};
pub use error::DisplayError;
pub use frame::{Frame, FrameBuffer, SharedFrame};
pub use frame_gate::{FrameGate, FramePermit};
pub use game::GameEngine;
pub use input_adapter::{keycode_to_key, translate_event};
pub use render_target::RenderTarget;
pub use surface_renderer::SurfaceRenderer;
pub use sweep::{diagonal_sweep, draw_frame, DiagonalSweep, FrameStats, TileGrid};
pub use timer::{FpsMeter, FramePacer};
pub use viewport::Viewport;
