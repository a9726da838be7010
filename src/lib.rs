pub mod cli;
pub mod core;
pub mod demo;
pub mod math;
pub mod resources;

pub use crate::core::{
    DisplayConfig, DisplayEngine, DisplayError, DisplayEvent, DisplayHandle, GameEngine,
    RenderTarget, Viewport,
};
pub use crate::resources::{ResourceManager, Tile};
