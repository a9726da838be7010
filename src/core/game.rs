use super::display_config::DisplayConfig;
use super::engine::DisplayHandle;
use crate::resources::Tile;

/// Game abstraction - supplies the grid contents the display engine draws
pub trait GameEngine: Send + Sync {
    /// Grid and tile geometry. Asked once, at engine construction.
    fn display_config(&self) -> DisplayConfig;

    /// Sprite stack for cell `(x, y)`, bottom first. Called once per cell
    /// per frame from the render thread; an empty stack draws nothing.
    fn tile(&self, x: usize, y: usize) -> Vec<Tile>;

    /// Register the display engine with the game
    fn register_display_engine(&self, handle: DisplayHandle);

    /// Called once `run` has stopped and the last frame has finished
    fn game_finished(&self) {}
}
