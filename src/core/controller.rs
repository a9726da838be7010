/// Pixels the viewport pans per arrow key press
pub const SCROLL_SPEED: i32 = 10;

/// Keys the display engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Other,
}

impl Key {
    /// Viewport pan for one press of this key
    pub fn scroll_delta(self) -> (i32, i32) {
        match self {
            Key::Left => (-SCROLL_SPEED, 0),
            Key::Right => (SCROLL_SPEED, 0),
            Key::Up => (0, -SCROLL_SPEED),
            Key::Down => (0, SCROLL_SPEED),
            Key::Other => (0, 0),
        }
    }
}

/// Window and input events consumed by the engine's event task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The window was asked to close
    Close,
    /// The drawable area changed size
    Resize { width: u32, height: u32 },
    /// A key was pressed (or auto-repeated)
    Key(Key),
}
