use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{DisplayEvent, Key};

/// Translate a winit window event into the engine's event vocabulary
pub fn translate_event(event: &WindowEvent) -> Option<DisplayEvent> {
    match event {
        WindowEvent::CloseRequested => Some(DisplayEvent::Close),
        WindowEvent::Resized(size) => Some(DisplayEvent::Resize {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => Some(DisplayEvent::Close),
                PhysicalKey::Code(code) => Some(DisplayEvent::Key(keycode_to_key(code))),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Map winit KeyCode to Key
pub fn keycode_to_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Key::Left,
        KeyCode::ArrowRight | KeyCode::KeyD => Key::Right,
        KeyCode::ArrowUp | KeyCode::KeyW => Key::Up,
        KeyCode::ArrowDown | KeyCode::KeyS => Key::Down,
        _ => Key::Other,
    }
}
