//! Raw input events and key mapping

/// Keys that drive the keyboard paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Input as delivered by the platform, before it touches any paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer Y relative to the top of the playfield
    PointerMoved { y: f32 },
    KeyDown(Key),
    KeyUp(Key),
}

/// Whether a key press in a name field should start the game
pub fn is_start_key(key: &str) -> bool {
    key == "Enter"
}
