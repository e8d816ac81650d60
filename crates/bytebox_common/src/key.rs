/// Host keyboard keys, independent of any windowing backend.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    A,
    D,
    K,
    L,
    S,
    W,
    X,
    Z,
    NumpadMultiply,
    NumpadSubtract,
    Left,
    Right,
    Up,
    Down,
    Escape,
    None,
}

impl Key {
    /// Parses the key names used by scripted input, e.g. `"left"` or `"z"`.
    pub fn from_name(name: &str) -> Key {
        match name.to_ascii_lowercase().as_str() {
            "a" => Key::A,
            "d" => Key::D,
            "k" => Key::K,
            "l" => Key::L,
            "s" => Key::S,
            "w" => Key::W,
            "x" => Key::X,
            "z" => Key::Z,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "esc" | "escape" => Key::Escape,
            _ => Key::None,
        }
    }
}
