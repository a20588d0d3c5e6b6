/// Keys the demo reacts to. Everything else is `Other`.
///
/// Text entry does not go through this enum; printable input arrives as the
/// `text` of a key press or as an IME commit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Pointer button event in window coordinates (logical pixels, top-left origin).
///
/// The position is the last tracked pointer position, since the platform
/// does not report one with button events.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerButton(PointerButtonEvent),
    /// Pointer left the window surface.
    PointerLeft,
    Key {
        key: Key,
        state: ButtonState,
        /// Text produced by the press, if any.
        text: Option<String>,
    },
    /// Committed IME text.
    Text(String),
}

impl InputEvent {
    /// Position of a left-button press, if this is one.
    pub fn left_click(&self) -> Option<(f32, f32)> {
        match self {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: ButtonState::Pressed,
                x,
                y,
            }) => Some((*x, *y)),
            _ => None,
        }
    }

    /// True for a press of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(self, InputEvent::Key { key: k, state: ButtonState::Pressed, .. } if *k == key)
    }

    /// Printable text carried by this event.
    pub fn text(&self) -> Option<&str> {
        match self {
            InputEvent::Key { state: ButtonState::Pressed, text: Some(t), .. } => Some(t.as_str()),
            InputEvent::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}
