use super::types::{InputEvent, PointerButtonEvent};

/// Current pointer state for the window.
///
/// Button events from the platform carry no position; the runtime fills it
/// in from `pointer_pos`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels (top-left origin).
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y }
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Key { .. } | InputEvent::Text(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, MouseButton};

    #[test]
    fn tracks_pointer_until_it_leaves() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));

        s.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            x: 12.0,
            y: 21.0,
        }));
        assert_eq!(s.pointer_pos, Some((12.0, 21.0)));

        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
