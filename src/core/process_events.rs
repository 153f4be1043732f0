//! Keyboard and mouse sampling into a plain per-frame snapshot.
use raylib::prelude::*;

/// Everything the level update reads from the devices in one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Edge-triggered: true only on the frame the key went down.
    pub toggle_flashlight: bool,
    /// Pointer position in world coordinates.
    pub pointer: Vector2,
    /// Continue key on the completed screen.
    pub confirm: bool,
}

pub fn process_events(window: &RaylibHandle) -> FrameInput {
    FrameInput {
        up: window.is_key_down(KeyboardKey::KEY_W),
        down: window.is_key_down(KeyboardKey::KEY_S),
        left: window.is_key_down(KeyboardKey::KEY_A),
        right: window.is_key_down(KeyboardKey::KEY_D),
        sprint: window.is_key_down(KeyboardKey::KEY_LEFT_SHIFT)
            || window.is_key_down(KeyboardKey::KEY_RIGHT_SHIFT),
        toggle_flashlight: window.is_key_pressed(KeyboardKey::KEY_F),
        pointer: window.get_mouse_position(),
        confirm: window.is_key_pressed(KeyboardKey::KEY_SPACE),
    }
}
