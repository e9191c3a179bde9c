/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Escape,
    MouseLeft,
    MouseRight,
}

/// Controller - input state polled once per frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Cursor travel in pixels since the last reset
    fn mouse_delta(&self) -> (f32, f32);

    /// Wheel lines since the last reset, positive away from the user
    fn scroll_delta(&self) -> f32;
}
