use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Cursor travel in pixels above which a left press is a drag, not a click
pub const CLICK_DRAG_THRESHOLD: f32 = 3.0;

/// Pixels per wheel line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
    /// Where the left button went down and how far the cursor has traveled since
    press_origin: Option<(f32, f32)>,
    press_travel: f32,
    pending_click: Option<(f32, f32)>,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Escape) = event.physical_key {
                    self.set_button(Button::Escape, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.set_button(btn, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor((position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.cursor_left(),
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(button),
            ElementState::Released => self.release(button),
        }
    }

    pub fn press(&mut self, button: Button) {
        if self.pressed_keys.insert(button) && button == Button::MouseLeft {
            self.press_origin = self.mouse_position;
            self.press_travel = 0.0;
        }
    }

    pub fn release(&mut self, button: Button) {
        if !self.pressed_keys.remove(&button) {
            return;
        }

        if button == Button::MouseLeft {
            if let (Some(_), Some(position)) = (self.press_origin.take(), self.mouse_position) {
                if self.press_travel <= CLICK_DRAG_THRESHOLD {
                    self.pending_click = Some(position);
                }
            }
        }
    }

    /// A release that landed on the UI: the button comes up but never clicks
    pub fn release_over_ui(&mut self, button: Button) {
        self.release(button);
        self.pending_click = None;
    }

    /// Feed an event the UI consumed. Only button releases get through, so a
    /// drag that started in the viewport still ends.
    pub fn process_consumed_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } = event
        {
            if let Some(btn) = Self::mouse_button_to_button(*button) {
                self.release_over_ui(btn);
            }
        }
    }

    pub fn move_cursor(&mut self, new_pos: (f32, f32)) {
        if let Some(old_pos) = self.mouse_position {
            let delta = (new_pos.0 - old_pos.0, new_pos.1 - old_pos.1);
            self.mouse_delta.0 += delta.0;
            self.mouse_delta.1 += delta.1;
            if self.press_origin.is_some() {
                self.press_travel += (delta.0 * delta.0 + delta.1 * delta.1).sqrt();
            }
        }
        self.mouse_position = Some(new_pos);
    }

    /// Cursor left the window: forget its position and any half-made click
    pub fn cursor_left(&mut self) {
        self.mouse_position = None;
        self.press_origin = None;
    }

    fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.press_origin = None;
    }

    /// Position of the last completed click, if any. Consumed on read.
    pub fn take_click(&mut self) -> Option<(f32, f32)> {
        self.pending_click.take()
    }

    /// Reset per-frame state (mouse and scroll deltas)
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}
