//! Translates winit window events into immui input.

use immui_foundation::{InputState, Key, PointerButton};
use immui_ui_graphics::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};

/// Pixel deltas from touchpads are converted to wheel notches at this rate.
pub const PIXELS_PER_NOTCH: f64 = 40.0;

/// Input produced by one window event.
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformInput {
    /// Cursor position in buffer pixels.
    CursorMoved(Point),
    Pressed(PointerButton),
    Released(PointerButton),
    /// Wheel notches, negative when scrolling towards the content end.
    Scroll(f32),
    Key(Key),
    Text(String),
}

impl PlatformInput {
    pub fn apply(self, input: &mut InputState) {
        match self {
            PlatformInput::CursorMoved(position) => input.move_to(position.x, position.y),
            PlatformInput::Pressed(button) => input.press(button),
            PlatformInput::Released(button) => input.release(button),
            PlatformInput::Scroll(notches) => input.scroll(notches),
            PlatformInput::Key(key) => input.key(key),
            PlatformInput::Text(text) => input.type_text(&text),
        }
    }
}

pub struct DesktopWinitPlatform {
    scale_factor: f64,
}

impl DesktopWinitPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    /// The pixel buffer tracks the physical window size, so positions stay
    /// physical.
    pub fn pointer_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: position.x as f32,
            y: position.y as f32,
        }
    }

    /// Position in logical points, for hosts that lay out in points.
    pub fn logical_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: (position.x / self.scale_factor) as f32,
            y: (position.y / self.scale_factor) as f32,
        }
    }

    pub fn translate(&mut self, event: &WindowEvent<'_>) -> Option<PlatformInput> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(PlatformInput::CursorMoved(self.pointer_position(*position)))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button)?;
                Some(match state {
                    ElementState::Pressed => PlatformInput::Pressed(button),
                    ElementState::Released => PlatformInput::Released(button),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => Some(PlatformInput::Scroll(wheel_notches(*delta))),
            WindowEvent::KeyboardInput { input, .. } => key_input(input).map(PlatformInput::Key),
            WindowEvent::ReceivedCharacter(ch) => text_input(*ch).map(PlatformInput::Text),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
                None
            }
            _ => None,
        }
    }
}

impl Default for DesktopWinitPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

pub fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Other(8) => Some(PointerButton::Back),
        MouseButton::Other(9) => Some(PointerButton::Forward),
        MouseButton::Other(_) => None,
    }
}

pub fn map_key(code: VirtualKeyCode) -> Option<Key> {
    Some(match code {
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Key::Enter,
        VirtualKeyCode::Escape => Key::Escape,
        VirtualKeyCode::Back => Key::Backspace,
        VirtualKeyCode::Delete => Key::Delete,
        VirtualKeyCode::Tab => Key::Tab,
        VirtualKeyCode::Left => Key::Left,
        VirtualKeyCode::Right => Key::Right,
        VirtualKeyCode::Up => Key::Up,
        VirtualKeyCode::Down => Key::Down,
        VirtualKeyCode::Home => Key::Home,
        VirtualKeyCode::End => Key::End,
        _ => return None,
    })
}

/// Key presses only; releases carry no input.
pub fn key_input(input: &KeyboardInput) -> Option<Key> {
    if input.state != ElementState::Pressed {
        return None;
    }
    map_key(input.virtual_keycode?)
}

pub fn wheel_notches(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_NOTCH) as f32,
    }
}

/// Control characters arrive as keys, not text.
pub fn text_input(ch: char) -> Option<String> {
    if ch.is_control() {
        None
    } else {
        Some(ch.to_string())
    }
}
