use immui_ui_graphics::{Point, Size};

use crate::{Key, PointerButton, PointerButtons};

/// Snapshot of window and input state for one frame.
///
/// Positions are in device pixels; [`InputState::normalized_mouse`] converts
/// them to viewport fractions. Transition fields (`pressed`, `released`,
/// wheel, keys, text) accumulate between frames and are cleared by
/// [`InputState::end_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct InputState {
    pub resolution: Size,
    pub mouse_position: Point,
    pub buttons_down: PointerButtons,
    pub buttons_pressed: PointerButtons,
    pub buttons_released: PointerButtons,
    pub wheel_delta: f32,
    pub keys_pressed: Vec<Key>,
    pub text: String,
    /// Seconds elapsed since the previous frame.
    pub frame_time: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            resolution: Size::new(800.0, 600.0),
            mouse_position: Point::ZERO,
            buttons_down: PointerButtons::NONE,
            buttons_pressed: PointerButtons::NONE,
            buttons_released: PointerButtons::NONE,
            wheel_delta: 0.0,
            keys_pressed: Vec::new(),
            text: String::new(),
            frame_time: 1.0 / 60.0,
        }
    }
}

impl InputState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            resolution: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = Size::new(width, height);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.mouse_position = Point::new(x, y);
    }

    pub fn press(&mut self, button: PointerButton) {
        if !self.buttons_down.contains(button) {
            self.buttons_pressed.insert(button);
        }
        self.buttons_down.insert(button);
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.buttons_down.contains(button) {
            self.buttons_released.insert(button);
        }
        self.buttons_down.remove(button);
    }

    pub fn scroll(&mut self, delta: f32) {
        self.wheel_delta += delta;
    }

    pub fn key(&mut self, key: Key) {
        self.keys_pressed.push(key);
    }

    pub fn type_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn set_frame_time(&mut self, seconds: f32) {
        self.frame_time = seconds.max(0.0);
    }

    pub fn is_down(&self, button: PointerButton) -> bool {
        self.buttons_down.contains(button)
    }

    pub fn was_pressed(&self, button: PointerButton) -> bool {
        self.buttons_pressed.contains(button)
    }

    pub fn was_released(&self, button: PointerButton) -> bool {
        self.buttons_released.contains(button)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Size of one device pixel in viewport units.
    pub fn pixel_size(&self) -> Size {
        Size::new(
            if self.resolution.width > 0.0 {
                1.0 / self.resolution.width
            } else {
                0.0
            },
            if self.resolution.height > 0.0 {
                1.0 / self.resolution.height
            } else {
                0.0
            },
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.resolution.height > 0.0 {
            self.resolution.width / self.resolution.height
        } else {
            1.0
        }
    }

    pub fn normalized_mouse(&self) -> Point {
        let pixel = self.pixel_size();
        Point::new(
            self.mouse_position.x * pixel.width,
            self.mouse_position.y * pixel.height,
        )
    }

    /// Clears per-frame transitions; held buttons and position persist.
    pub fn end_frame(&mut self) {
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel_delta = 0.0;
        self.keys_pressed.clear();
        self.text.clear();
    }
}
