//! Default widget kinds

pub mod button;
pub mod checkbox;
pub mod image;
pub mod label;
pub mod panel;
pub mod slider;
pub mod text_input;

pub use button::*;
pub use checkbox::*;
pub use image::*;
pub use label::*;
pub use panel::*;
pub use slider::*;
pub use text_input::*;

use immui_core::{Gui, Id, UpdateContext, WidgetHeader};
use immui_foundation::PointerButton;

/// Focus action used by widgets that fire on release.
pub const ACTION_PRESS: u32 = 1;
/// Focus action used while a slider handle is dragged.
pub const ACTION_DRAG: u32 = 2;
/// Focus action used while a text field takes keyboard input.
pub const ACTION_EDIT: u32 = 3;

/// Outcome of [`press_release`] for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressState {
    pub hovered: bool,
    pub held: bool,
    pub fired: bool,
}

/// Focus on a primary press inside the widget; fire when the press ends
/// inside it. Releasing anywhere frees the focus. A press and release
/// delivered in the same frame fire without taking focus.
pub fn press_release(cx: &mut UpdateContext<'_>, header: &WidgetHeader, has_focus: bool) -> PressState {
    let hovered = cx.mouse_over(&header.bounds);
    let mut state = PressState {
        hovered,
        ..PressState::default()
    };
    if has_focus {
        if cx.released(PointerButton::Primary) || !cx.down(PointerButton::Primary) {
            state.fired = hovered && cx.released(PointerButton::Primary);
            cx.free_focus();
        } else {
            state.held = true;
        }
    } else if hovered && cx.pressed(PointerButton::Primary) {
        if cx.released(PointerButton::Primary) && !cx.down(PointerButton::Primary) {
            state.fired = true;
        } else {
            cx.set_focus(header, ACTION_PRESS);
            state.held = true;
        }
    }
    state
}

/// Evaluates, while a frame is being declared, whether the widget `id` is
/// released this frame. Uses the bounds and focus left by the previous
/// reconciliation, so the result matches what [`press_release`] reports
/// when the frame ends.
pub fn released_this_frame(gui: &Gui, id: Id) -> bool {
    let input = gui.input();
    if !input.was_released(PointerButton::Primary) {
        return false;
    }
    let clicked = input.was_pressed(PointerButton::Primary) && !input.is_down(PointerButton::Primary);
    if !gui.is_focused(id) && !clicked {
        return false;
    }
    gui.mouse_reaches(id)
}
