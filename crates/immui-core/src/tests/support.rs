//! Minimal layout and widget kinds used by the crate's unit tests.

use std::any::Any;

use immui_foundation::{InputState, PointerButton};
use immui_ui_graphics::{Color, FontId, Rect};

use crate::{
    layout_data, payload, DrawContext, Gui, GuiConfig, GuiError, LayoutContext, LayoutKind,
    PropertyTag, PropertyValue, UpdateContext, Widget, WidgetHeader, WidgetKind, WidgetKindId,
};

pub const ROW_HEIGHT: PropertyTag = PropertyTag(1);
pub const CURSOR: PropertyTag = PropertyTag(2);
pub const TINT: PropertyTag = PropertyTag(1);

/// Stacks elements top to bottom at full width.
pub struct Rows;

#[derive(Debug)]
pub struct RowsData {
    pub height: f32,
    pub cursor: f32,
}

impl LayoutKind for Rows {
    fn name(&self) -> &str {
        "rows"
    }

    fn init(&self) -> Box<dyn Any> {
        Box::new(RowsData {
            height: 0.25,
            cursor: 0.0,
        })
    }

    fn compute_bounds(&self, data: &mut dyn Any, _cx: &LayoutContext) -> Result<Rect, GuiError> {
        let data = layout_data::<RowsData>(data, self.name())?;
        let bounds = Rect::new(0.0, data.cursor, 1.0, data.height);
        data.cursor += data.height;
        Ok(bounds)
    }

    fn apply_property(
        &self,
        data: &mut dyn Any,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        let data = layout_data::<RowsData>(data, self.name())?;
        match tag {
            ROW_HEIGHT => {
                let old = data.height;
                data.height = value.as_float(tag)?;
                Ok(PropertyValue::Float(old))
            }
            CURSOR => {
                let old = data.cursor;
                data.cursor = value.as_float(tag)?;
                Ok(PropertyValue::Float(old))
            }
            _ => Err(GuiError::UnknownProperty {
                kind: self.name().to_owned(),
                tag,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProbePayload {
    pub value: i32,
}

#[derive(Debug, Default)]
pub struct ProbeState {
    pub value: i32,
    pub tint: f32,
    pub updates: u32,
    pub had_focus: bool,
    pub released: bool,
}

/// Focuses on press, releases focus on release.
pub struct Probe {
    pub tint: f32,
}

impl WidgetKind for Probe {
    fn name(&self) -> &str {
        "probe"
    }

    fn payload_size(&self) -> usize {
        std::mem::size_of::<ProbePayload>()
    }

    fn read(&self, _header: &WidgetHeader, data: Box<dyn Any>) -> Result<Box<dyn Any>, GuiError> {
        let data: ProbePayload = payload(data, self.name())?;
        Ok(Box::new(ProbeState {
            value: data.value,
            tint: self.tint,
            ..ProbeState::default()
        }))
    }

    fn update(&self, cx: &mut UpdateContext<'_>, widget: &mut Widget, has_focus: bool) {
        let bounds = widget.bounds();
        let header = widget.header;
        let Some(state) = widget.state_mut::<ProbeState>() else {
            return;
        };
        state.updates += 1;
        if has_focus {
            state.had_focus = true;
            if cx.released(PointerButton::Primary) {
                state.released = true;
                cx.free_focus();
            }
        } else if cx.pressed(PointerButton::Primary) && cx.mouse_over(&bounds) {
            cx.set_focus(&header, 7);
        }
    }

    fn draw(&self, cx: &mut DrawContext<'_>, widget: &Widget) {
        let tint = widget.state::<ProbeState>().map_or(0.0, |state| state.tint);
        cx.renderer
            .draw_filled_rect(widget.bounds(), Color::rgb(tint, tint, tint));
    }

    fn apply_property(
        &mut self,
        tag: PropertyTag,
        value: PropertyValue,
    ) -> Result<PropertyValue, GuiError> {
        match tag {
            TINT => {
                let old = self.tint;
                self.tint = value.as_float(tag)?;
                Ok(PropertyValue::Float(old))
            }
            _ => Err(GuiError::UnknownProperty {
                kind: self.name().to_owned(),
                tag,
            }),
        }
    }
}

pub fn gui_with(config: GuiConfig) -> (Gui, WidgetKindId) {
    let mut gui = Gui::new(config);
    gui.register_layout_kind(Rows);
    let probe = gui.register_widget_kind(Probe { tint: 0.5 });
    (gui, probe)
}

pub fn gui() -> (Gui, WidgetKindId) {
    gui_with(GuiConfig::default())
}

/// 800x600 input with the mouse at a viewport position.
pub fn input_at(x: f32, y: f32) -> InputState {
    let mut input = InputState::new(800.0, 600.0);
    input.move_to(x * 800.0, y * 600.0);
    input
}

pub fn begin(gui: &mut Gui, input: &InputState) {
    gui.begin(input, "rows", FontId::DEFAULT);
}
