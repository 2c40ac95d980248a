//! Declarative helpers over [`Gui`]'s write API.

use std::ops::RangeInclusive;

use immui_core::{id_from_str, Gui, Id, LayoutKindId, ParentFlags, WidgetFlags, WidgetKindId};
use immui_foundation::PointerButton;
use immui_render_common::TextAlign;
use immui_ui_graphics::{Color, Coordinate, Dimension, ImageId, Rect};
use immui_ui_layout::FreeLayout;

use crate::widgets::{
    apply_text_input, released_this_frame, slider_value, ButtonKind, ButtonPayload, CheckboxKind,
    CheckboxPayload, ImageKind, ImagePayload, LabelKind, LabelPayload, PanelKind, PanelPayload,
    SliderKind, SliderPayload, TextInputKind, TextInputPayload,
};

/// Handles of the default widget kinds in one [`Gui`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultWidgets {
    pub label: WidgetKindId,
    pub button: WidgetKindId,
    pub checkbox: WidgetKindId,
    pub slider: WidgetKindId,
    pub text_input: WidgetKindId,
    pub image: WidgetKindId,
    pub panel: WidgetKindId,
}

pub fn register_default_widgets(gui: &mut Gui) -> DefaultWidgets {
    let widgets = DefaultWidgets {
        label: gui.register_widget_kind(LabelKind::default()),
        button: gui.register_widget_kind(ButtonKind::default()),
        checkbox: gui.register_widget_kind(CheckboxKind::default()),
        slider: gui.register_widget_kind(SliderKind::default()),
        text_input: gui.register_widget_kind(TextInputKind::default()),
        image: gui.register_widget_kind(ImageKind),
        panel: gui.register_widget_kind(PanelKind::default()),
    };
    log::debug!("registered default widget kinds: {widgets:?}");
    widgets
}

/// Borrow of a [`Gui`] in its write phase with the default widget handles.
///
/// Widget helpers return results for the current input, judged against the
/// layout and focus left by the previous frame.
pub struct Ui<'a> {
    gui: &'a mut Gui,
    widgets: DefaultWidgets,
}

impl<'a> Ui<'a> {
    pub fn new(gui: &'a mut Gui, widgets: DefaultWidgets) -> Self {
        Self { gui, widgets }
    }

    pub fn gui(&mut self) -> &mut Gui {
        self.gui
    }

    pub fn widgets(&self) -> DefaultWidgets {
        self.widgets
    }

    pub fn label(&mut self, text: &str) -> Id {
        self.label_aligned(text, TextAlign::Left)
    }

    pub fn label_aligned(&mut self, text: &str, align: TextAlign) -> Id {
        self.gui.write_widget(
            self.widgets.label,
            id_from_str(text),
            WidgetFlags::NONE,
            LabelPayload {
                text: text.to_owned(),
                align,
            },
        )
    }

    /// Returns true in the frame the button is clicked.
    pub fn button(&mut self, text: &str) -> bool {
        self.button_with(text, WidgetFlags::NONE)
    }

    pub fn button_with(&mut self, text: &str, flags: WidgetFlags) -> bool {
        let seed = id_from_str(text);
        let id = self.gui.resolve_id(seed);
        let clicked = !flags.contains(WidgetFlags::DISABLED) && released_this_frame(self.gui, id);
        self.gui.write_widget(
            self.widgets.button,
            seed,
            flags,
            ButtonPayload {
                text: text.to_owned(),
            },
        );
        clicked
    }

    /// Flips `checked` when clicked and returns whether it did.
    pub fn checkbox(&mut self, label: &str, checked: &mut bool) -> bool {
        let seed = id_from_str(label);
        let id = self.gui.resolve_id(seed);
        let toggled = released_this_frame(self.gui, id);
        if toggled {
            *checked = !*checked;
        }
        self.gui.write_widget(
            self.widgets.checkbox,
            seed,
            WidgetFlags::NONE,
            CheckboxPayload {
                label: label.to_owned(),
                checked: *checked,
            },
        );
        toggled
    }

    /// Drags `value` within `range`; an inverted range is swapped. Returns
    /// true when the value changed.
    pub fn slider(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        let (mut min, mut max) = (*range.start(), *range.end());
        if min > max {
            log::warn!("slider {label:?} declared with inverted range {min}..={max}, swapping bounds");
            std::mem::swap(&mut min, &mut max);
        }
        let seed = id_from_str(label);
        let id = self.gui.resolve_id(seed);
        let mut changed = false;
        if let Some(bounds) = self.gui.widget_bounds(id) {
            let input = self.gui.input();
            let mouse = self.gui.mouse();
            let dragging = self.gui.is_focused(id) && input.is_down(PointerButton::Primary);
            let grabbed = input.was_pressed(PointerButton::Primary) && self.gui.mouse_reaches(id);
            if dragging || grabbed {
                let next = slider_value(bounds, mouse.x, min, max);
                changed = next != *value;
                *value = next;
            }
        }
        self.gui.write_widget(
            self.widgets.slider,
            seed,
            WidgetFlags::NONE,
            SliderPayload {
                label: label.to_owned(),
                value: *value,
                min,
                max,
            },
        );
        changed
    }

    /// Single line editor for `text`, keyed by `hint`. Returns true when the
    /// text changed.
    pub fn text_input(&mut self, hint: &str, text: &mut String) -> bool {
        let seed = id_from_str(hint);
        let id = self.gui.resolve_id(seed);
        let changed = self.gui.is_focused(id) && apply_text_input(text, self.gui.input());
        self.gui.write_widget(
            self.widgets.text_input,
            seed,
            WidgetFlags::NONE,
            TextInputPayload {
                text: text.clone(),
                hint: hint.to_owned(),
            },
        );
        changed
    }

    pub fn image(&mut self, seed: Id, image: ImageId, texcoords: Rect, tint: Color) -> Id {
        self.gui.write_widget(
            self.widgets.image,
            seed,
            WidgetFlags::NONE,
            ImagePayload {
                image,
                texcoords,
                tint,
            },
        )
    }

    /// Flat rectangle; `None` uses the panel kind's background colour.
    pub fn panel(&mut self, seed: Id, color: Option<Color>) -> Id {
        self.gui
            .write_widget(self.widgets.panel, seed, WidgetFlags::NONE, PanelPayload { color })
    }

    /// Places the current parent's next children when it uses the free layout.
    pub fn place(&mut self, x: Coordinate, y: Coordinate, width: Dimension, height: Dimension) {
        FreeLayout::set(self.gui, x, y, width, height);
    }

    /// Declares a parent around `contents`, laid out like its enclosing parent.
    pub fn parent<R>(&mut self, name: &str, flags: ParentFlags, contents: impl FnOnce(&mut Self) -> R) -> R {
        self.gui.begin_parent(name, flags);
        let result = contents(self);
        self.gui.end_parent();
        result
    }

    pub fn parent_with_layout<R>(
        &mut self,
        name: &str,
        flags: ParentFlags,
        layout: LayoutKindId,
        contents: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.gui.begin_parent_with_layout(name, flags, layout);
        let result = contents(self);
        self.gui.end_parent();
        result
    }

    /// Wheel-scrollable parent whose children are placed by `layout`.
    pub fn scroll_area<R>(&mut self, name: &str, layout: LayoutKindId, contents: impl FnOnce(&mut Self) -> R) -> R {
        self.parent_with_layout(name, ParentFlags::SCROLL, layout, contents)
    }

    /// Parent drawn over the rest of the frame and hit-tested first.
    pub fn popup<R>(&mut self, name: &str, layout: LayoutKindId, contents: impl FnOnce(&mut Self) -> R) -> R {
        self.parent_with_layout(name, ParentFlags::POPUP, layout, contents)
    }

    /// Runs `contents` inside an id scope, for repeated widgets with equal labels.
    pub fn with_id<R>(&mut self, seed: Id, contents: impl FnOnce(&mut Self) -> R) -> R {
        self.gui.push_id(seed);
        let result = contents(self);
        self.gui.pop_id();
        result
    }
}
