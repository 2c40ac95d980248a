use immui_core::{Gui, GuiConfig, Id};
use immui_foundation::{InputState, Key, PointerButton};
use immui_render_common::{HeadlessRenderer, RecordedRenderScene};
use immui_ui::{register_default_widgets, DefaultWidgets, Ui};
use immui_ui_graphics::{FontId, Point};
use immui_ui_layout::{register_layouts, ColumnLayout, Layouts};

/// Window size used by [`GuiHarness::new`], in pixels.
pub const HARNESS_WIDTH: f32 = 800.0;
pub const HARNESS_HEIGHT: f32 = 600.0;

/// Headless harness for exercising whole frames in tests.
///
/// Owns a [`Gui`] with the built-in layouts and default widgets registered,
/// the input of the frame being assembled, and a recording renderer. Input
/// helpers take viewport coordinates; transitions are cleared after every
/// [`GuiHarness::frame`].
pub struct GuiHarness {
    gui: Gui,
    widgets: DefaultWidgets,
    layouts: Layouts,
    input: InputState,
    renderer: HeadlessRenderer,
    root_layout: &'static str,
}

impl GuiHarness {
    pub fn new() -> Self {
        Self::with_config(GuiConfig::default())
    }

    pub fn with_config(config: GuiConfig) -> Self {
        let mut gui = Gui::new(config);
        let layouts = register_layouts(&mut gui);
        let widgets = register_default_widgets(&mut gui);
        Self {
            gui,
            widgets,
            layouts,
            input: InputState::new(HARNESS_WIDTH, HARNESS_HEIGHT),
            renderer: HeadlessRenderer::new(),
            root_layout: ColumnLayout::NAME,
        }
    }

    /// Layout kind of the root parent in subsequent frames.
    pub fn set_root_layout(&mut self, name: &'static str) {
        self.root_layout = name;
    }

    /// Declares and reconciles one frame, then clears input transitions.
    pub fn frame<R>(&mut self, content: impl FnOnce(&mut Ui<'_>) -> R) -> R {
        self.gui
            .begin(&self.input, self.root_layout, FontId::DEFAULT);
        let result = content(&mut Ui::new(&mut self.gui, self.widgets));
        self.gui.end();
        self.input.end_frame();
        result
    }

    /// Draws the last reconciled frame and returns what was recorded.
    pub fn draw(&mut self) -> RecordedRenderScene {
        self.renderer.clear();
        self.gui.draw(&mut self.renderer);
        self.renderer.take_scene()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.input
            .move_to(x * self.input.resolution.width, y * self.input.resolution.height);
    }

    pub fn press_at(&mut self, x: f32, y: f32) {
        self.move_to(x, y);
        self.input.press(PointerButton::Primary);
    }

    pub fn release_at(&mut self, x: f32, y: f32) {
        self.move_to(x, y);
        self.input.release(PointerButton::Primary);
    }

    /// Press and release delivered within the same frame.
    pub fn click_at(&mut self, x: f32, y: f32) {
        self.press_at(x, y);
        self.input.release(PointerButton::Primary);
    }

    pub fn scroll(&mut self, delta: f32) {
        self.input.scroll(delta);
    }

    pub fn type_text(&mut self, text: &str) {
        self.input.type_text(text);
    }

    pub fn key(&mut self, key: Key) {
        self.input.key(key);
    }

    pub fn set_frame_time(&mut self, seconds: f32) {
        self.input.set_frame_time(seconds);
    }

    /// Centre of widget `id` as laid out by the last frame.
    pub fn center_of(&self, id: Id) -> Option<Point> {
        self.gui.widget_bounds(id).map(|bounds| bounds.center())
    }

    /// Id a root-level widget declared with `label` receives.
    pub fn id_of(&self, label: &str) -> Id {
        self.gui.resolve_id(immui_core::id_from_str(label))
    }

    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut Gui {
        &mut self.gui
    }

    pub fn widgets(&self) -> DefaultWidgets {
        self.widgets
    }

    pub fn layouts(&self) -> Layouts {
        self.layouts
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}

impl Default for GuiHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// [`GuiHarness`].
pub fn run_test_gui<R>(f: impl FnOnce(&mut GuiHarness) -> R) -> R {
    let mut harness = GuiHarness::new();
    f(&mut harness)
}
