use immui_core::{debug, Clock, Gui, GuiConfig};
use immui_foundation::{InputState, Key, PointerButton};
use immui_render_common::Renderer;
use immui_runtime_std::{FrameTimer, StdClock};
use immui_ui::{register_default_widgets, DefaultWidgets, Ui};
use immui_ui_graphics::FontId;
use immui_ui_layout::{register_layouts, Layouts};

type Content = Box<dyn FnMut(&mut Ui<'_>)>;

/// Owns a [`Gui`], its renderer and the input accumulated between frames,
/// and runs the declare/reconcile/draw cycle for the host event loop.
pub struct AppShell<R: Renderer, C: Clock = StdClock> {
    gui: Gui,
    widgets: DefaultWidgets,
    layouts: Layouts,
    renderer: R,
    timer: FrameTimer<C>,
    input: InputState,
    root_layout: String,
    font: FontId,
    content: Content,
    dirty: bool,
}

impl<R: Renderer> AppShell<R> {
    pub fn new(renderer: R, root_layout: &str, content: impl FnMut(&mut Ui<'_>) + 'static) -> Self {
        Self::with_clock(renderer, StdClock, GuiConfig::default(), root_layout, content)
    }
}

impl<R: Renderer, C: Clock> AppShell<R, C> {
    pub fn with_clock(
        renderer: R,
        clock: C,
        config: GuiConfig,
        root_layout: &str,
        content: impl FnMut(&mut Ui<'_>) + 'static,
    ) -> Self {
        let mut gui = Gui::new(config);
        let layouts = register_layouts(&mut gui);
        let widgets = register_default_widgets(&mut gui);
        Self {
            gui,
            widgets,
            layouts,
            renderer,
            timer: FrameTimer::new(clock),
            input: InputState::default(),
            root_layout: root_layout.to_owned(),
            font: FontId::DEFAULT,
            content: Box::new(content),
            dirty: true,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.input.set_resolution(width, height);
        self.dirty = true;
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.input.resolution.width, self.input.resolution.height)
    }

    pub fn set_font(&mut self, font: FontId) {
        self.font = font;
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

    pub fn renderer(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Input accumulated for the next frame.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Whether a frame would change anything: input arrived, the viewport
    /// changed, something holds focus, or a scroll is still settling.
    pub fn should_render(&self) -> bool {
        self.dirty || self.gui.has_focus() || self.gui.is_animating()
    }

    /// Cursor position in window pixels.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.input.move_to(x, y);
        self.dirty = true;
    }

    pub fn pointer_pressed(&mut self, button: PointerButton) {
        self.input.press(button);
        self.dirty = true;
    }

    pub fn pointer_released(&mut self, button: PointerButton) {
        self.input.release(button);
        self.dirty = true;
    }

    pub fn scroll(&mut self, notches: f32) {
        self.input.scroll(notches);
        self.dirty = true;
    }

    pub fn key_pressed(&mut self, key: Key) {
        self.input.key(key);
        self.dirty = true;
    }

    pub fn text_input(&mut self, text: &str) {
        self.input.type_text(text);
        self.dirty = true;
    }

    /// Declares and reconciles one frame from the accumulated input.
    pub fn update(&mut self) {
        let dt = self.timer.tick();
        self.input.set_frame_time(dt);
        self.gui.begin(&self.input, &self.root_layout, self.font);
        (self.content)(&mut Ui::new(&mut self.gui, self.widgets));
        self.gui.end();
        self.input.end_frame();
        self.dirty = false;
        log::trace!("frame {} took {:.4}s", self.gui.frame(), dt);
    }

    /// Draws the last reconciled frame.
    pub fn render(&mut self) {
        self.gui.draw(&mut self.renderer);
    }

    pub fn frame(&mut self) {
        self.update();
        self.render();
    }

    pub fn log_debug_info(&self) {
        println!("\n\n");
        println!("════════════════════════════════════════════════════════");
        println!("           DEBUG: CURRENT GUI TREE (frame {})", self.gui.frame());
        println!("════════════════════════════════════════════════════════");
        print!("{}", debug::format_tree(&self.gui));
        println!(
            "parents: {}  widgets: {}  persistent states: {}",
            self.gui.tree().len(),
            self.gui.tree().widget_count(),
            self.gui.store().len()
        );
        println!("════════════════════════════════════════════════════════");
        println!("\n\n");
        debug::log_tree(&self.gui);
    }
}
