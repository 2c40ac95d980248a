#![deny(missing_docs)]

//! Opens a window and runs an immui application with minimal boilerplate.

#[cfg(not(feature = "desktop"))]
compile_error!("immui-app must be built with the `desktop` feature enabled.");

#[cfg(not(feature = "renderer-pixels"))]
compile_error!("immui-app currently requires the `renderer-pixels` feature.");

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;

use immui_app_shell::AppShell;
use immui_platform_desktop_winit::{DesktopWinitPlatform, PlatformInput};
use immui_render_pixels::{PixelsRenderer, DEFAULT_CLEAR_COLOR};
use immui_ui_graphics::Color;
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use immui_ui::Ui;

/// Builder used to configure and launch an immui application.
#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    options: AppOptions,
}

impl AppBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Sets the initial logical size of the window.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.initial_size = (width, height);
        self
    }

    /// Sets the layout kind of the root parent.
    pub fn root_layout(mut self, name: impl Into<String>) -> Self {
        self.options.root_layout = name.into();
        self
    }

    /// Sets the colour the window is cleared to before every frame.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.options.clear_color = color;
        self
    }

    /// Loads the default font from a TrueType file instead of `IMMUI_FONT`.
    pub fn font(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.font_path = Some(path.into());
        self
    }

    /// Runs the application. Exits the process when the window closes or
    /// the window could not be created.
    pub fn run(self, content: impl FnMut(&mut Ui<'_>) + 'static) -> ! {
        run_app(self.options, content)
    }
}

/// Options used to configure the application window.
#[derive(Debug, Clone)]
pub struct AppOptions {
    title: String,
    initial_size: (u32, u32),
    root_layout: String,
    clear_color: Color,
    font_path: Option<PathBuf>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            title: "immui".to_string(),
            initial_size: (800, 600),
            root_layout: "column".to_string(),
            clear_color: DEFAULT_CLEAR_COLOR,
            font_path: None,
        }
    }
}

impl AppOptions {
    /// Sets the title used for the window.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.initial_size = (width, height);
        self
    }

    /// Sets the layout kind of the root parent.
    pub fn with_root_layout(mut self, name: impl Into<String>) -> Self {
        self.root_layout = name.into();
        self
    }

    /// Sets the background colour.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Sets the TrueType file used as the default font.
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }
}

/// Failure while setting up the window or its surface.
#[derive(Debug)]
pub enum AppError {
    /// The window could not be created.
    Window(winit::error::OsError),
    /// The pixel surface could not be created.
    Surface(pixels::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Window(err) => write!(f, "failed to create window: {err}"),
            AppError::Surface(err) => write!(f, "failed to create pixel buffer: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

/// Launches an application using the default options.
pub fn immui_app(content: impl FnMut(&mut Ui<'_>) + 'static) -> ! {
    AppBuilder::default().run(content)
}

/// Launches an application using the provided options.
pub fn immui_app_with_options(options: AppOptions, content: impl FnMut(&mut Ui<'_>) + 'static) -> ! {
    run_app(options, content)
}

fn run_app(options: AppOptions, content: impl FnMut(&mut Ui<'_>) + 'static) -> ! {
    match run_pixels_app(&options, content) {
        Ok(never) => match never {},
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

fn load_font(renderer: &mut PixelsRenderer, options: &AppOptions) {
    let loaded = match &options.font_path {
        Some(path) => match renderer.fonts_mut().load_file(path) {
            Ok(id) => Some(id),
            Err(err) => {
                log::error!("failed to load font {}: {err}", path.display());
                None
            }
        },
        None => renderer.fonts_mut().load_env_font(),
    };
    if loaded.is_none() {
        log::info!("no font loaded, text is drawn as blocks");
    }
}

fn resize(
    pixels: &mut Pixels,
    app: &mut AppShell<PixelsRenderer>,
    width: u32,
    height: u32,
) -> Result<(), pixels::TextureError> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    pixels.resize_surface(width, height)?;
    pixels.resize_buffer(width, height)?;
    app.renderer().resize(width, height);
    app.set_viewport(width as f32, height as f32);
    Ok(())
}

fn forward(app: &mut AppShell<PixelsRenderer>, input: PlatformInput) {
    match input {
        PlatformInput::CursorMoved(position) => app.set_cursor(position.x, position.y),
        PlatformInput::Pressed(button) => app.pointer_pressed(button),
        PlatformInput::Released(button) => app.pointer_released(button),
        PlatformInput::Scroll(notches) => app.scroll(notches),
        PlatformInput::Key(key) => app.key_pressed(key),
        PlatformInput::Text(text) => app.text_input(&text),
    }
}

fn run_pixels_app(
    options: &AppOptions,
    content: impl FnMut(&mut Ui<'_>) + 'static,
) -> Result<Infallible, AppError> {
    let event_loop = EventLoop::new();
    let (initial_width, initial_height) = options.initial_size;

    let window = WindowBuilder::new()
        .with_title(options.title.clone())
        .with_inner_size(LogicalSize::new(
            initial_width as f64,
            initial_height as f64,
        ))
        .build(&event_loop)
        .map_err(AppError::Window)?;

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels =
        Pixels::new(size.width, size.height, surface_texture).map_err(AppError::Surface)?;

    let mut renderer = PixelsRenderer::new(size.width, size.height);
    renderer.set_clear_color(options.clear_color);
    load_font(&mut renderer, options);
    let metrics = renderer.metrics();

    let mut app = AppShell::new(renderer, &options.root_layout, content);
    app.gui_mut().set_glyph_metrics(Box::new(metrics));
    app.set_viewport(size.width as f32, size.height as f32);
    let mut platform = DesktopWinitPlatform::new(window.scale_factor());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => {
                let resized = match &event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    WindowEvent::Resized(new_size) => Some(*new_size),
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => Some(**new_inner_size),
                    WindowEvent::KeyboardInput { input, .. } => {
                        // D dumps the tree unless a widget takes the keyboard.
                        if input.state == ElementState::Pressed
                            && input.virtual_keycode == Some(VirtualKeyCode::D)
                            && !app.gui().has_focus()
                        {
                            app.log_debug_info();
                        }
                        None
                    }
                    _ => None,
                };
                if let Some(new_size) = resized {
                    if let Err(err) = resize(&mut pixels, &mut app, new_size.width, new_size.height) {
                        log::error!("failed to resize surface: {err}");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                }
                if let Some(input) = platform.translate(&event) {
                    forward(&mut app, input);
                }
                if app.should_render() {
                    window.request_redraw();
                }
            }
            Event::MainEventsCleared => {
                if app.should_render() {
                    window.request_redraw();
                    *control_flow = ControlFlow::Poll;
                }
            }
            Event::RedrawRequested(_) => {
                app.update();
                app.renderer().clear();
                app.render();
                if let Err(err) = app.renderer().copy_to(pixels.frame_mut()) {
                    log::error!("{err}");
                }
                if let Err(err) = pixels.render() {
                    log::error!("pixels render failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}
