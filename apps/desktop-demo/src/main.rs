use immui_app::{AppBuilder, Ui};
use immui_core::{LayoutKindId, ParentFlags};
use immui_ui_graphics::{Alignment, Color, Coordinate, Dimension};
use immui_ui_layout::{ColumnLayout, FreeLayout};

#[derive(Default)]
struct DemoState {
    clicks: u32,
    show_popup: bool,
    dark_panel: bool,
    volume: f32,
    name: String,
}

fn column(ui: &mut Ui<'_>) -> LayoutKindId {
    ui.gui()
        .registry()
        .layout_kind_by_name(ColumnLayout::NAME)
        .unwrap_or(LayoutKindId::NONE)
}

fn controls(ui: &mut Ui<'_>, state: &mut DemoState) {
    ui.label(&format!("Clicks: {}", state.clicks));
    if ui.button("Increment") {
        state.clicks += 1;
        log::info!("clicked {} times", state.clicks);
    }
    if ui.button("Reset") {
        state.clicks = 0;
    }
    ui.checkbox("Dark panel", &mut state.dark_panel);
    ui.checkbox("Show popup", &mut state.show_popup);
    ui.slider("Volume", &mut state.volume, 0.0..=100.0);
    ui.text_input("Your name", &mut state.name);
    if !state.name.is_empty() {
        ui.label(&format!("Hello, {}!", state.name));
    }
}

fn demo(ui: &mut Ui<'_>, state: &mut DemoState) {
    let column = column(ui);

    ui.place(
        Coordinate::relative(0.0),
        Coordinate::relative(0.0),
        Dimension::relative(0.5),
        Dimension::relative(1.0),
    );
    ui.scroll_area("controls", column, |ui| controls(ui, state));

    ui.place(
        Coordinate::relative(1.0).aligned(Alignment::Right),
        Coordinate::relative(0.0),
        Dimension::relative(0.5),
        Dimension::relative(1.0),
    );
    let tint = if state.dark_panel {
        Color::rgb(0.1, 0.1, 0.12)
    } else {
        Color::rgb(0.25, 0.27, 0.32)
    };
    ui.parent_with_layout("rows", ParentFlags::SCROLL, column, |ui| {
        ui.panel(0, Some(tint));
        for row in 0..64u64 {
            ui.with_id(row, |ui| ui.label(&format!("Row {row}")));
        }
    });

    if state.show_popup {
        ui.place(
            Coordinate::relative(0.5).aligned(Alignment::Center),
            Coordinate::relative(0.5).aligned(Alignment::Center),
            Dimension::relative(0.4),
            Dimension::relative(0.3),
        );
        ui.popup("popup", column, |ui| {
            ui.label("A popup above everything");
            if ui.button("Close") {
                state.show_popup = false;
            }
        });
    }
}

fn main() {
    env_logger::init();

    println!("=== immui desktop demo ===");
    println!("Press 'D' to dump the current gui tree");
    println!("Set IMMUI_FONT to a .ttf file to render real glyphs");
    println!();

    let mut state = DemoState {
        volume: 40.0,
        ..DemoState::default()
    };
    AppBuilder::new()
        .title("immui demo")
        .size(960, 640)
        .root_layout(FreeLayout::NAME)
        .run(move |ui| demo(ui, &mut state));
}
