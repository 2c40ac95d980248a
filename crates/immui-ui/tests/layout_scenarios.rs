use immui_core::{id_from_str, Id, LayoutKindId, ParentFlags};
use immui_testing::GuiHarness;
use immui_ui::widgets::ButtonState;
use immui_ui::Ui;
use immui_ui_graphics::{Alignment, Coordinate, Dimension, Rect};
use immui_ui_layout::FreeLayout;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn free_harness() -> GuiHarness {
    let mut harness = GuiHarness::new();
    harness.set_root_layout(FreeLayout::NAME);
    harness.set_frame_time(1.0 / 60.0);
    harness
}

fn long_list(ui: &mut Ui<'_>, column: LayoutKindId) -> Vec<Id> {
    ui.scroll_area("list", column, |ui| {
        (0..40)
            .map(|row| ui.with_id(row, |ui| ui.label("row")))
            .collect()
    })
}

#[test]
fn free_placed_parent_positions_its_content() {
    let mut harness = free_harness();
    let id = harness.frame(|ui| {
        ui.place(
            Coordinate::relative(1.0).aligned(Alignment::Right),
            Coordinate::relative(0.0),
            Dimension::relative(0.5),
            Dimension::relative(0.5),
        );
        ui.parent("panel", ParentFlags::NONE, |ui| {
            ui.button("Go");
            ui.gui().resolve_id(id_from_str("Go"))
        })
    });
    let bounds = harness.gui().widget_bounds(id).unwrap();
    assert!(approx(bounds.x, 0.5));
    assert!(approx(bounds.y, 0.0));
    assert!(approx(bounds.width, 0.5));
    assert!(approx(bounds.height, 0.5));
}

#[test]
fn wheel_scrolls_the_list_under_the_mouse() {
    let mut harness = free_harness();
    let column = harness.layouts().column;
    harness.move_to(0.5, 0.5);
    let rows = harness.frame(|ui| long_list(ui, column));
    let list = harness.id_of("list");
    let first_y = harness.gui().widget_bounds(rows[0]).unwrap().y;
    assert_eq!(harness.gui().parent_scroll(list), Some(0.0));

    harness.scroll(-1.0);
    harness.frame(|ui| long_list(ui, column));
    let target = harness.gui().parent_scroll_target(list).unwrap();
    assert!(approx(target, 0.1));

    let mut previous = 0.0;
    for _ in 0..90 {
        harness.frame(|ui| long_list(ui, column));
        let scroll = harness.gui().parent_scroll(list).unwrap();
        assert!(scroll >= previous && scroll <= target + 1e-6);
        previous = scroll;
    }
    assert!(approx(previous, target));
    let moved = harness.gui().widget_bounds(rows[0]).unwrap().y;
    assert!(approx(first_y - moved, target));
}

#[test]
fn scroll_target_stops_at_the_overflow() {
    let mut harness = free_harness();
    let column = harness.layouts().column;
    harness.move_to(0.5, 0.5);
    harness.frame(|ui| long_list(ui, column));
    harness.scroll(-1000.0);
    harness.frame(|ui| long_list(ui, column));

    let list_id = harness.id_of("list");
    let list = harness.gui().find_parent(list_id).unwrap();
    let overflow = (list.content_max - 1.0) * list.bounds.height;
    assert!(overflow > 0.0);
    let target = harness.gui().parent_scroll_target(list_id).unwrap();
    assert!(approx(target, overflow));

    harness.scroll(1000.0);
    harness.frame(|ui| long_list(ui, column));
    assert_eq!(harness.gui().parent_scroll_target(list_id), Some(0.0));
}

#[test]
fn popup_shields_the_widgets_below() {
    let mut harness = free_harness();
    let free = harness.layouts().free;
    let declare = |harness: &mut GuiHarness| {
        harness.frame(|ui| {
            let under = ui.button("under");
            ui.place(
                Coordinate::relative(0.5).aligned(Alignment::Center),
                Coordinate::relative(0.5).aligned(Alignment::Center),
                Dimension::relative(0.4),
                Dimension::relative(0.4),
            );
            ui.popup("menu", free, |ui| ui.label("item"));
            under
        })
    };
    declare(&mut harness);
    let menu = harness.gui().find_parent(harness.id_of("menu")).unwrap();
    let expected = Rect::new(0.3, 0.3, 0.4, 0.4);
    assert!(approx(menu.bounds.x, expected.x) && approx(menu.bounds.y, expected.y));
    assert!(approx(menu.bounds.width, expected.width) && approx(menu.bounds.height, expected.height));

    harness.click_at(0.5, 0.5);
    assert!(!declare(&mut harness));
    let under = harness.id_of("under");
    let state = harness.gui().widget_state::<ButtonState>(under).unwrap();
    assert!(!state.pressed && !state.hovered);

    harness.click_at(0.1, 0.1);
    assert!(declare(&mut harness));

    let scene = harness.draw();
    let texts: Vec<&str> = scene.texts().collect();
    assert_eq!(texts, vec!["under", "item"]);
}
