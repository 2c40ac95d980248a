use super::*;
use crate::test_support::{begin, gui, input_at, ProbePayload, CURSOR, ROW_HEIGHT};

fn declare(gui: &mut Gui, probe: WidgetKindId) -> Vec<Id> {
    let mut ids = Vec::new();
    for row in 0..3u64 {
        gui.push_id(row);
        ids.push(gui.write_widget(probe, id_from_str("cell"), WidgetFlags::NONE, ProbePayload { value: 0 }));
        gui.pop_id();
    }
    gui.begin_parent("panel", ParentFlags::NONE);
    ids.push(gui.write_widget(probe, id_from_str("cell"), WidgetFlags::NONE, ProbePayload { value: 0 }));
    gui.end_parent();
    ids
}

#[test]
fn write_widget_ids_are_stable_across_frames() {
    let (mut gui, probe) = gui();
    let input = input_at(0.0, 0.0);

    begin(&mut gui, &input);
    let first = declare(&mut gui, probe);
    gui.end();
    begin(&mut gui, &input);
    let second = declare(&mut gui, probe);
    gui.end();

    assert_eq!(first, second);
    let mut unique = first.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), first.len());
}

#[test]
fn begin_resets_the_id_scope() {
    let (mut gui, probe) = gui();
    let input = input_at(0.0, 0.0);
    begin(&mut gui, &input);
    gui.push_id(99);
    gui.end();
    begin(&mut gui, &input);
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
    assert_eq!(id, IdStack::new().resolve(1));
    gui.end();
}

#[test]
fn pop_id_cannot_close_a_parent_scope() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.begin_parent("outer", ParentFlags::NONE);
    let before = gui.resolve_id(5);
    gui.pop_id();
    assert_eq!(gui.resolve_id(5), before);
    gui.write_widget(probe, 5, WidgetFlags::NONE, ProbePayload { value: 0 });
    gui.end_parent();
    gui.end();
    assert!(gui.find_widget(before).is_some());
}

#[test]
fn stray_end_parent_is_ignored() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.end_parent();
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 3 });
    gui.end();
    assert_eq!(gui.widget_state::<crate::test_support::ProbeState>(id).unwrap().value, 3);
}

#[test]
fn open_parents_and_pushes_are_closed_at_end() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    gui.begin_parent("left-open", ParentFlags::NONE);
    gui.layout_push(ROW_HEIGHT, 0.1f32);
    gui.widget_push(probe, crate::test_support::TINT, 1.0f32);
    gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
    gui.end();

    assert_eq!(gui.phase(), Phase::Reconciled);
    assert!(gui.find_parent(gui.tree()[ParentIndex(1)].id).is_some());
    assert!(gui.registry.widget_entry(probe).unwrap().properties.is_empty());
}

#[test]
fn over_popping_is_clamped() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    gui.layout_pop(3);
    gui.widget_pop(probe, 2);
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
    gui.end();
    assert_eq!(gui.widget_bounds(id).map(|bounds| bounds.height), Some(0.25));
}

#[test]
fn calls_outside_a_frame_record_nothing() {
    let (mut gui, probe) = gui();
    gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
    gui.end_parent();
    gui.end();
    assert_eq!(gui.phase(), Phase::Idle);
    assert!(gui.commands.is_empty());
}

#[test]
fn unknown_root_layout_falls_back_to_none() {
    let (mut gui, probe) = gui();
    gui.begin(&input_at(0.0, 0.0), "missing", immui_ui_graphics::FontId::DEFAULT);
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
    gui.end();
    assert_eq!(gui.tree().root().layout.kind, LayoutKindId::NONE);
    assert_eq!(gui.widget_bounds(id), Some(Rect::ZERO));
}

#[test]
fn previous_tree_is_queryable_while_writing() {
    let (mut gui, probe) = gui();
    let input = input_at(0.0, 0.0);
    begin(&mut gui, &input);
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 11 });
    assert!(gui.find_widget(id).is_none());
    gui.end();

    begin(&mut gui, &input);
    let id = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 12 });
    let previous = gui.widget_state::<crate::test_support::ProbeState>(id).unwrap();
    assert_eq!(previous.value, 11);
    gui.end();
    assert_eq!(
        gui.widget_state::<crate::test_support::ProbeState>(id).unwrap().value,
        12
    );
}

#[test]
fn popups_block_mouse_reach_below_them() {
    let (mut gui, probe) = gui();
    let declare = |gui: &mut Gui, input: &InputState| {
        begin(gui, input);
        let below = gui.write_widget(probe, 1, WidgetFlags::NONE, ProbePayload { value: 0 });
        gui.layout_set(CURSOR, 0.0f32);
        gui.begin_parent("menu", ParentFlags::POPUP);
        let inside = gui.write_widget(probe, 2, WidgetFlags::NONE, ProbePayload { value: 0 });
        gui.end_parent();
        gui.end();
        (below, inside)
    };
    let (below, inside) = declare(&mut gui, &input_at(0.5, 0.05));
    assert!(!gui.mouse_reaches(below));
    assert!(gui.mouse_reaches(inside));

    declare(&mut gui, &input_at(0.5, 0.9));
    assert!(!gui.mouse_reaches(below));
    assert!(!gui.mouse_reaches(inside));
    assert!(!gui.mouse_reaches(12345));
}

#[test]
fn animation_settles_after_a_wheel_notch() {
    let (mut gui, probe) = gui();
    let frame = |gui: &mut Gui, wheel: f32| {
        let mut input = input_at(0.5, 0.1);
        input.set_frame_time(1.0 / 60.0);
        input.scroll(wheel);
        begin(gui, &input);
        gui.begin_parent("list", ParentFlags::SCROLL);
        for row in 0..8u64 {
            gui.write_widget(probe, row, WidgetFlags::NONE, ProbePayload { value: 0 });
        }
        gui.end_parent();
        gui.end();
    };
    frame(&mut gui, 0.0);
    assert!(!gui.is_animating());
    frame(&mut gui, -1.0);
    assert!(gui.is_animating());
    for _ in 0..120 {
        frame(&mut gui, 0.0);
    }
    assert!(!gui.is_animating());
}

#[test]
fn removed_scroll_parent_does_not_keep_the_frame_loop_busy() {
    let (mut gui, probe) = gui();
    let frame = |gui: &mut Gui, wheel: f32, with_list: bool| {
        let mut input = input_at(0.5, 0.1);
        input.set_frame_time(1.0 / 60.0);
        input.scroll(wheel);
        begin(gui, &input);
        let list = with_list.then(|| {
            let list = gui.begin_parent("list", ParentFlags::SCROLL);
            for row in 0..8u64 {
                gui.write_widget(probe, row, WidgetFlags::NONE, ProbePayload { value: 0 });
            }
            gui.end_parent();
            list
        });
        gui.end();
        list
    };
    frame(&mut gui, 0.0, true);
    let list = frame(&mut gui, -5.0, true).unwrap();
    assert!(gui.is_animating());

    frame(&mut gui, 0.0, false);
    assert!(!gui.is_animating());
    // The offset is frozen where it was, not snapped to the target.
    assert_ne!(gui.parent_scroll(list), gui.parent_scroll_target(list));
}
