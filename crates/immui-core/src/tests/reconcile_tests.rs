use immui_foundation::PointerButton;
use immui_render_common::{HeadlessRenderer, RenderOp};
use immui_ui_graphics::{Color, Rect};

use crate::test_support::{
    begin, gui, gui_with, input_at, ProbePayload, ProbeState, CURSOR, ROW_HEIGHT, TINT,
};
use crate::*;

fn probe_at(gui: &mut Gui, probe: WidgetKindId, seed: Id) -> Id {
    gui.write_widget(probe, seed, WidgetFlags::NONE, ProbePayload { value: seed as i32 })
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn widgets_get_absolute_bounds_inside_nested_parents() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    probe_at(&mut gui, probe, 1);
    let panel = gui.begin_parent("panel", ParentFlags::NONE);
    let inner = probe_at(&mut gui, probe, 2);
    let second = probe_at(&mut gui, probe, 3);
    gui.end_parent();
    gui.layout_pop(1);
    gui.end();

    let parent = gui.find_parent(panel).unwrap();
    assert_eq!(parent.bounds, Rect::new(0.0, 0.5, 1.0, 0.5));
    assert_eq!(gui.widget_bounds(inner), Some(Rect::new(0.0, 0.5, 1.0, 0.125)));
    assert_eq!(gui.widget_bounds(second), Some(Rect::new(0.0, 0.625, 1.0, 0.125)));
    assert_eq!(parent.depth, 1);
    assert!(close(parent.content_max, 0.5));
}

#[test]
fn layout_push_pop_restores_interleaved_values() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.1f32);
    let a = probe_at(&mut gui, probe, 1);
    gui.layout_push(ROW_HEIGHT, 0.2f32);
    gui.layout_set(CURSOR, 0.5f32);
    let b = probe_at(&mut gui, probe, 2);
    gui.layout_pop(1);
    let c = probe_at(&mut gui, probe, 3);
    gui.layout_pop(1);
    let d = probe_at(&mut gui, probe, 4);
    gui.end();

    let height = |id| gui.widget_bounds(id).unwrap().height;
    assert!(close(height(a), 0.1));
    assert!(close(height(b), 0.2));
    assert!(close(height(c), 0.1));
    assert!(close(height(d), 0.25));
    // A set is not undone by the pop.
    assert!(close(gui.widget_bounds(b).unwrap().y, 0.5));
}

#[test]
fn widget_kind_properties_apply_to_later_widgets_only() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    let before = probe_at(&mut gui, probe, 1);
    gui.widget_push(probe, TINT, 0.9f32);
    let during = probe_at(&mut gui, probe, 2);
    gui.widget_pop(probe, 1);
    let after = probe_at(&mut gui, probe, 3);
    gui.end();

    let tint = |id| gui.widget_state::<ProbeState>(id).unwrap().tint;
    assert_eq!(tint(before), 0.5);
    assert_eq!(tint(during), 0.9);
    assert_eq!(tint(after), 0.5);
}

#[test]
fn widget_buffer_accepts_exactly_its_capacity() {
    let cost = WIDGET_HEADER_SIZE + std::mem::size_of::<ProbePayload>();
    let (mut gui, probe) = gui_with(GuiConfig::default().with_widget_buffer_capacity(3 * cost));
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.01f32);
    let full = gui.begin_parent("full", ParentFlags::NONE);
    let kept: Vec<Id> = (0..3).map(|seed| probe_at(&mut gui, probe, seed)).collect();
    gui.end_parent();
    let over = gui.begin_parent("over", ParentFlags::NONE);
    let written: Vec<Id> = (0..4).map(|seed| probe_at(&mut gui, probe, seed)).collect();
    gui.end_parent();
    let next = gui.begin_parent("next", ParentFlags::NONE);
    let after = probe_at(&mut gui, probe, 0);
    gui.end_parent();
    gui.layout_pop(1);
    gui.end();

    assert_eq!(gui.find_parent(full).unwrap().widgets.len(), 3);
    assert_eq!(gui.find_parent(full).unwrap().buffer_used(), 3 * cost);
    assert!(kept.iter().all(|id| gui.find_widget(*id).is_some()));

    let over = gui.find_parent(over).unwrap();
    assert_eq!(over.widgets.len(), 3);
    assert!(over.find_widget(written[3]).is_none());

    let next = gui.find_parent(next).unwrap();
    assert_eq!(next.widgets.len(), 1);
    assert!(next.find_widget(after).is_some());
}

#[test]
fn parent_arena_overflow_drops_the_subtree_only() {
    let (mut gui, probe) = gui_with(GuiConfig::default().with_max_parents(2));
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.1f32);
    let a = gui.begin_parent("a", ParentFlags::NONE);
    gui.end_parent();
    let b = gui.begin_parent("b", ParentFlags::NONE);
    gui.end_parent();
    let c = gui.begin_parent("c", ParentFlags::NONE);
    let lost = probe_at(&mut gui, probe, 1);
    gui.begin_parent("c-inner", ParentFlags::NONE);
    gui.end_parent();
    gui.end_parent();
    let survivor = probe_at(&mut gui, probe, 2);
    gui.layout_pop(1);
    gui.end();

    assert_eq!(gui.tree().len(), 3);
    assert!(gui.find_parent(a).is_some());
    assert!(gui.find_parent(b).is_some());
    assert!(gui.find_parent(c).is_none());
    assert!(gui.find_widget(lost).is_none());
    assert_eq!(gui.tree().root().widgets.len(), 1);
    assert!(gui.find_widget(survivor).is_some());
}

#[test]
fn default_arena_holds_a_thousand_declared_parents() {
    let (mut gui, _) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    let ids: Vec<Id> = (0..1001u64)
        .map(|seed| {
            gui.push_id(seed);
            let id = gui.begin_parent("p", ParentFlags::EPHEMERAL);
            gui.end_parent();
            gui.pop_id();
            id
        })
        .collect();
    gui.end();

    assert_eq!(gui.tree().len(), 1001);
    assert!(gui.find_parent(ids[999]).is_some());
    assert!(gui.find_parent(ids[1000]).is_none());
}

#[test]
fn duplicate_ids_are_kept() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    let first = probe_at(&mut gui, probe, 1);
    let second = probe_at(&mut gui, probe, 1);
    gui.end();
    assert_eq!(first, second);
    assert_eq!(gui.tree().widget_count(), 2);
    assert_eq!(gui.widget_state::<ProbeState>(first).unwrap().value, 1);
}

fn focus_frame(gui: &mut Gui, probe: WidgetKindId, input: &immui_foundation::InputState) -> Id {
    begin(gui, input);
    let id = probe_at(gui, probe, 1);
    gui.end();
    id
}

#[test]
fn press_focuses_and_release_frees() {
    let (mut gui, probe) = gui();
    let mut input = input_at(0.5, 0.1);
    input.press(PointerButton::Primary);
    let id = focus_frame(&mut gui, probe, &input);
    let focus = gui.focused().unwrap();
    assert_eq!(focus.widget, id);
    assert_eq!(focus.parent, ROOT_ID);
    assert_eq!(gui.focus_action(), Some(7));

    input.end_frame();
    focus_frame(&mut gui, probe, &input);
    let state = gui.widget_state::<ProbeState>(id).unwrap();
    assert!(state.had_focus);
    assert_eq!(state.updates, 1);
    assert!(gui.is_focused(id));

    input.release(PointerButton::Primary);
    focus_frame(&mut gui, probe, &input);
    assert!(gui.widget_state::<ProbeState>(id).unwrap().released);
    assert!(!gui.has_focus());
}

#[test]
fn focus_is_exclusive() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    let a = probe_at(&mut gui, probe, 1);
    let b = probe_at(&mut gui, probe, 2);
    gui.end();

    let record = |widget| FocusRecord {
        kind: probe,
        widget,
        parent: ROOT_ID,
        action: 0,
    };
    gui.set_focus(record(a));
    gui.set_focus(record(b));
    assert!(!gui.is_focused(a));
    assert!(gui.is_focused(b));
    gui.free_focus();
    assert!(!gui.has_focus());
}

#[test]
fn focus_is_cleared_when_the_widget_disappears() {
    let (mut gui, probe) = gui();
    let mut input = input_at(0.5, 0.1);
    input.press(PointerButton::Primary);
    focus_frame(&mut gui, probe, &input);
    assert!(gui.has_focus());

    input.end_frame();
    begin(&mut gui, &input);
    probe_at(&mut gui, probe, 2);
    gui.end();
    assert!(!gui.has_focus());
}

#[test]
fn disabled_and_offscreen_widgets_are_not_updated() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    let visible = probe_at(&mut gui, probe, 1);
    let disabled = gui.write_widget(probe, 2, WidgetFlags::DISABLED, ProbePayload { value: 2 });
    let offscreen = probe_at(&mut gui, probe, 3);
    gui.layout_pop(1);
    gui.end();

    let updates = |id| gui.widget_state::<ProbeState>(id).unwrap().updates;
    assert_eq!(updates(visible), 1);
    assert_eq!(updates(disabled), 0);
    assert_eq!(updates(offscreen), 0);
}

#[test]
fn mouse_descends_into_the_first_matching_stateful_child() {
    let (mut gui, _probe) = gui();
    begin(&mut gui, &input_at(0.5, 0.1));
    let outer = gui.begin_parent("outer", ParentFlags::NONE);
    gui.layout_set(ROW_HEIGHT, 1.0f32);
    let first = gui.begin_parent("first", ParentFlags::NONE);
    gui.end_parent();
    gui.layout_set(CURSOR, 0.0f32);
    gui.begin_parent("second", ParentFlags::NONE);
    gui.end_parent();
    gui.end_parent();
    gui.begin_parent("group", ParentFlags::EPHEMERAL);
    gui.end_parent();
    gui.end();

    assert_eq!(gui.mouse_parent().id, first);
    assert!(gui.find_parent(outer).unwrap().state.is_some());
    assert!(gui.store().len() == 3);
}

#[test]
fn ephemeral_parents_have_no_state_and_are_not_hit() {
    let (mut gui, _probe) = gui();
    begin(&mut gui, &input_at(0.5, 0.1));
    let group = gui.begin_parent("group", ParentFlags::EPHEMERAL);
    gui.end_parent();
    gui.end();

    assert!(gui.find_parent(group).unwrap().state.is_none());
    assert!(gui.store().is_empty());
    assert_eq!(gui.mouse_parent().id, ROOT_ID);
    assert_eq!(gui.parent_scroll(group), None);
}

fn popup_frame(gui: &mut Gui, probe: WidgetKindId, input: &immui_foundation::InputState) -> (Id, Id, Id) {
    begin(gui, input);
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    let under = probe_at(gui, probe, 1);
    gui.layout_set(CURSOR, 0.0f32);
    let menu = gui.begin_parent("menu", ParentFlags::POPUP);
    let item = probe_at(gui, probe, 2);
    gui.end_parent();
    gui.layout_pop(1);
    gui.end();
    (under, menu, item)
}

#[test]
fn popups_take_the_mouse_and_draw_last() {
    let (mut gui, probe) = gui();
    let mut input = input_at(0.5, 0.05);
    input.press(PointerButton::Primary);
    let (under, menu, item) = popup_frame(&mut gui, probe, &input);

    assert_eq!(gui.mouse_parent().id, menu);
    assert!(gui.is_focused(item));
    assert!(!gui.is_focused(under));

    let mut renderer = HeadlessRenderer::new();
    gui.draw(&mut renderer);
    let ops = renderer.take_scene().into_operations();
    let popup_scissor = ops
        .iter()
        .position(|op| matches!(op, RenderOp::PushScissor { additive: false, .. }))
        .unwrap();
    let root_pop = ops.iter().position(|op| matches!(op, RenderOp::PopScissor)).unwrap();
    assert!(root_pop < popup_scissor);
    let item_bounds = gui.widget_bounds(item).unwrap();
    assert!(matches!(
        ops[popup_scissor + 1],
        RenderOp::FilledRect { bounds, .. } if bounds == item_bounds
    ));
}

#[test]
fn child_parents_draw_after_the_background_and_before_widgets() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    gui.begin_parent("outer", ParentFlags::NONE);
    gui.set_background(Background::color(Color::BLACK));
    let widget = probe_at(&mut gui, probe, 1);
    gui.begin_parent("inner", ParentFlags::NONE);
    gui.set_background(Background::color(Color::WHITE));
    gui.end_parent();
    gui.end_parent();
    gui.layout_pop(1);
    gui.end();

    let mut renderer = HeadlessRenderer::new();
    gui.draw(&mut renderer);
    let ops = renderer.take_scene().into_operations();
    let fill = |wanted: Color| {
        ops.iter()
            .position(|op| matches!(op, RenderOp::FilledRect { color, .. } if *color == wanted))
            .unwrap()
    };
    let widget_bounds = gui.widget_bounds(widget).unwrap();
    let widget_op = ops
        .iter()
        .position(|op| matches!(op, RenderOp::FilledRect { bounds, .. } if *bounds == widget_bounds))
        .unwrap();

    assert!(fill(Color::BLACK) < fill(Color::WHITE));
    assert!(fill(Color::WHITE) < widget_op);
}

#[test]
fn draw_is_repeatable() {
    let (mut gui, probe) = gui();
    let input = input_at(0.5, 0.05);
    popup_frame(&mut gui, probe, &input);
    let mut first = HeadlessRenderer::new();
    let mut second = HeadlessRenderer::new();
    gui.draw(&mut first);
    gui.draw(&mut second);
    assert_eq!(second.scissor_depth(), 0);
    assert_eq!(first.take_scene(), second.take_scene());
}

fn scroll_frame(gui: &mut Gui, probe: WidgetKindId, wheel: f32) -> Id {
    let mut input = input_at(0.5, 0.25);
    input.scroll(wheel);
    input.set_frame_time(1.0 / 60.0);
    begin(gui, &input);
    gui.layout_push(ROW_HEIGHT, 0.5f32);
    let list = gui.begin_parent("list", ParentFlags::SCROLL);
    for seed in 0..8 {
        probe_at(gui, probe, seed);
    }
    gui.end_parent();
    gui.layout_pop(1);
    gui.end();
    list
}

#[test]
fn wheel_scrolls_towards_a_clamped_target_at_bounded_speed() {
    let (mut gui, probe) = gui();
    let max_step = gui.config().scroll.max_velocity / 60.0 + 1e-6;
    let overflow = 0.5;

    let list = scroll_frame(&mut gui, probe, 0.0);
    assert_eq!(gui.parent_scroll(list), Some(0.0));
    assert!(close(gui.find_parent(list).unwrap().content_max, 2.0));

    let mut previous = 0.0;
    for _ in 0..120 {
        scroll_frame(&mut gui, probe, -1.0);
        let scroll = gui.parent_scroll(list).unwrap();
        let target = gui.parent_scroll_target(list).unwrap();
        assert!(scroll >= previous);
        assert!(scroll - previous <= max_step);
        assert!((0.0..=overflow).contains(&scroll));
        assert!((0.0..=overflow).contains(&target));
        previous = scroll;
    }
    assert!(close(previous, overflow));

    for _ in 0..120 {
        scroll_frame(&mut gui, probe, 1.0);
        let scroll = gui.parent_scroll(list).unwrap();
        assert!(scroll <= previous);
        assert!(scroll >= 0.0);
        previous = scroll;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn scroll_offset_moves_content() {
    let (mut gui, probe) = gui();
    for _ in 0..60 {
        scroll_frame(&mut gui, probe, -1.0);
    }
    scroll_frame(&mut gui, probe, 0.0);
    let id = scroll_frame(&mut gui, probe, 0.0);
    let list = gui.find_parent(id).unwrap();
    let scroll = list.scroll;
    let first = &list.widgets[0];
    assert!(scroll > 0.0);
    assert!(close(first.bounds().y, list.bounds.y - scroll));
}

#[test]
fn non_scroll_parents_ignore_the_wheel() {
    let (mut gui, probe) = gui();
    let mut input = input_at(0.5, 0.1);
    input.scroll(-3.0);
    begin(&mut gui, &input);
    let panel = gui.begin_parent("panel", ParentFlags::NONE);
    for seed in 0..10 {
        probe_at(&mut gui, probe, seed);
    }
    gui.end_parent();
    gui.end();
    assert_eq!(gui.parent_scroll(panel), Some(0.0));
}

#[test]
#[should_panic(expected = "property stack underflow")]
fn layout_underflow_is_fatal() {
    let (mut gui, _probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.commands.push(Command::LayoutPop { count: 1 });
    gui.end();
}

#[test]
#[should_panic(expected = "end_parent without a matching begin_parent")]
fn unmatched_end_parent_record_is_fatal() {
    let (mut gui, _probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.commands.push(Command::EndParent);
    gui.end();
}

#[test]
fn debug_dump_lists_parents_and_widgets() {
    let (mut gui, probe) = gui();
    begin(&mut gui, &input_at(0.0, 0.0));
    gui.begin_parent("sidebar", ParentFlags::NONE);
    probe_at(&mut gui, probe, 1);
    gui.end_parent();
    gui.end();
    let dump = debug::format_tree(&gui);
    assert!(dump.starts_with("root"));
    assert!(dump.contains("  sidebar"));
    assert!(dump.contains("- probe"));
}
