use immui_render_common::Renderer;
use immui_ui_graphics::Rect;

use crate::context::DrawContext;
use crate::gui::Gui;
use crate::tree::{ParentIndex, WidgetFlags};

/// Walks the reconciled tree: background, child parents, then widgets, each
/// parent clipped to its bounds within its ancestors' clip. Popups are drawn
/// last with a fresh clip.
pub(crate) fn draw_tree(gui: &Gui, renderer: &mut dyn Renderer) {
    let mut cx = DrawContext {
        renderer,
        metrics: gui.metrics.as_ref(),
        font: gui.font,
        aspect: gui.input.aspect(),
        pixel_size: gui.input.pixel_size(),
        focused: gui.focus.record().map(|record| record.widget),
    };
    let mut popups = Vec::new();
    draw_parent(gui, &mut cx, ParentIndex::ROOT, &mut popups);
    let mut next = 0;
    while next < popups.len() {
        let popup = popups[next];
        draw_parent(gui, &mut cx, popup, &mut popups);
        next += 1;
    }
}

fn draw_parent(gui: &Gui, cx: &mut DrawContext<'_>, index: ParentIndex, popups: &mut Vec<ParentIndex>) {
    let tree = &gui.tree;
    let parent = &tree[index];
    if parent.visible.is_none() {
        return;
    }
    if let Some(background) = parent.background {
        match background.image {
            Some(image) => cx.renderer.draw_textured_rect(
                parent.bounds,
                background.tint,
                image,
                background.texcoords,
            ),
            None => cx.renderer.draw_filled_rect(parent.bounds, background.tint),
        }
    }
    cx.renderer.push_scissor(parent.bounds, !parent.is_popup());
    for child in &parent.children {
        if tree[*child].is_popup() {
            popups.push(*child);
        } else {
            draw_parent(gui, cx, *child, popups);
        }
    }
    for widget in &parent.widgets {
        if widget.header.flags.contains(WidgetFlags::HIDDEN) || !widget.header.bounds.overlaps(&Rect::UNIT) {
            continue;
        }
        if let Some(kind) = gui.registry.widget_kind(widget.header.kind) {
            kind.draw(cx, widget);
        }
    }
    cx.renderer.pop_scissor();
}
