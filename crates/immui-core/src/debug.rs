//! Text dump of the reconciled tree.

use std::fmt::Write;

use crate::gui::Gui;
use crate::tree::ParentIndex;

/// Renders the last reconciled tree as indented text, one line per parent
/// and widget.
pub fn format_tree(gui: &Gui) -> String {
    let mut out = String::new();
    write_parent(gui, ParentIndex::ROOT, &mut out);
    if let Some(focus) = gui.focused() {
        let _ = writeln!(
            out,
            "focus: widget {:#x} in parent {:#x} (action {})",
            focus.widget, focus.parent, focus.action
        );
    }
    out
}

fn write_parent(gui: &Gui, index: ParentIndex, out: &mut String) {
    let tree = gui.tree();
    let parent = &tree[index];
    let indent = "  ".repeat(parent.depth as usize);
    let bounds = parent.bounds;
    let _ = writeln!(
        out,
        "{indent}{} [{:#x}] flags={:#x} bounds=({:.3}, {:.3}, {:.3}, {:.3}) scroll={:.3} content={:.3}..{:.3} buffer={}B{}",
        parent.name,
        parent.id,
        parent.flags.0,
        bounds.x,
        bounds.y,
        bounds.width,
        bounds.height,
        parent.scroll,
        parent.content_min,
        parent.content_max,
        parent.buffer_used(),
        if parent.visible.is_none() { " hidden" } else { "" },
    );
    for widget in &parent.widgets {
        let header = widget.header;
        let (name, detail) = match gui.registry().widget_kind(header.kind) {
            Some(kind) => (kind.name().to_owned(), kind.describe(widget)),
            None => (format!("#{}", header.kind.index()), String::new()),
        };
        let _ = writeln!(
            out,
            "{indent}  - {name} [{:#x}] ({:.3}, {:.3}, {:.3}, {:.3}) {detail}",
            header.id, header.bounds.x, header.bounds.y, header.bounds.width, header.bounds.height,
        );
    }
    for child in &parent.children {
        write_parent(gui, *child, out);
    }
}

/// Logs [`format_tree`] at debug level.
pub fn log_tree(gui: &Gui) {
    log::debug!("gui tree (frame {}):\n{}", gui.frame(), format_tree(gui));
}
