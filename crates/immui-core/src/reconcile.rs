//! Frame-end replay of the command buffer.
//!
//! The buffer is consumed once, in order. Widgets and parents are placed by
//! the layout of the parent they are declared in; the resulting rectangles
//! are parent-relative and converted to absolute coordinates afterwards, so
//! layout kinds never need to know how deep they are nested.

use immui_foundation::InputState;
use immui_ui_graphics::{Point, Rect, Size};

use crate::collections::map::HashSet;
use crate::command::{Command, WidgetRecord};
use crate::config::GuiConfig;
use crate::context::{LayoutContext, UpdateContext};
use crate::error::GuiError;
use crate::focus::FocusRouter;
use crate::gui::Gui;
use crate::id::Id;
use crate::property::{PropertyStack, PropertyTag, PropertyValue};
use crate::registry::{LayoutKindId, Registry, WidgetKindId};
use crate::scroll::step_scroll;
use crate::state::PersistentStore;
use crate::tree::{
    Layout, Parent, ParentArena, ParentFlags, ParentIndex, Widget, WidgetFlags, WidgetHeader,
    WIDGET_HEADER_SIZE,
};
use immui_render_common::GlyphMetrics;

/// Logs recoverable errors; corrupted-buffer errors abort.
fn report(err: GuiError) {
    if err.is_fatal() {
        panic!("corrupted command buffer: {err}");
    }
    if err.is_capacity() {
        log::error!("{err}");
    } else {
        log::warn!("{err}");
    }
}

pub(crate) fn new_layout(registry: &Registry, kind: LayoutKindId, capacity: usize) -> Layout {
    let (kind, data) = match registry.layout_kind(kind) {
        Some(layout) => (kind, layout.init()),
        None => {
            log::warn!("unknown layout kind {}, using no layout", kind.index());
            (LayoutKindId::NONE, Box::new(()) as Box<dyn std::any::Any>)
        }
    };
    Layout {
        kind,
        data,
        properties: PropertyStack::new(capacity),
    }
}

fn layout_bounds(registry: &Registry, layout: &mut Layout, cx: &LayoutContext) -> Result<Rect, GuiError> {
    let kind = registry
        .layout_kind(layout.kind)
        .ok_or_else(|| GuiError::UnknownLayoutKind {
            name: format!("#{}", layout.kind.index()),
        })?;
    kind.compute_bounds(layout.data.as_mut(), cx)
}

fn apply_layout_property(
    registry: &Registry,
    layout: &mut Layout,
    tag: PropertyTag,
    value: PropertyValue,
    capture: bool,
) -> Result<(), GuiError> {
    let kind = registry
        .layout_kind(layout.kind)
        .ok_or_else(|| GuiError::UnknownLayoutKind {
            name: format!("#{}", layout.kind.index()),
        })?;
    let Layout {
        data, properties, ..
    } = layout;
    if capture {
        properties.push_with(tag, value, |tag, value| {
            kind.apply_property(data.as_mut(), tag, value)
        })
    } else {
        kind.apply_property(data.as_mut(), tag, value).map(|_| ())
    }
}

struct Replay<'a> {
    config: &'a GuiConfig,
    registry: &'a mut Registry,
    tree: &'a mut ParentArena,
    store: &'a mut PersistentStore,
    pixel_size: Size,
    aspect: f32,
    /// `None` marks a parent that could not be allocated; its content is
    /// skipped.
    stack: Vec<Option<ParentIndex>>,
    seen: HashSet<Id>,
}

impl<'a> Replay<'a> {
    fn current(&self) -> Option<ParentIndex> {
        self.stack.last().copied().flatten()
    }

    fn layout_context(&self, index: ParentIndex) -> LayoutContext {
        LayoutContext {
            parent_bounds: self.tree[index].bounds,
            pixel_size: self.pixel_size,
            aspect: self.aspect,
        }
    }

    fn note_id(&mut self, id: Id, what: &str) {
        if !self.seen.insert(id) {
            log::warn!("{what} id {id:#x} declared twice in one frame");
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Widget(record) => self.read_widget(record),
            Command::BeginParent {
                id,
                name,
                flags,
                layout,
            } => self.begin_parent(id, name, flags, layout),
            Command::EndParent => self.end_parent(),
            Command::SetBackground(background) => {
                if let Some(index) = self.current() {
                    self.tree[index].background = Some(background);
                }
            }
            Command::LayoutPush { tag, value } => self.layout_property(tag, value, true),
            Command::LayoutSet { tag, value } => self.layout_property(tag, value, false),
            Command::LayoutPop { count } => self.layout_pop(count),
            Command::WidgetPush { kind, tag, value } => self.widget_property(kind, tag, value, true),
            Command::WidgetSet { kind, tag, value } => self.widget_property(kind, tag, value, false),
            Command::WidgetPop { kind, count } => {
                let result = match self.registry.widget_entry_mut(kind) {
                    Some(entry) => entry.pop(count),
                    None => Err(GuiError::UnknownWidgetKind { kind }),
                };
                if let Err(err) = result {
                    report(err);
                }
            }
        }
    }

    fn read_widget(&mut self, record: WidgetRecord) {
        let Some(index) = self.current() else {
            return;
        };
        let Some(entry) = self.registry.widget_entry(record.kind) else {
            report(GuiError::UnknownWidgetKind { kind: record.kind });
            return;
        };
        let cost = WIDGET_HEADER_SIZE + entry.kind.payload_size();
        let capacity = self.config.widget_buffer_capacity;
        let parent = &self.tree[index];
        if parent.buffer_used + cost > capacity {
            report(GuiError::WidgetBufferFull {
                parent: parent.id,
                widget: record.id,
                capacity,
            });
            return;
        }
        let mut header = WidgetHeader {
            id: record.id,
            flags: record.flags,
            kind: record.kind,
            bounds: Rect::ZERO,
        };
        let state = match entry.kind.read(&header, record.payload) {
            Ok(state) => state,
            Err(err) => {
                report(err);
                return;
            }
        };
        let cx = self.layout_context(index);
        let parent = &mut self.tree[index];
        header.bounds = match layout_bounds(self.registry, &mut parent.layout, &cx) {
            Ok(bounds) => bounds,
            Err(err) => {
                report(err);
                Rect::ZERO
            }
        };
        parent.buffer_used += cost;
        parent.widgets.push(Widget { header, state });
        self.tree.widget_count += 1;
        self.note_id(record.id, "widget");
    }

    fn begin_parent(&mut self, id: Id, name: String, flags: ParentFlags, layout: LayoutKindId) {
        let Some(enclosing) = self.current() else {
            self.stack.push(None);
            return;
        };
        // The root is not counted against the arena capacity.
        if self.tree.len() > self.config.max_parents {
            report(GuiError::ParentArenaFull {
                capacity: self.config.max_parents,
            });
            self.stack.push(None);
            return;
        }
        let cx = self.layout_context(enclosing);
        let outer = &mut self.tree[enclosing];
        let relative = match layout_bounds(self.registry, &mut outer.layout, &cx) {
            Ok(bounds) => bounds,
            Err(err) => {
                report(err);
                Rect::ZERO
            }
        };
        let bounds = outer.bounds.denormalize(&relative).translate(0.0, -outer.scroll);
        let popup = flags.contains(ParentFlags::POPUP);
        let visible = if popup {
            bounds.intersect(&Rect::UNIT)
        } else {
            outer.visible.and_then(|clip| bounds.intersect(&clip))
        };
        let depth = outer.depth + 1;
        let outer_popup = outer.popup_root;

        let state = if flags.contains(ParentFlags::EPHEMERAL) {
            None
        } else {
            Some(self.store.resolve(id, &name))
        };
        let scroll = state
            .and_then(|handle| self.store.get(handle))
            .map_or(0.0, |entry| entry.scroll);

        let layout = new_layout(self.registry, layout, self.config.property_stack_capacity);
        let mut parent = Parent::new(id, name, flags, layout);
        parent.bounds = bounds;
        parent.relative = relative;
        parent.visible = visible;
        parent.depth = depth;
        parent.state = state;
        parent.scroll = scroll;
        let index = self.tree.allocate(parent);
        self.tree[index].popup_root = if popup { Some(index) } else { outer_popup };
        self.tree[enclosing].children.push(index);
        self.stack.push(Some(index));
        self.note_id(id, "parent");
    }

    fn end_parent(&mut self) {
        if self.stack.len() <= 1 {
            report(GuiError::UnbalancedParent);
            return;
        }
        if let Some(Some(index)) = self.stack.pop() {
            let parent = &self.tree[index];
            if !parent.layout.properties.is_empty() {
                report(GuiError::UnbalancedLayoutStack {
                    parent: parent.id,
                    remaining: parent.layout.properties.len(),
                });
            }
        }
    }

    fn layout_property(&mut self, tag: PropertyTag, value: PropertyValue, capture: bool) {
        let Some(index) = self.current() else {
            return;
        };
        let layout = &mut self.tree[index].layout;
        if let Err(err) = apply_layout_property(self.registry, layout, tag, value, capture) {
            report(err);
        }
    }

    fn layout_pop(&mut self, count: usize) {
        let Some(index) = self.current() else {
            return;
        };
        let registry: &Registry = self.registry;
        let layout = &mut self.tree[index].layout;
        let Some(kind) = registry.layout_kind(layout.kind) else {
            return;
        };
        let Layout {
            data, properties, ..
        } = layout;
        if let Err(err) = properties.pop_with(count, |tag, value| {
            kind.apply_property(data.as_mut(), tag, value)
        }) {
            report(err);
        }
    }

    fn widget_property(&mut self, kind: WidgetKindId, tag: PropertyTag, value: PropertyValue, capture: bool) {
        let result = match self.registry.widget_entry_mut(kind) {
            Some(entry) if capture => entry.push(tag, value),
            Some(entry) => entry.kind.apply_property(tag, value).map(|_| ()),
            None => Err(GuiError::UnknownWidgetKind { kind }),
        };
        if let Err(err) = result {
            report(err);
        }
    }

    fn finish(&mut self) {
        if self.stack.len() != 1 {
            report(GuiError::UnbalancedParent);
        }
        let root = self.tree.root();
        if !root.layout.properties.is_empty() {
            report(GuiError::UnbalancedLayoutStack {
                parent: root.id,
                remaining: root.layout.properties.len(),
            });
        }
        for (kind, entry) in self.registry.widget_entries_mut() {
            if !entry.properties.is_empty() {
                log::error!(
                    "widget kind {} ends the frame with {} properties pushed",
                    kind.index(),
                    entry.properties.len()
                );
                entry.properties.clear();
            }
        }
    }
}

/// Finds the innermost stateful parent under the mouse. Popups are tested
/// first, latest declared on top; elsewhere the first matching child wins.
fn locate_mouse(tree: &mut ParentArena, mouse: Point) {
    let hit = |parent: &Parent| {
        parent.state.is_some() && parent.visible.is_some_and(|visible| visible.contains(mouse))
    };
    let popup = tree
        .iter()
        .filter(|(_, parent)| parent.is_popup() && hit(parent))
        .map(|(index, _)| index)
        .last();

    let mut current = popup.unwrap_or(ParentIndex::ROOT);
    let mut chain = vec![current];
    loop {
        let next = tree[current]
            .children
            .iter()
            .copied()
            .find(|child| !tree[*child].is_popup() && hit(&tree[*child]));
        match next {
            Some(child) => {
                current = child;
                chain.push(child);
            }
            None => break,
        }
    }
    tree.mouse_parent = current;
    tree.mouse_popup = popup;
    tree.scroll_parent = chain
        .into_iter()
        .rev()
        .find(|index| tree[*index].flags.contains(ParentFlags::SCROLL) && tree[*index].state.is_some());
}

/// Converts widget bounds to absolute coordinates, measures content, and
/// advances scroll state. Children are processed before their parents.
fn adjust_bounds(tree: &mut ParentArena, store: &mut PersistentStore, config: &GuiConfig, input: &InputState) {
    let scroll_parent = tree.scroll_parent;
    for position in (0..tree.len()).rev() {
        let index = ParentIndex(position);
        let (mut min, mut max) = (f32::MAX, f32::MIN);
        for child in &tree[index].children {
            let relative = tree[*child].relative;
            min = min.min(relative.y);
            max = max.max(relative.bottom());
        }
        let parent = &mut tree[index];
        let (bounds, scroll) = (parent.bounds, parent.scroll);
        for widget in &mut parent.widgets {
            let relative = widget.header.bounds;
            min = min.min(relative.y);
            max = max.max(relative.bottom());
            widget.header.bounds = bounds.denormalize(&relative).translate(0.0, -scroll);
        }
        if min > max {
            (min, max) = (0.0, 0.0);
        }
        parent.content_min = min;
        parent.content_max = max;

        let Some(handle) = parent.state else {
            continue;
        };
        let Some(state) = store.get_mut(handle) else {
            continue;
        };
        if !parent.flags.contains(ParentFlags::SCROLL) {
            state.scroll = 0.0;
            state.scroll_target = 0.0;
            continue;
        }
        let overflow = ((max - 1.0) * bounds.height).max(0.0);
        if scroll_parent == Some(index) && input.wheel_delta != 0.0 {
            state.scroll_target -= input.wheel_delta * config.scroll.wheel_step;
        }
        state.scroll_target = state.scroll_target.clamp(0.0, overflow);
        state.scroll = step_scroll(state.scroll, state.scroll_target, input.frame_time, &config.scroll)
            .clamp(0.0, overflow);
    }
}

struct Router<'a> {
    registry: &'a Registry,
    tree: &'a mut ParentArena,
    focus: &'a mut FocusRouter,
    input: &'a InputState,
    metrics: &'a dyn GlyphMetrics,
    mouse: Point,
    aspect: f32,
}

impl<'a> Router<'a> {
    fn update(&mut self, index: ParentIndex, slot: usize, has_focus: bool) {
        let parent = &self.tree[index];
        let visible = parent.visible.unwrap_or(Rect::ZERO);
        let hover_allowed = match self.tree.mouse_popup {
            Some(popup) => parent.popup_root == Some(popup),
            None => true,
        };
        let (parent_id, parent_bounds) = (parent.id, parent.bounds);
        let parent = &mut self.tree[index];
        let widget = &mut parent.widgets[slot];
        let Some(kind) = self.registry.widget_kind(widget.header.kind) else {
            return;
        };
        let mut cx = UpdateContext {
            input: self.input,
            mouse: self.mouse,
            parent: parent_id,
            parent_bounds,
            parent_visible: visible,
            frame_time: self.input.frame_time,
            aspect: self.aspect,
            metrics: self.metrics,
            hover_allowed,
            focus: &mut *self.focus,
        };
        kind.update(&mut cx, widget, has_focus);
    }

    /// The focused widget first, then every other visible enabled widget.
    fn run(&mut self) {
        let focused = self.focus.resolve(self.tree);
        if let Some((index, slot)) = focused {
            self.update(index, slot, true);
        }
        for position in 0..self.tree.len() {
            let index = ParentIndex(position);
            let Some(visible) = self.tree[index].visible else {
                continue;
            };
            for slot in 0..self.tree[index].widgets.len() {
                if focused == Some((index, slot)) {
                    continue;
                }
                let header = &self.tree[index].widgets[slot].header;
                if header.flags.contains(WidgetFlags::DISABLED) || !header.bounds.overlaps(&visible) {
                    continue;
                }
                self.update(index, slot, false);
            }
        }
    }
}

impl Gui {
    pub(crate) fn reconcile(&mut self) {
        let commands = self.commands.take();
        let command_count = commands.len();
        let root = new_layout(&self.registry, self.root_layout, self.config.property_stack_capacity);
        self.tree.reset(root);

        let mut replay = Replay {
            config: &self.config,
            registry: &mut self.registry,
            tree: &mut self.tree,
            store: &mut self.store,
            pixel_size: self.input.pixel_size(),
            aspect: self.input.aspect(),
            stack: vec![Some(ParentIndex::ROOT)],
            seen: HashSet::default(),
        };
        for command in commands {
            replay.apply(command);
        }
        replay.finish();

        let mouse = self.input.normalized_mouse();
        locate_mouse(&mut self.tree, mouse);
        adjust_bounds(&mut self.tree, &mut self.store, &self.config, &self.input);

        let mut router = Router {
            registry: &self.registry,
            tree: &mut self.tree,
            focus: &mut self.focus,
            input: &self.input,
            metrics: self.metrics.as_ref(),
            mouse,
            aspect: self.input.aspect(),
        };
        router.run();

        log::trace!(
            "frame {}: {} commands, {} parents, {} widgets, focus {:?}",
            self.frame(),
            command_count,
            self.tree.len(),
            self.tree.widget_count(),
            self.focus.record().map(|record| record.widget)
        );
    }
}
