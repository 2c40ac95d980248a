use std::any::Any;
use std::cell::Cell;

use immui_foundation::InputState;
use immui_render_common::{GlyphMetrics, MonospaceMetrics, Renderer};
use immui_ui_graphics::{FontId, Point, Rect};

use crate::collections::map::HashMap;
use crate::command::{Command, CommandBuffer, WidgetRecord};
use crate::config::GuiConfig;
use crate::focus::{FocusRecord, FocusRouter};
use crate::id::{id_from_str, Id, IdStack, ROOT_ID};
use crate::property::{PropertyStack, PropertyTag, PropertyValue};
use crate::registry::{LayoutKind, LayoutKindId, Registry, WidgetKind, WidgetKindId};
use crate::state::PersistentStore;
use crate::tree::{Background, Layout, Parent, ParentArena, ParentFlags, ParentIndex, Widget, WidgetFlags};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No frame has been declared yet.
    Idle,
    /// Between `begin` and `end`; the previous frame's tree is still queryable.
    Write,
    /// `end` has run and the tree reflects the last declared frame.
    Reconciled,
}

#[derive(Debug)]
struct OpenParent {
    id: Id,
    layout: LayoutKindId,
    layout_pushes: usize,
    /// Id stack depth inside this parent's scope.
    id_depth: usize,
}

/// One GUI instance: registries, the frame being written, the last
/// reconciled tree, and the state that survives between frames.
pub struct Gui {
    pub(crate) config: GuiConfig,
    pub(crate) registry: Registry,
    pub(crate) commands: CommandBuffer,
    ids: IdStack,
    open: Vec<OpenParent>,
    widget_pushes: HashMap<WidgetKindId, usize>,
    pub(crate) tree: ParentArena,
    pub(crate) store: PersistentStore,
    pub(crate) focus: FocusRouter,
    pub(crate) input: InputState,
    pub(crate) root_layout: LayoutKindId,
    pub(crate) font: FontId,
    pub(crate) metrics: Box<dyn GlyphMetrics>,
    last_parent: Cell<ParentIndex>,
    phase: Phase,
    frame: u64,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl Gui {
    pub fn new(config: GuiConfig) -> Self {
        let registry = Registry::new(config.property_stack_capacity);
        let root = Layout {
            kind: LayoutKindId::NONE,
            data: Box::new(()),
            properties: PropertyStack::new(config.property_stack_capacity),
        };
        Self {
            registry,
            commands: CommandBuffer::new(),
            ids: IdStack::new(),
            open: Vec::new(),
            widget_pushes: HashMap::default(),
            tree: ParentArena::new(root),
            store: PersistentStore::new(),
            focus: FocusRouter::new(),
            input: InputState::default(),
            root_layout: LayoutKindId::NONE,
            font: FontId::DEFAULT,
            metrics: Box::new(MonospaceMetrics::default()),
            last_parent: Cell::new(ParentIndex::ROOT),
            phase: Phase::Idle,
            frame: 0,
            config,
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of frames begun so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn register_widget_kind(&mut self, kind: impl WidgetKind) -> WidgetKindId {
        self.registry.register_widget_kind(Box::new(kind))
    }

    pub fn register_layout_kind(&mut self, kind: impl LayoutKind) -> LayoutKindId {
        self.registry.register_layout_kind(Box::new(kind))
    }

    pub fn widget_kind_by_name(&self, name: &str) -> Option<WidgetKindId> {
        self.registry.widget_kind_by_name(name)
    }

    pub fn layout_kind_by_name(&self, name: &str) -> Option<LayoutKindId> {
        self.registry.layout_kind_by_name(name)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn set_glyph_metrics(&mut self, metrics: Box<dyn GlyphMetrics>) {
        self.metrics = metrics;
    }

    pub fn glyph_metrics(&self) -> &dyn GlyphMetrics {
        self.metrics.as_ref()
    }

    pub fn default_font(&self) -> FontId {
        self.font
    }

    /// Input captured by the last [`Gui::begin`].
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Mouse position of the current frame in viewport units.
    pub fn mouse(&self) -> Point {
        self.input.normalized_mouse()
    }

    // ---- write phase -------------------------------------------------

    /// Starts declaring a frame. The root parent uses the layout registered
    /// as `layout`; an unknown name falls back to no layout.
    pub fn begin(&mut self, input: &InputState, layout: &str, font: FontId) {
        if self.phase == Phase::Write {
            log::warn!(
                "begin called with {} commands pending, discarding them",
                self.commands.len()
            );
        }
        self.commands.clear();
        self.ids.reset();
        self.open.clear();
        self.widget_pushes.clear();
        self.root_layout = match self.registry.layout_kind_by_name(layout) {
            Some(kind) => kind,
            None => {
                log::warn!("unknown layout kind `{layout}`, root falls back to no layout");
                LayoutKindId::NONE
            }
        };
        self.input = input.clone();
        self.font = font;
        self.open.push(OpenParent {
            id: ROOT_ID,
            layout: self.root_layout,
            layout_pushes: 0,
            id_depth: 0,
        });
        self.phase = Phase::Write;
        self.frame += 1;
    }

    fn writing(&self, call: &str) -> bool {
        if self.phase == Phase::Write {
            true
        } else {
            log::error!("{call} called outside of begin/end, ignoring");
            false
        }
    }

    pub fn push_id(&mut self, seed: Id) {
        self.ids.push(seed);
    }

    pub fn push_id_str(&mut self, label: &str) {
        self.ids.push(id_from_str(label));
    }

    /// Pops a scope pushed with [`Gui::push_id`]. Scopes opened by parents
    /// are only closed by [`Gui::end_parent`].
    pub fn pop_id(&mut self) {
        let floor = self.open.last().map_or(0, |open| open.id_depth);
        if self.ids.depth() <= floor {
            log::error!("pop_id without a matching push_id, ignoring");
            return;
        }
        self.ids.pop();
    }

    /// The id a widget declared with `seed` would get in the current scope.
    pub fn resolve_id(&self, seed: Id) -> Id {
        self.ids.resolve(seed)
    }

    /// Records a widget and returns its id, which can be used right away to
    /// read the widget's state from the previous frame.
    pub fn write_widget<P: Any>(
        &mut self,
        kind: WidgetKindId,
        seed: Id,
        flags: WidgetFlags,
        payload: P,
    ) -> Id {
        let id = self.ids.resolve(seed);
        if self.writing("write_widget") {
            self.commands.push(Command::Widget(WidgetRecord {
                id,
                flags,
                kind,
                payload: Box::new(payload),
            }));
        }
        id
    }

    /// Opens a parent laid out with its enclosing parent's layout kind.
    pub fn begin_parent(&mut self, name: &str, flags: ParentFlags) -> Id {
        let layout = self.open.last().map_or(self.root_layout, |open| open.layout);
        self.begin_parent_with_layout(name, flags, layout)
    }

    /// Opens a parent whose children are placed by `layout`. The parent's id
    /// becomes a scope for everything declared inside it.
    pub fn begin_parent_with_layout(
        &mut self,
        name: &str,
        flags: ParentFlags,
        layout: LayoutKindId,
    ) -> Id {
        let id = self.ids.resolve(id_from_str(name));
        if !self.writing("begin_parent") {
            return id;
        }
        self.commands.push(Command::BeginParent {
            id,
            name: name.to_owned(),
            flags,
            layout,
        });
        self.ids.push(id);
        self.open.push(OpenParent {
            id,
            layout,
            layout_pushes: 0,
            id_depth: self.ids.depth(),
        });
        id
    }

    pub fn end_parent(&mut self) {
        if !self.writing("end_parent") {
            return;
        }
        if self.open.len() <= 1 {
            log::error!("end_parent without a matching begin_parent, ignoring");
            return;
        }
        let Some(top) = self.open.pop() else {
            return;
        };
        if top.layout_pushes > 0 {
            log::warn!(
                "parent {:#x} closed with {} layout properties pushed, popping them",
                top.id,
                top.layout_pushes
            );
            self.commands.push(Command::LayoutPop {
                count: top.layout_pushes,
            });
        }
        if self.ids.depth() > top.id_depth {
            log::warn!("parent {:#x} closed with unbalanced push_id", top.id);
        }
        while self.ids.depth() >= top.id_depth && self.ids.depth() > 0 {
            self.ids.pop();
        }
        self.commands.push(Command::EndParent);
    }

    pub fn set_background(&mut self, background: Background) {
        if self.writing("set_background") {
            self.commands.push(Command::SetBackground(background));
        }
    }

    /// Overrides a property of the current parent's layout until the
    /// matching [`Gui::layout_pop`].
    pub fn layout_push(&mut self, tag: PropertyTag, value: impl Into<PropertyValue>) {
        if !self.writing("layout_push") {
            return;
        }
        if let Some(open) = self.open.last_mut() {
            open.layout_pushes += 1;
        }
        self.commands.push(Command::LayoutPush {
            tag,
            value: value.into(),
        });
    }

    pub fn layout_set(&mut self, tag: PropertyTag, value: impl Into<PropertyValue>) {
        if self.writing("layout_set") {
            self.commands.push(Command::LayoutSet {
                tag,
                value: value.into(),
            });
        }
    }

    pub fn layout_pop(&mut self, count: usize) {
        if !self.writing("layout_pop") {
            return;
        }
        let Some(open) = self.open.last_mut() else {
            return;
        };
        let count = if count > open.layout_pushes {
            log::error!(
                "layout_pop({count}) with only {} pushed in parent {:#x}",
                open.layout_pushes,
                open.id
            );
            open.layout_pushes
        } else {
            count
        };
        if count == 0 {
            return;
        }
        open.layout_pushes -= count;
        self.commands.push(Command::LayoutPop { count });
    }

    /// Overrides a kind-global property for every widget of `kind` declared
    /// until the matching [`Gui::widget_pop`].
    pub fn widget_push(&mut self, kind: WidgetKindId, tag: PropertyTag, value: impl Into<PropertyValue>) {
        if !self.writing("widget_push") {
            return;
        }
        *self.widget_pushes.entry(kind).or_insert(0) += 1;
        self.commands.push(Command::WidgetPush {
            kind,
            tag,
            value: value.into(),
        });
    }

    pub fn widget_set(&mut self, kind: WidgetKindId, tag: PropertyTag, value: impl Into<PropertyValue>) {
        if self.writing("widget_set") {
            self.commands.push(Command::WidgetSet {
                kind,
                tag,
                value: value.into(),
            });
        }
    }

    pub fn widget_pop(&mut self, kind: WidgetKindId, count: usize) {
        if !self.writing("widget_pop") {
            return;
        }
        let pushed = self.widget_pushes.get(&kind).copied().unwrap_or(0);
        let count = if count > pushed {
            log::error!("widget_pop({count}) with only {pushed} pushed for kind {}", kind.index());
            pushed
        } else {
            count
        };
        if count == 0 {
            return;
        }
        self.widget_pushes.insert(kind, pushed - count);
        self.commands.push(Command::WidgetPop { kind, count });
    }

    /// Closes the frame: replays the command buffer into a fresh tree,
    /// updates scroll state, and routes input to the widgets.
    pub fn end(&mut self) {
        if !self.writing("end") {
            return;
        }
        while self.open.len() > 1 {
            if let Some(open) = self.open.last() {
                log::warn!("parent {:#x} left open at end of frame, closing it", open.id);
            }
            self.end_parent();
        }
        if let Some(root) = self.open.pop() {
            if root.layout_pushes > 0 {
                log::warn!("{} root layout properties left pushed, popping them", root.layout_pushes);
                self.commands.push(Command::LayoutPop {
                    count: root.layout_pushes,
                });
            }
        }
        let mut leftovers: Vec<(WidgetKindId, usize)> = self
            .widget_pushes
            .drain()
            .filter(|(_, count)| *count > 0)
            .collect();
        leftovers.sort();
        for (kind, count) in leftovers {
            log::warn!("{count} properties of widget kind {} left pushed, popping them", kind.index());
            self.commands.push(Command::WidgetPop { kind, count });
        }
        self.reconcile();
        self.phase = Phase::Reconciled;
    }

    /// Draws the last reconciled tree. Does not change any state and can be
    /// called any number of times.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        crate::draw::draw_tree(self, renderer);
    }

    // ---- queries -----------------------------------------------------

    pub fn tree(&self) -> &ParentArena {
        &self.tree
    }

    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    /// Widget `id` in the last reconciled tree. Missing on the first frame a
    /// widget is declared.
    pub fn find_widget(&self, id: Id) -> Option<&Widget> {
        if let Some(parent) = self.tree.get(self.last_parent.get()) {
            if let Some(widget) = parent.find_widget(id) {
                return Some(widget);
            }
        }
        let (index, slot) = self.tree.find_widget(id)?;
        self.last_parent.set(index);
        self.tree.widget(index, slot)
    }

    pub fn widget_state<T: Any>(&self, id: Id) -> Option<&T> {
        self.find_widget(id).and_then(|widget| widget.state::<T>())
    }

    pub fn widget_bounds(&self, id: Id) -> Option<Rect> {
        self.find_widget(id).map(Widget::bounds)
    }

    pub fn find_parent(&self, id: Id) -> Option<&Parent> {
        self.tree.find(id).map(|index| &self.tree[index])
    }

    /// Innermost stateful parent under the mouse.
    pub fn mouse_parent(&self) -> &Parent {
        &self.tree[self.tree.mouse_parent()]
    }

    /// Whether the current mouse position reaches widget `id` as laid out by
    /// the last frame. Mirrors the hover test widgets get during update, so
    /// popups covering the widget block it.
    pub fn mouse_reaches(&self, id: Id) -> bool {
        let mouse = self.mouse();
        let Some((index, slot)) = self.tree.find_widget(id) else {
            return false;
        };
        let parent = &self.tree[index];
        let inside = |rect: Option<Rect>| rect.is_some_and(|rect| rect.contains(mouse));
        if !inside(parent.widgets.get(slot).map(Widget::bounds)) || !inside(parent.visible) {
            return false;
        }
        let popup = self
            .tree
            .iter()
            .filter(|(_, candidate)| {
                candidate.is_popup() && candidate.state.is_some() && inside(candidate.visible)
            })
            .map(|(index, _)| index)
            .last();
        popup.map_or(true, |popup| parent.popup_root == Some(popup))
    }

    /// Live scroll offset of a stateful parent.
    pub fn parent_scroll(&self, id: Id) -> Option<f32> {
        self.store.by_id(id).map(|state| state.scroll)
    }

    pub fn parent_scroll_target(&self, id: Id) -> Option<f32> {
        self.store.by_id(id).map(|state| state.scroll_target)
    }

    /// True while a parent of the reconciled tree is still moving its scroll
    /// offset towards its target, so the host should keep producing frames.
    /// State of parents no longer declared is frozen and does not count.
    pub fn is_animating(&self) -> bool {
        self.tree
            .iter()
            .filter_map(|(_, parent)| parent.state)
            .filter_map(|handle| self.store.get(handle))
            .any(|state| state.scroll != state.scroll_target)
    }

    pub fn has_focus(&self) -> bool {
        self.focus.has_focus()
    }

    pub fn is_focused(&self, id: Id) -> bool {
        self.focus.is_focused(id)
    }

    pub fn focused(&self) -> Option<FocusRecord> {
        self.focus.record()
    }

    pub fn focus_action(&self) -> Option<u32> {
        self.focus.action()
    }

    pub fn set_focus(&mut self, record: FocusRecord) {
        self.focus.set_record(record);
    }

    pub fn free_focus(&mut self) {
        self.focus.free();
    }
}

#[cfg(test)]
#[path = "tests/gui_tests.rs"]
mod tests;
