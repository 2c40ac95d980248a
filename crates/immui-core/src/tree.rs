//! Frame-scoped parents and widgets.
//!
//! Every frame the reconciler rebuilds the tree inside a [`ParentArena`].
//! Parents refer to each other by [`ParentIndex`]; nothing in the arena
//! survives the next reconciliation, only ids do.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::ops::BitOr;

use immui_ui_graphics::{Color, ImageId, Rect};

use crate::id::{Id, ROOT_ID};
use crate::property::PropertyStack;
use crate::registry::{LayoutKindId, WidgetKindId};
use crate::state::StateHandle;

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident { $($(#[$flag_meta:meta])* $flag:ident = $bit:expr,)* }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub u32);

        impl $name {
            pub const NONE: Self = Self(0);
            $($(#[$flag_meta])* pub const $flag: Self = Self($bit);)*

            pub fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

flag_set! {
    /// Generic per-widget behaviour bits. Kinds may use bits from 16 up.
    WidgetFlags {
        /// Skipped by the update sweep.
        DISABLED = 1 << 0,
        /// Skipped when drawing.
        HIDDEN = 1 << 1,
    }
}

flag_set! {
    ParentFlags {
        /// Drawn after the main tree and hit-tested first.
        POPUP = 1 << 0,
        /// Wheel input scrolls overflowing content.
        SCROLL = 1 << 1,
        /// No persistent state; grouping only.
        EPHEMERAL = 1 << 2,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetHeader {
    pub id: Id,
    pub flags: WidgetFlags,
    pub kind: WidgetKindId,
    /// Parent-relative while the buffer is replayed, absolute afterwards.
    pub bounds: Rect,
}

/// Bytes every widget costs in its parent's buffer before its payload.
pub const WIDGET_HEADER_SIZE: usize = std::mem::size_of::<WidgetHeader>();

pub struct Widget {
    pub header: WidgetHeader,
    pub(crate) state: Box<dyn Any>,
}

impl Widget {
    pub fn id(&self) -> Id {
        self.header.id
    }

    pub fn bounds(&self) -> Rect {
        self.header.bounds
    }

    pub fn state<T: Any>(&self) -> Option<&T> {
        self.state.downcast_ref::<T>()
    }

    pub fn state_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.state.downcast_mut::<T>()
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Image drawn behind a parent's content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub image: Option<ImageId>,
    pub texcoords: Rect,
    pub tint: Color,
}

impl Background {
    pub fn color(tint: Color) -> Self {
        Self {
            image: None,
            texcoords: Rect::UNIT,
            tint,
        }
    }

    pub fn image(image: ImageId, texcoords: Rect, tint: Color) -> Self {
        Self {
            image: Some(image),
            texcoords,
            tint,
        }
    }
}

pub struct Layout {
    pub kind: LayoutKindId,
    pub(crate) data: Box<dyn Any>,
    pub(crate) properties: PropertyStack,
}

impl Layout {
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    pub fn pushed(&self) -> usize {
        self.properties.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParentIndex(pub(crate) usize);

impl ParentIndex {
    pub const ROOT: ParentIndex = ParentIndex(0);

    pub fn index(self) -> usize {
        self.0
    }
}

pub struct Parent {
    pub id: Id,
    pub name: String,
    pub flags: ParentFlags,
    /// Absolute bounds, already offset by the enclosing parent's scroll.
    pub bounds: Rect,
    /// Bounds as produced by the enclosing layout.
    pub relative: Rect,
    /// Part of `bounds` that survives the ancestors' clipping.
    pub visible: Option<Rect>,
    pub depth: u32,
    pub widgets: Vec<Widget>,
    pub(crate) buffer_used: usize,
    pub children: Vec<ParentIndex>,
    pub layout: Layout,
    pub background: Option<Background>,
    /// Vertical extent of the content in parent fractions.
    pub content_min: f32,
    pub content_max: f32,
    pub state: Option<StateHandle>,
    /// Scroll offset applied to this frame's content, in viewport units.
    pub scroll: f32,
    /// Nearest popup among this parent and its ancestors.
    pub(crate) popup_root: Option<ParentIndex>,
    search_cursor: Cell<usize>,
}

impl Parent {
    pub(crate) fn new(id: Id, name: String, flags: ParentFlags, layout: Layout) -> Self {
        Self {
            id,
            name,
            flags,
            bounds: Rect::UNIT,
            relative: Rect::UNIT,
            visible: Some(Rect::UNIT),
            depth: 0,
            widgets: Vec::new(),
            buffer_used: 0,
            children: Vec::new(),
            layout,
            background: None,
            content_min: 0.0,
            content_max: 0.0,
            state: None,
            scroll: 0.0,
            popup_root: None,
            search_cursor: Cell::new(0),
        }
    }

    pub fn is_popup(&self) -> bool {
        self.flags.contains(ParentFlags::POPUP)
    }

    pub fn buffer_used(&self) -> usize {
        self.buffer_used
    }

    /// Looks up a widget by id, starting at the slot after the previous hit.
    /// Repeated lookups of consecutive or identical ids are O(1).
    pub fn find_widget(&self, id: Id) -> Option<&Widget> {
        self.find_widget_slot(id).map(|slot| &self.widgets[slot])
    }

    pub(crate) fn find_widget_slot(&self, id: Id) -> Option<usize> {
        let len = self.widgets.len();
        if len == 0 {
            return None;
        }
        let start = self.search_cursor.get().min(len - 1);
        let order = (start..len).chain(0..start);
        for slot in order {
            if self.widgets[slot].header.id == id {
                self.search_cursor.set(slot);
                return Some(slot);
            }
        }
        None
    }
}

impl fmt::Debug for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("bounds", &self.bounds)
            .field("widgets", &self.widgets.len())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Index based storage for one frame's parents. The root always sits at
/// [`ParentIndex::ROOT`] and children are allocated after their parent.
pub struct ParentArena {
    parents: Vec<Parent>,
    pub(crate) mouse_parent: ParentIndex,
    pub(crate) mouse_popup: Option<ParentIndex>,
    pub(crate) scroll_parent: Option<ParentIndex>,
    pub(crate) widget_count: usize,
}

impl ParentArena {
    pub fn new(root_layout: Layout) -> Self {
        Self {
            parents: vec![Parent::new(ROOT_ID, "root".to_owned(), ParentFlags::NONE, root_layout)],
            mouse_parent: ParentIndex::ROOT,
            mouse_popup: None,
            scroll_parent: None,
            widget_count: 0,
        }
    }

    pub(crate) fn reset(&mut self, root_layout: Layout) {
        self.parents.clear();
        self.parents.push(Parent::new(
            ROOT_ID,
            "root".to_owned(),
            ParentFlags::NONE,
            root_layout,
        ));
        self.mouse_parent = ParentIndex::ROOT;
        self.mouse_popup = None;
        self.scroll_parent = None;
        self.widget_count = 0;
    }

    pub(crate) fn allocate(&mut self, parent: Parent) -> ParentIndex {
        let index = ParentIndex(self.parents.len());
        self.parents.push(parent);
        index
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn root(&self) -> &Parent {
        &self.parents[0]
    }

    pub fn get(&self, index: ParentIndex) -> Option<&Parent> {
        self.parents.get(index.0)
    }

    pub(crate) fn get_mut(&mut self, index: ParentIndex) -> Option<&mut Parent> {
        self.parents.get_mut(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParentIndex, &Parent)> {
        self.parents
            .iter()
            .enumerate()
            .map(|(index, parent)| (ParentIndex(index), parent))
    }

    pub fn find(&self, id: Id) -> Option<ParentIndex> {
        self.parents
            .iter()
            .position(|parent| parent.id == id)
            .map(ParentIndex)
    }

    /// Parent holding the widget `id` and the widget's slot in it.
    pub fn find_widget(&self, id: Id) -> Option<(ParentIndex, usize)> {
        self.parents.iter().enumerate().find_map(|(index, parent)| {
            parent
                .find_widget_slot(id)
                .map(|slot| (ParentIndex(index), slot))
        })
    }

    pub fn widget(&self, index: ParentIndex, slot: usize) -> Option<&Widget> {
        self.get(index).and_then(|parent| parent.widgets.get(slot))
    }

    pub fn mouse_parent(&self) -> ParentIndex {
        self.mouse_parent
    }

    pub fn widget_count(&self) -> usize {
        self.widget_count
    }

    pub(crate) fn parents_mut(&mut self) -> &mut [Parent] {
        &mut self.parents
    }
}

impl std::ops::Index<ParentIndex> for ParentArena {
    type Output = Parent;

    fn index(&self, index: ParentIndex) -> &Parent {
        &self.parents[index.0]
    }
}

impl std::ops::IndexMut<ParentIndex> for ParentArena {
    fn index_mut(&mut self, index: ParentIndex) -> &mut Parent {
        &mut self.parents[index.0]
    }
}
