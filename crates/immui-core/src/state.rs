//! Cross-frame parent state.
//!
//! Entries are created the first time a stateful parent is replayed and are
//! never removed. The table stays small, so lookups are a linear scan.

use crate::id::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub struct PersistentState {
    pub id: Id,
    pub name: String,
    /// Live scroll offset in viewport units.
    pub scroll: f32,
    pub scroll_target: f32,
}

#[derive(Debug, Default)]
pub struct PersistentStore {
    entries: Vec<PersistentState>,
}

impl PersistentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: Id) -> Option<StateHandle> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .map(StateHandle)
    }

    /// Returns the entry for `id`, creating it on first use.
    pub fn resolve(&mut self, id: Id, name: &str) -> StateHandle {
        if let Some(handle) = self.find(id) {
            let entry = &mut self.entries[handle.0];
            if entry.name != name {
                log::warn!(
                    "parent {id:#x} reused by `{name}`, previously `{}`",
                    entry.name
                );
                entry.name = name.to_owned();
            }
            return handle;
        }
        log::debug!("creating persistent state for `{name}` ({id:#x})");
        self.entries.push(PersistentState {
            id,
            name: name.to_owned(),
            scroll: 0.0,
            scroll_target: 0.0,
        });
        StateHandle(self.entries.len() - 1)
    }

    pub fn get(&self, handle: StateHandle) -> Option<&PersistentState> {
        self.entries.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: StateHandle) -> Option<&mut PersistentState> {
        self.entries.get_mut(handle.0)
    }

    pub fn by_id(&self, id: Id) -> Option<&PersistentState> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistentState> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
