//! Widget and parent identities.
//!
//! An id is a caller seed mixed with the hash of every id currently pushed on
//! the [`IdStack`]. Given the same seeds in the same scopes it is identical on
//! every frame, which is what lets focus and scroll state reattach.

use crate::hash::{combine, hash_one};

pub type Id = u64;

/// Fixed id of the synthetic root parent.
pub const ROOT_ID: Id = 0;

/// Value of the id-stack hash when nothing is pushed.
pub const ID_STACK_SEED: u64 = 0xcbf2_9ce4_8422_2325;

/// Stable seed for a label.
pub fn id_from_str(label: &str) -> Id {
    hash_one(&label)
}

/// Stable seed for a source location, see [`gui_id!`](crate::gui_id).
pub fn location_id(file: &str, line: u32, column: u32) -> Id {
    hash_one(&(file, line, column))
}

/// Expands to a seed unique to the macro's call site.
#[macro_export]
macro_rules! gui_id {
    () => {
        $crate::location_id(file!(), line!(), column!())
    };
}

#[derive(Clone, Debug)]
pub struct IdStack {
    ids: Vec<Id>,
    hash: u64,
}

impl Default for IdStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IdStack {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            hash: ID_STACK_SEED,
        }
    }

    pub fn reset(&mut self) {
        self.ids.clear();
        self.hash = ID_STACK_SEED;
    }

    pub fn push(&mut self, id: Id) {
        self.ids.push(id);
        self.hash = combine(self.hash, id);
    }

    /// Pops the innermost scope. The hash is rebuilt from the remaining ids
    /// so it always equals the hash of a fresh stack with the same content.
    pub fn pop(&mut self) -> Option<Id> {
        let popped = self.ids.pop()?;
        self.hash = self
            .ids
            .iter()
            .fold(ID_STACK_SEED, |hash, id| combine(hash, *id));
        Some(popped)
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    /// Mixes a caller seed with the current scope. Never yields [`ROOT_ID`].
    pub fn resolve(&self, seed: Id) -> Id {
        match combine(self.hash, seed) {
            ROOT_ID => 1,
            id => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_stable_for_identical_scopes() {
        let mut first = IdStack::new();
        first.push(7);
        first.push(id_from_str("row"));
        let mut second = IdStack::new();
        second.push(7);
        second.push(id_from_str("row"));
        assert_eq!(first.resolve(42), second.resolve(42));
    }

    #[test]
    fn pop_restores_the_exact_previous_hash() {
        let mut stack = IdStack::new();
        stack.push(1);
        let outer = stack.hash();
        stack.push(2);
        stack.push(3);
        stack.pop();
        stack.pop();
        assert_eq!(stack.hash(), outer);
        stack.pop();
        assert_eq!(stack.hash(), ID_STACK_SEED);
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn scopes_disambiguate_equal_seeds() {
        let mut stack = IdStack::new();
        stack.push(1);
        let a = stack.resolve(id_from_str("item"));
        stack.pop();
        stack.push(2);
        let b = stack.resolve(id_from_str("item"));
        assert_ne!(a, b);
    }

    #[test]
    fn location_ids_differ_per_call_site() {
        let a = crate::gui_id!();
        let b = crate::gui_id!();
        assert_ne!(a, b);
    }
}
