//! Foundation elements for immui: the per-frame input model consumed by the
//! reconciler and produced by platform adapters.

pub mod input;

pub use input::*;

pub mod prelude {
    pub use crate::input::{InputState, Key, PointerButton, PointerButtons};
}
