//! Testing utilities and harness for immui

pub mod harness;

pub use harness::*;

pub mod prelude {
    pub use crate::harness::*;
}
